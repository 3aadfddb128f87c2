use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::document::{OutputDocument, TechnologyDocument, TraceTreeDocument};
use crate::error::IoError;

pub fn read_technology_document(path: &Path) -> Result<TechnologyDocument, IoError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

pub fn read_trace_tree_document(path: &Path) -> Result<TraceTreeDocument, IoError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

pub fn write_output_document(path: &Path, doc: &OutputDocument) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    Ok(())
}

/// `<trace-tree-basename>_out.json`, matching the naming convention used when
/// no explicit output path is given on the command line.
pub fn default_output_path(trace_tree_path: &Path) -> PathBuf {
    let stem = trace_tree_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace_tree".to_string());
    PathBuf::from(format!("{stem}_out.json"))
}
