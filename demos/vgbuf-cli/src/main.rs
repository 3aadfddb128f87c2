//! `vgbuf`: runs Van Ginneken buffer insertion over a technology file and a
//! trace-tree file, writing the buffered output tree as JSON (and, with
//! `--render`, a PNG of the result).

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use vgbuf_engine::RunOptions;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] vgbuf_io::IoError),
    #[error(transparent)]
    Engine(#[from] vgbuf_engine::EngineError),
    #[cfg(feature = "render")]
    #[error(transparent)]
    Render(#[from] vgbuf_render::RenderError),
}

/// Van Ginneken buffer insertion over a routed trace tree.
#[derive(Debug, Parser)]
#[command(name = "vgbuf", version, about)]
struct Args {
    /// Technology file (buffer model + unit wire R/C).
    technology: PathBuf,

    /// Trace-tree file (the routed net to buffer).
    trace_tree: PathBuf,

    /// Output JSON path. Defaults to `<trace-tree-basename>_out.json`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also render the buffered tree to a PNG at this path.
    #[cfg(feature = "render")]
    #[arg(long)]
    render: Option<PathBuf>,

    /// Include per-node children lists and the root's aggregate C/Q in the
    /// output document, and log the frontier size at every committed node.
    #[arg(long)]
    debug: bool,

    /// Raise the log level to `debug`.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), CliError> {
    let tech_doc = vgbuf_io::read_technology_document(&args.technology)?;
    let tree_doc = vgbuf_io::read_trace_tree_document(&args.trace_tree)?;
    let tech = vgbuf_io::to_technology(&tech_doc)?;
    let tree = vgbuf_io::to_trace_tree(&tree_doc)?;

    let options = RunOptions { debug: args.debug };
    let best = vgbuf_engine::run(&tree, &tech, &options)?;
    let aggregate = (best.c, best.q);
    let output = vgbuf_engine::renumber(&best);

    let doc = vgbuf_io::to_output_document(&output, Some(aggregate), args.debug);
    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| vgbuf_io::default_output_path(&args.trace_tree));
    vgbuf_io::write_output_document(&out_path, &doc)?;
    log::info!(
        "wrote {} ({} nodes, {} edges); C={:.4} Q={:.4}",
        out_path.display(),
        output.nodes.len(),
        output.edges.len(),
        aggregate.0,
        aggregate.1
    );

    #[cfg(feature = "render")]
    if let Some(render_path) = &args.render {
        vgbuf_render::render_tree_png(&output, render_path)?;
        log::info!("wrote {}", render_path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if args.verbose {
        simple_log::quick!("debug");
    } else {
        simple_log::quick!("info");
    }

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
