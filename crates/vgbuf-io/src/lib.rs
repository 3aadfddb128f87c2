//! JSON document shapes for the Van Ginneken tooling, and conversions
//! between them and the core model.

pub mod convert;
pub mod document;
pub mod error;
pub mod io;

pub use convert::{to_output_document, to_technology, to_trace_tree};
pub use document::{
    BufferParams, EdgeDocument, ModuleEntry, NodeDocument, OutputDocument, OutputEdgeDocument,
    OutputNodeDocument, TechnologyDocument, TechnologyParams, TraceTreeDocument,
};
pub use error::IoError;
pub use io::{default_output_path, read_technology_document, read_trace_tree_document, write_output_document};

#[cfg(test)]
mod tests {
    use super::*;

    fn technology_json() -> &'static str {
        r#"{
            "module": [{"input": [{"intrinsic_delay": 1.0, "C": 2.0, "R": 3.0}]}],
            "technology": {"unit_wire_resistance": 0.1, "unit_wire_capacitance": 0.2}
        }"#
    }

    fn trace_tree_json() -> &'static str {
        r#"{
            "node": [
                {"id": 0, "x": 0, "y": 0, "type": "b", "name": "root"},
                {"id": 1, "x": 0, "y": 5, "type": "t", "name": "sink", "capacitance": 0.5, "rat": 100.0}
            ],
            "edge": [
                {"id": 0, "vertices": [0, 1], "segments": [[0, 0], [0, 5]]}
            ]
        }"#
    }

    #[test]
    fn parses_technology_document() {
        let doc: TechnologyDocument = serde_json::from_str(technology_json()).unwrap();
        let tech = to_technology(&doc).unwrap();
        assert_eq!(tech.d_intr, 1.0);
        assert_eq!(tech.c_buf, 2.0);
        assert_eq!(tech.r_buf, 3.0);
        assert_eq!(tech.unit_r, 0.1);
        assert_eq!(tech.unit_c, 0.2);
    }

    #[test]
    fn parses_trace_tree_and_derives_children_from_edges() {
        let doc: TraceTreeDocument = serde_json::from_str(trace_tree_json()).unwrap();
        let tree = to_trace_tree(&doc).unwrap();
        assert_eq!(tree.root(), vgbuf_core::NodeId(0));
        assert_eq!(
            tree.node(vgbuf_core::NodeId(0)).children.as_slice(),
            &[vgbuf_core::NodeId(1)]
        );
    }

    #[test]
    fn terminal_missing_capacitance_is_rejected() {
        let bad = r#"{
            "node": [
                {"id": 0, "x": 0, "y": 0, "type": "b", "name": "root"},
                {"id": 1, "x": 0, "y": 5, "type": "t", "name": "sink", "rat": 100.0}
            ],
            "edge": [{"id": 0, "vertices": [0, 1], "segments": [[0, 0], [0, 5]]}]
        }"#;
        let doc: TraceTreeDocument = serde_json::from_str(bad).unwrap();
        assert!(matches!(
            to_trace_tree(&doc),
            Err(IoError::MissingCapacitance(1))
        ));
    }
}
