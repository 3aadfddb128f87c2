use std::collections::HashMap;

use smallvec::SmallVec;
use vgbuf_core::{Edge, EdgeId, Node, NodeId, NodeKind, Point, TraceTree};
use vgbuf_engine::OutputTree;

use crate::document::{
    EdgeDocument, NodeDocument, OutputDocument, OutputEdgeDocument, OutputNodeDocument,
    TechnologyDocument, TraceTreeDocument,
};
use crate::error::IoError;

/// Converts a parsed technology document into the core `Technology` value.
pub fn to_technology(doc: &TechnologyDocument) -> Result<vgbuf_core::Technology, IoError> {
    let buffer = doc
        .module
        .first()
        .and_then(|m| m.input.first())
        .ok_or(IoError::MissingBufferParams)?;

    Ok(vgbuf_core::Technology {
        d_intr: buffer.intrinsic_delay,
        c_buf: buffer.c,
        r_buf: buffer.r,
        unit_r: doc.technology.unit_wire_resistance,
        unit_c: doc.technology.unit_wire_capacitance,
    })
}

fn node_kind(doc: &NodeDocument) -> Result<NodeKind, IoError> {
    match doc.kind.as_str() {
        "t" => Ok(NodeKind::Terminal {
            c_sink: doc.capacitance.ok_or(IoError::MissingCapacitance(doc.id))?,
            q_sink: doc.rat.ok_or(IoError::MissingRat(doc.id))?,
        }),
        "s" => Ok(NodeKind::Steiner),
        "b" => Ok(NodeKind::Buffer),
        other => Err(IoError::UnknownNodeType(doc.id, other.to_string())),
    }
}

/// Converts a parsed trace-tree document into the core `TraceTree`,
/// reconstructing each node's children list from the edge list (the document
/// itself carries no explicit parent-to-children adjacency).
pub fn to_trace_tree(doc: &TraceTreeDocument) -> Result<TraceTree, IoError> {
    let mut children_of: HashMap<NodeId, SmallVec<[NodeId; 4]>> = HashMap::new();
    for edge in &doc.edge {
        children_of
            .entry(NodeId(edge.vertices[0]))
            .or_default()
            .push(NodeId(edge.vertices[1]));
    }

    let mut nodes = Vec::with_capacity(doc.node.len());
    for node_doc in &doc.node {
        nodes.push(Node {
            id: NodeId(node_doc.id),
            x: node_doc.x,
            y: node_doc.y,
            kind: node_kind(node_doc)?,
            name: node_doc.name.clone(),
            children: children_of.remove(&NodeId(node_doc.id)).unwrap_or_default(),
        });
    }

    let edges = doc
        .edge
        .iter()
        .map(|e| Edge {
            id: EdgeId(e.id),
            parent: NodeId(e.vertices[0]),
            child: NodeId(e.vertices[1]),
            segments: e.segments.iter().map(|[x, y]| Point::new(*x, *y)).collect(),
        })
        .collect();

    Ok(TraceTree::new(nodes, edges)?)
}

fn kind_tag(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Terminal { .. } => "t",
        NodeKind::Steiner => "s",
        NodeKind::Buffer => "b",
    }
}

/// Builds the output document for a renumbered winning candidate. In debug
/// mode every node carries its children list and the document carries the
/// candidate's aggregate downstream capacitance/RAT at its root.
pub fn to_output_document(
    output: &OutputTree,
    aggregate: Option<(f64, f64)>,
    debug: bool,
) -> OutputDocument {
    let node = output
        .nodes
        .iter()
        .map(|n| {
            let (capacitance, rat) = match n.kind {
                NodeKind::Terminal { c_sink, q_sink } => (Some(c_sink), Some(q_sink)),
                _ => (None, None),
            };
            OutputNodeDocument {
                id: n.id.0,
                x: n.x,
                y: n.y,
                kind: kind_tag(&n.kind).to_string(),
                name: n.name.clone(),
                capacitance,
                rat,
                children: debug.then(|| n.children.iter().map(|c| c.0).collect()),
            }
        })
        .collect();

    let edge = output
        .edges
        .iter()
        .map(|e| OutputEdgeDocument {
            id: e.id.0,
            vertices: [e.parent.0, e.child.0],
            segments: e.segments.iter().map(|p| [p.x, p.y]).collect(),
        })
        .collect();

    let (c, q) = match (debug, aggregate) {
        (true, Some((c, q))) => (Some(c), Some(q)),
        _ => (None, None),
    };

    OutputDocument { node, edge, c, q }
}
