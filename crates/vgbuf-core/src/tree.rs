use std::collections::HashMap;

use smallvec::SmallVec;
use thiserror::Error;

use crate::geometry::{polyline_length, GeometryError, Point};

/// A globally unique identifier for a [`Node`] within one [`TraceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A globally unique identifier for an [`Edge`] within one [`TraceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// The kind of a [`Node`], carrying only the data that kind actually has.
///
/// This replaces a string tag (`"t"` / `"s"` / `"b"`): the presence of sink
/// capacitance/RAT is type-level, and matching on `NodeKind` is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// A sink: a load with a known input capacitance and required arrival
    /// time.
    Terminal { c_sink: f64, q_sink: f64 },
    /// A zero-size rectilinear Steiner junction.
    Steiner,
    /// A buffer: either the driving root or one inserted by the algorithm.
    Buffer,
}

impl NodeKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::Terminal { .. })
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, NodeKind::Buffer)
    }
}

/// A node in a trace tree or in a [`Candidate`](crate) output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: i32,
    pub y: i32,
    pub kind: NodeKind,
    pub name: String,
    pub children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An edge connecting a parent to a child, carrying the ordered rectilinear
/// polyline between them. Orientation (`parent` -> `child`) is semantic and
/// is never implied by the order of `segments`: `segments` always runs from
/// the parent's coordinates to the child's.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub parent: NodeId,
    pub child: NodeId,
    pub segments: Vec<Point>,
}

impl Edge {
    /// Wire length, verifying every segment is axis-aligned.
    pub fn length(&self) -> Result<i64, GeometryError> {
        polyline_length(&self.segments)
    }

    /// The polyline oriented from `child` towards `parent`, without mutating
    /// `self`. Used by the edge walker, which always walks child-to-parent;
    /// unlike the algorithm this was adapted from, the input edge's stored
    /// orientation is never reversed in place.
    pub fn points_toward_parent(&self) -> Vec<Point> {
        let mut pts = self.segments.clone();
        pts.reverse();
        pts
    }
}

/// Shape errors detected while constructing a [`TraceTree`] from already
/// parsed data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeShapeError {
    #[error("trace tree has no node of kind buffer at its root")]
    MissingRootBuffer,
    #[error("trace tree has {0} nodes of kind buffer; exactly one is required")]
    MultipleRootBuffers(usize),
    #[error("edge {edge_id:?} references unknown node {node_id:?}")]
    DanglingEdge { edge_id: EdgeId, node_id: NodeId },
    #[error("duplicate node id {0:?}")]
    DuplicateNodeId(NodeId),
    #[error("duplicate edge id {0:?}")]
    DuplicateEdgeId(EdgeId),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// The immutable input trace tree: a rooted rectilinear Steiner tree whose
/// root is the driving buffer and whose leaves are sinks.
///
/// Once constructed, a `TraceTree` is never mutated; the buffer-insertion
/// engine only ever reads from it.
#[derive(Debug, Clone)]
pub struct TraceTree {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<NodeId, usize>,
    edge_by_child: HashMap<NodeId, usize>,
    root: NodeId,
}

impl TraceTree {
    /// Builds a `TraceTree` from a flat list of nodes and edges, validating
    /// the shape invariants the algorithm relies on.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, TreeShapeError> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id, i).is_some() {
                return Err(TreeShapeError::DuplicateNodeId(node.id));
            }
        }

        let mut edge_by_child = HashMap::with_capacity(edges.len());
        let mut seen_edge_ids = HashMap::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            if seen_edge_ids.insert(edge.id, ()).is_some() {
                return Err(TreeShapeError::DuplicateEdgeId(edge.id));
            }
            if !index_by_id.contains_key(&edge.parent) {
                return Err(TreeShapeError::DanglingEdge {
                    edge_id: edge.id,
                    node_id: edge.parent,
                });
            }
            if !index_by_id.contains_key(&edge.child) {
                return Err(TreeShapeError::DanglingEdge {
                    edge_id: edge.id,
                    node_id: edge.child,
                });
            }
            edge.length()?;
            edge_by_child.insert(edge.child, i);
        }

        let mut roots = nodes.iter().filter(|n| n.kind.is_buffer());
        let root = match (roots.next(), roots.next()) {
            (None, _) => return Err(TreeShapeError::MissingRootBuffer),
            (Some(_), Some(_)) => {
                return Err(TreeShapeError::MultipleRootBuffers(
                    nodes.iter().filter(|n| n.kind.is_buffer()).count(),
                ))
            }
            (Some(n), None) => n.id,
        };

        Ok(Self {
            nodes,
            edges,
            index_by_id,
            edge_by_child,
            root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[self.index_by_id[&id]]
    }

    /// The edge whose child is `child`, i.e. the edge connecting `child` to
    /// its parent.
    pub fn edge_into(&self, child: NodeId) -> Option<&Edge> {
        self.edge_by_child.get(&child).map(|&i| &self.edges[i])
    }

    pub fn max_node_id(&self) -> NodeId {
        self.nodes.iter().map(|n| n.id).max().unwrap_or(NodeId(0))
    }

    pub fn max_edge_id(&self) -> EdgeId {
        self.edges.iter().map(|e| e.id).max().unwrap_or(EdgeId(0))
    }
}

/// Generates fresh, monotonically increasing ids starting just past the
/// largest id already present in the input tree.
#[derive(Debug, Clone, Copy)]
pub struct IdGen {
    next_node: u32,
    next_edge: u32,
}

impl IdGen {
    pub fn starting_after(tree: &TraceTree) -> Self {
        Self {
            next_node: tree.max_node_id().0 + 1,
            next_edge: tree.max_edge_id().0 + 1,
        }
    }

    /// Builds a generator starting at the given next node/edge ids directly,
    /// e.g. for tests that construct candidates without a backing tree.
    pub fn new(next_node: u32, next_edge: u32) -> Self {
        Self {
            next_node,
            next_edge,
        }
    }

    pub fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    pub fn next_edge_id(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }
}
