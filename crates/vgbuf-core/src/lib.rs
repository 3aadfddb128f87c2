pub mod chain;
pub mod geometry;
pub mod tech;
pub mod tree;

pub use chain::Chain;
pub use geometry::{polyline_length, wire_capacitance, wire_delay, GeometryError, Point};
pub use tech::Technology;
pub use tree::{Edge, EdgeId, IdGen, Node, NodeId, NodeKind, TraceTree, TreeShapeError};
