use thiserror::Error;

use vgbuf_core::{GeometryError, NodeId, Point, TreeShapeError};

/// Internal invariant violations raised while running the buffer-insertion
/// engine over an already-validated [`vgbuf_core::TraceTree`].
///
/// None of these should be reachable from well-formed input; they exist so a
/// broken invariant fails loudly at its source instead of producing a
/// silently wrong tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("cannot extend top edge from ({from:?}) to ({to:?}): not axis-aligned")]
    NonAdjacentExtension { from: Point, to: Point },

    #[error("cannot extend top edge through ({a:?}), ({b:?}) to ({to:?}): not rectilinear")]
    NonRectilinearExtension { a: Point, b: Point, to: Point },

    #[error("attempted to insert a buffer on a candidate with no open top edge")]
    BufferWithoutTopEdge,

    #[error("attempted to install a top node on a candidate with no open top edge")]
    InstallWithoutTopEdge,

    #[error("attempted to install a sink terminal as an internal top node")]
    InstallTerminalAsTopNode,

    #[error("attempted to merge two candidates capped at different nodes")]
    MergeTopNodeMismatch,

    #[error("no routed edge leads into node {0:?}")]
    MissingEdge(NodeId),

    #[error("frontier was empty after pruning; no candidate survived to the driver")]
    EmptyResult,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    TreeShape(#[from] TreeShapeError),
}
