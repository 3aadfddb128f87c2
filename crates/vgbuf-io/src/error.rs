use thiserror::Error;

/// Document-shape errors: the JSON parsed but didn't describe a usable
/// technology or trace-tree.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("technology document has no module[0].input[0] entry")]
    MissingBufferParams,

    #[error("node {0} has unknown type {1:?}; expected \"t\", \"s\", or \"b\"")]
    UnknownNodeType(u32, String),

    #[error("terminal node {0} is missing its capacitance value")]
    MissingCapacitance(u32),

    #[error("terminal node {0} is missing its rat value")]
    MissingRat(u32),

    #[error(transparent)]
    TreeShape(#[from] vgbuf_core::TreeShapeError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
