//! The Van Ginneken buffer-insertion algorithm: a bottom-up dynamic program
//! over a routed rectilinear tree that maintains a Pareto frontier of
//! (capacitance, required-arrival-time) candidates at every point along the
//! wire and decides, for every edge, whether and where to drop in a buffer.

pub mod candidate;
pub mod driver;
pub mod error;
pub mod frontier;
pub mod merge;
pub mod options;
pub mod walker;

pub use candidate::Candidate;
pub use driver::{renumber, run, OutputTree};
pub use error::EngineError;
pub use frontier::Frontier;
pub use options::RunOptions;
