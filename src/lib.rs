//! Facade crate: re-exports the pieces of the Van Ginneken buffer-insertion
//! toolkit that most callers need without pulling in the individual crate
//! paths directly.

pub use vgbuf_core::*;
pub use vgbuf_engine::*;
pub use vgbuf_io::*;

#[cfg(feature = "render")]
pub use vgbuf_render::*;
