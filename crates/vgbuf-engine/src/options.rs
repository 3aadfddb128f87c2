/// Run-time knobs for a single engine invocation.
///
/// Threaded explicitly through the driver rather than read from a global, so
/// two concurrent runs (e.g. the sweep in `vgbuf-explore`) never interfere.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Emit extra per-node bookkeeping (children lists, aggregate C/Q) in the
    /// output document and log the frontier size at every committed node.
    pub debug: bool,
}
