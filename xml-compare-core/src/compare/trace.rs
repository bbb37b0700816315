use log::{debug, trace};

use crate::compare::result::Reason;

/// Observer notified as the comparator walks the trees.
///
/// Depth is 0 for the compared roots.
pub trait Trace {
    /// A node pair is about to be compared.
    fn enter(&self, _depth: usize, _lhs_name: &str, _rhs_name: &str) {}

    /// The comparison stopped with `reason`.
    fn mismatch(&self, _depth: usize, _reason: Reason) {}
}

/// Forwards comparator events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn enter(&self, depth: usize, lhs_name: &str, rhs_name: &str) {
        trace!("compare depth={depth} lhs=<{lhs_name}> rhs=<{rhs_name}>");
    }

    fn mismatch(&self, depth: usize, reason: Reason) {
        debug!("mismatch depth={depth} reason={reason}");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {}
