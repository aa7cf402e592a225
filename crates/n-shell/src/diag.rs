//! Diagnostics sink — where the session reports what navigation did.
//!
//! The layout core never logs. The session hands every focus decision to a
//! [`Diagnostics`] implementation supplied by its caller:
//!
//! - [`TracingSink`] — emits `tracing` events (the binary uses this)
//! - [`Recorder`] — keeps the records in memory
//! - `()` — discards everything

use n_layout::{Direction, NavError, PaneId};
use tracing::{debug, warn};

use crate::keymap::KeyChord;

/// One thing worth reporting about a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Directional navigation moved focus.
    FocusMoved {
        from: PaneId,
        to: PaneId,
        direction: Direction,
    },
    /// Cycling moved focus.
    FocusCycled { from: PaneId, to: PaneId },
    /// There is no pane in that direction; focus stays.
    NoCandidate { from: PaneId, direction: Direction },
    /// The navigator rejected the query.
    NavigationFailed { direction: Direction, error: NavError },
    /// A key chord with no binding was pressed.
    Unbound { chord: KeyChord },
}

/// Receiver for [`Diagnostic`] records.
pub trait Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic);
}

impl Diagnostics for () {
    fn record(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing`.
///
/// Focus changes and misses are `debug`; navigator errors are `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Diagnostics for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FocusMoved { from, to, direction } => {
                debug!(pane = %from, to = %to, %direction, "focus moved");
            }
            Diagnostic::FocusCycled { from, to } => {
                debug!(pane = %from, to = %to, "focus cycled");
            }
            Diagnostic::NoCandidate { from, direction } => {
                debug!(pane = %from, %direction, "no pane in that direction");
            }
            Diagnostic::NavigationFailed { direction, error } => {
                warn!(%direction, %error, "navigation failed");
            }
            Diagnostic::Unbound { chord } => {
                debug!(%chord, "key not bound");
            }
        }
    }
}

/// Collects diagnostics in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    pub records: Vec<Diagnostic>,
}

impl Recorder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Drain the collected records.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }
}

impl Diagnostics for Recorder {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn recorder_keeps_order_and_drains() {
        let mut rec = Recorder::new();
        rec.record(Diagnostic::NoCandidate { from: PaneId(1), direction: Direction::Up });
        rec.record(Diagnostic::FocusCycled { from: PaneId(1), to: PaneId(2) });
        assert_eq!(rec.records.len(), 2);
        assert!(matches!(rec.records[0], Diagnostic::NoCandidate { .. }));

        let drained = rec.take();
        assert_eq!(drained.len(), 2);
        assert!(rec.records.is_empty());
    }

    #[test]
    fn unit_sink_discards() {
        Diagnostics::record(
            &mut (),
            Diagnostic::FocusCycled { from: PaneId(1), to: PaneId(2) },
        );
    }

    #[traced_test]
    #[test]
    fn tracing_sink_logs_focus_moves() {
        let mut sink = TracingSink;
        sink.record(Diagnostic::FocusMoved {
            from: PaneId(3),
            to: PaneId(7),
            direction: Direction::Right,
        });
        assert!(logs_contain("focus moved"));
        assert!(logs_contain("to=7"));
        assert!(logs_contain("direction=right"));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_warns_on_failure() {
        let mut sink = TracingSink;
        sink.record(Diagnostic::NavigationFailed {
            direction: Direction::Left,
            error: NavError::UnknownPane(PaneId(9)),
        });
        assert!(logs_contain("WARN"));
        assert!(logs_contain("pane 9 is not in the layout tree"));
    }
}
