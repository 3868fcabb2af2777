// crates/monitor/src/progress.rs
//! Pure progress reconciliation.
//!
//! The server is the sole source of truth and exposes no sequence numbers,
//! so reconciliation is last-write-wins by arrival order. The poll loop
//! serializes requests (at most one in flight), which makes arrival order
//! equal issue order; if polling is ever parallelized this reducer needs a
//! monotonic check on `done` before that change ships.

use std::fmt;

use presswatch_api::JobProgress;

/// Non-fatal oddity noticed while accepting a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceWarning {
    /// The server reported more finished work than exists; `done` was
    /// clamped to `total` instead of rejecting the update.
    DoneExceedsTotal { done: u64, total: u64 },
}

impl fmt::Display for ReduceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceWarning::DoneExceedsTotal { done, total } => {
                write!(f, "server reported done={done} > total={total}; clamped")
            }
        }
    }
}

/// Merge a server-reported progress into view state.
///
/// Accepts `incoming` unconditionally (`previous` never vetoes an update —
/// see the module docs for why), clamping `done` to `total` when the server
/// over-reports. Never fails: a malformed value degrades to a warning.
pub fn reduce(
    previous: Option<&JobProgress>,
    incoming: JobProgress,
) -> (JobProgress, Option<ReduceWarning>) {
    let _ = previous;
    if incoming.done > incoming.total {
        let warning = ReduceWarning::DoneExceedsTotal {
            done: incoming.done,
            total: incoming.total,
        };
        let accepted = JobProgress {
            done: incoming.total,
            ..incoming
        };
        return (accepted, Some(warning));
    }
    (incoming, None)
}

/// Completion percentage as an integer 0–100, round-half-up.
/// An empty job (`total == 0`) reads as 0%.
pub fn percent(p: &JobProgress) -> u8 {
    if p.total == 0 {
        return 0;
    }
    // Widen before scaling: done * 200 would overflow u64 for huge totals.
    let total = u128::from(p.total);
    let done = u128::from(p.done.min(p.total));
    ((done * 200 + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jp(total: u64, done: u64, running: bool) -> JobProgress {
        JobProgress {
            total,
            done,
            running,
        }
    }

    #[test]
    fn reduce_accepts_incoming_unconditionally() {
        let prev = jp(10, 8, true);
        // A lower `done` still wins: last write by arrival order.
        let (accepted, warning) = reduce(Some(&prev), jp(10, 3, true));
        assert_eq!(accepted, jp(10, 3, true));
        assert!(warning.is_none());
    }

    #[test]
    fn reduce_clamps_done_to_total() {
        let (accepted, warning) = reduce(None, jp(5, 9, true));
        assert_eq!(accepted, jp(5, 5, true));
        assert_eq!(
            warning,
            Some(ReduceWarning::DoneExceedsTotal { done: 9, total: 5 })
        );
    }

    #[test]
    fn percent_of_empty_job_is_zero() {
        assert_eq!(percent(&jp(0, 0, false)), 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(&jp(4, 1, true)), 25);
        assert_eq!(percent(&jp(3, 2, true)), 67);
        assert_eq!(percent(&jp(8, 1, true)), 13); // 12.5 rounds up
        assert_eq!(percent(&jp(3, 1, true)), 33);
        assert_eq!(percent(&jp(10, 10, false)), 100);
    }

    #[test]
    fn percent_handles_huge_totals() {
        assert_eq!(percent(&jp(u64::MAX, u64::MAX, false)), 100);
        assert_eq!(percent(&jp(u64::MAX, u64::MAX / 2, true)), 50);
        assert_eq!(percent(&jp(u64::MAX, 0, true)), 0);
    }
}
