// crates/monitor/src/scheduler.rs
//! Owned repeating-poll scheduler.
//!
//! [`Poller`] replaces the free-floating timers the pattern usually degrades
//! into: the timer is a value with explicit `stop`, cancelled on drop, so a
//! poll loop can never outlive its owner. One [`Poller`] serves every
//! variant of the pattern — the 700 ms live-progress poll and the multi-
//! second ambient refresh differ only in their [`PollConfig`].
//!
//! Correctness properties the tests below pin down:
//! - at most one tick body runs at a time; ticks due while one is running
//!   are skipped, not queued
//! - after `stop()` no tick body runs and no in-flight body completes —
//!   cancellation drops the body mid-await, so a late response is discarded
//!   rather than applied

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// How a [`Poller`] paces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Time between tick starts.
    pub interval: Duration,
    /// When true the first tick fires immediately ("the user just pressed
    /// the button"); when false it waits one full interval ("ambient
    /// refresh").
    pub immediate: bool,
}

impl PollConfig {
    pub const fn new(interval: Duration, immediate: bool) -> Self {
        Self {
            interval,
            immediate,
        }
    }

    /// Live progress after a user action: 700 ms, immediate first fetch.
    pub const fn live_progress() -> Self {
        Self::new(Duration::from_millis(700), true)
    }

    /// Ambient background refresh: first fetch after one full interval.
    pub const fn ambient(interval: Duration) -> Self {
        Self::new(interval, false)
    }
}

/// A repeating background poll bound to its owner's lifetime.
///
/// Dropping the poller cancels it; `stop()` cancels it synchronously.
pub struct Poller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a poll loop that runs `tick` per the config until the tick
    /// returns [`ControlFlow::Break`] or the poller is stopped/dropped.
    ///
    /// The tick body is awaited inline, which is what serializes requests:
    /// while a body is pending, interval ticks are missed and skipped.
    pub fn spawn<F, Fut>(config: PollConfig, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let first = if config.immediate {
                Instant::now()
            } else {
                Instant::now() + config.interval
            };
            let mut ticker = tokio::time::interval_at(first, config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                // Cancellation wins the race against an in-flight body:
                // the future is dropped and its result never observed.
                let flow = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    flow = tick() => flow,
                };

                if flow.is_break() {
                    break;
                }
            }
        });

        Self { cancel, handle }
    }

    /// Stop polling. Synchronous and total: no tick body starts or finishes
    /// after this returns.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// True once the poll loop has exited (stopped, dropped, or broke).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TICK: Duration = Duration::from_millis(700);

    /// Let the paused-clock runtime advance `d` and run ready tasks.
    async fn run_for(d: Duration) {
        tokio::time::sleep(d).await;
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_config_ticks_at_time_zero() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1, "first tick is immediate");

        run_for(TICK).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn ambient_config_waits_one_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _poller = Poller::spawn(PollConfig::ambient(TICK), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0, "no immediate tick");

        run_for(TICK).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_after_stop() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(TICK * 3).await;
        let before = count.load(Ordering::SeqCst);
        assert!(before >= 3);

        poller.stop();
        run_for(TICK * 10).await;
        assert_eq!(count.load(Ordering::SeqCst), before, "ticks after stop");
        assert!(poller.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_body_is_discarded_on_stop() {
        // The body "responds" only after a long delay; stopping mid-flight
        // must drop it before the post-await mutation runs.
        let applied = Arc::new(AtomicUsize::new(0));
        let a = applied.clone();
        let poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let a = a.clone();
            async move {
                tokio::time::sleep(TICK * 5).await;
                a.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(Duration::from_millis(1)).await; // body now in flight
        poller.stop();
        run_for(TICK * 20).await;
        assert_eq!(applied.load(Ordering::SeqCst), 0, "late response applied");
    }

    #[tokio::test(start_paused = true)]
    async fn at_most_one_body_in_flight() {
        // Body latency 3x the interval: due ticks must be skipped, never
        // stacked into concurrent bodies.
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        let (f, m, r) = (in_flight.clone(), max_seen.clone(), runs.clone());
        let _poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let (f, m, r) = (f.clone(), m.clone(), r.clone());
            async move {
                let now = f.fetch_add(1, Ordering::SeqCst) + 1;
                m.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(TICK * 3).await;
                f.fetch_sub(1, Ordering::SeqCst);
                r.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(TICK * 30).await;
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        // ~30 intervals elapsed but each body occupies ~3-4 of them.
        let total = runs.load(Ordering::SeqCst);
        assert!(total >= 5 && total <= 10, "got {total} runs");
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let c = c.clone();
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        run_for(TICK * 10).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(poller.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let poller = Poller::spawn(PollConfig::new(TICK, true), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        run_for(Duration::from_millis(1)).await;
        drop(poller);
        run_for(TICK * 5).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
