// crates/monitor/src/lib.rs
//! Background-job progress monitoring.
//!
//! The pieces, bottom up:
//! - [`progress`]: pure reconciliation of server-reported progress and the
//!   derived percentage
//! - [`scheduler`]: the owned repeating poll ([`Poller`]) with skip-don't-
//!   queue pacing and synchronous teardown
//! - [`state`]: lock-free shared state between a poll session and its view
//! - [`monitor`]: the [`BulkMonitor`] facade a view binds to, plus the
//!   [`JobClient`] seam the HTTP client plugs into

pub mod monitor;
pub mod progress;
pub mod scheduler;
pub mod state;

pub use monitor::{BulkMonitor, JobClient, MonitorError, PollSession};
pub use progress::{percent, reduce, ReduceWarning};
pub use scheduler::{PollConfig, Poller};
pub use state::{MonitorEvent, MonitorState, MonitorStatus, ProgressView};
