// crates/monitor/src/state.rs
//! Lock-free view state for one bulk-processing concern.
//!
//! The poll task writes through atomics while the UI thread reads snapshots
//! without contention; only the warning text sits behind an `RwLock`.
//! Events additionally fan out over a broadcast channel for callers that
//! want pushes instead of polling the snapshot.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::RwLock;

use presswatch_api::JobProgress;
use tokio::sync::broadcast;

use crate::progress::percent;

/// Lifecycle of the monitored concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MonitorStatus {
    /// Nothing started yet, or the last session was explicitly stopped.
    Idle = 0,
    /// A session is active: the start action must stay disabled.
    Running = 1,
    /// The last session saw its terminal signal.
    Completed = 2,
}

impl MonitorStatus {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Completed,
            _ => Self::Idle,
        }
    }
}

/// Snapshot the view renders: derived values only, never mutated directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    /// Integer 0–100, round-half-up; 0 for an empty job.
    pub percent: u8,
    pub done: u64,
    pub total: u64,
    /// True while a session is active (start action disabled).
    pub is_running: bool,
    /// Most recent non-fatal warning, if any.
    pub last_warning: Option<String>,
}

/// Push notification emitted by a session.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A progress update was accepted.
    Progress(ProgressView),
    /// A poll failed or a payload was odd; the session continues.
    Warning(String),
    /// The terminal signal was observed. Emitted exactly once per session.
    Completed,
}

/// Shared state between one poll session and its view.
pub struct MonitorState {
    status: AtomicU8,
    total: AtomicU64,
    done: AtomicU64,
    job_running: AtomicBool,
    has_progress: AtomicBool,
    last_warning: RwLock<Option<String>>,
    events_tx: broadcast::Sender<MonitorEvent>,
}

impl MonitorState {
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            status: AtomicU8::new(MonitorStatus::Idle as u8),
            total: AtomicU64::new(0),
            done: AtomicU64::new(0),
            job_running: AtomicBool::new(false),
            has_progress: AtomicBool::new(false),
            last_warning: RwLock::new(None),
            events_tx,
        }
    }

    pub fn status(&self) -> MonitorStatus {
        MonitorStatus::from_u8(self.status.load(Ordering::Relaxed))
    }

    /// Try to claim the start action: `Idle` or `Completed` → `Running`.
    ///
    /// Returns false while a session is active — this is the double-submit
    /// guard. On success all counters from the previous session are reset.
    pub fn try_begin(&self) -> bool {
        let claimed = self
            .status
            .compare_exchange(
                MonitorStatus::Idle as u8,
                MonitorStatus::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .or_else(|_| {
                self.status.compare_exchange(
                    MonitorStatus::Completed as u8,
                    MonitorStatus::Running as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
            })
            .is_ok();
        if claimed {
            self.total.store(0, Ordering::Relaxed);
            self.done.store(0, Ordering::Relaxed);
            self.job_running.store(true, Ordering::Relaxed);
            self.has_progress.store(false, Ordering::Relaxed);
            if let Ok(mut guard) = self.last_warning.write() {
                *guard = None;
            }
        }
        claimed
    }

    /// Latest accepted progress, if any arrived this session.
    pub fn latest(&self) -> Option<JobProgress> {
        if !self.has_progress.load(Ordering::Relaxed) {
            return None;
        }
        Some(JobProgress {
            total: self.total.load(Ordering::Relaxed),
            done: self.done.load(Ordering::Relaxed),
            running: self.job_running.load(Ordering::Relaxed),
        })
    }

    /// Store an accepted progress and emit [`MonitorEvent::Progress`].
    pub fn apply(&self, p: JobProgress) {
        self.total.store(p.total, Ordering::Relaxed);
        self.done.store(p.done, Ordering::Relaxed);
        self.job_running.store(p.running, Ordering::Relaxed);
        self.has_progress.store(true, Ordering::Relaxed);
        let _ = self.events_tx.send(MonitorEvent::Progress(self.view()));
    }

    /// Record a non-fatal warning and emit [`MonitorEvent::Warning`].
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        if let Ok(mut guard) = self.last_warning.write() {
            *guard = Some(message.clone());
        }
        let _ = self.events_tx.send(MonitorEvent::Warning(message));
    }

    /// Mark the terminal signal and emit [`MonitorEvent::Completed`].
    pub fn complete(&self) {
        self.status
            .store(MonitorStatus::Completed as u8, Ordering::Relaxed);
        let _ = self.events_tx.send(MonitorEvent::Completed);
    }

    /// Explicit stop: `Running` → `Idle`. A completed session stays
    /// `Completed`.
    pub fn set_idle(&self) {
        let _ = self.status.compare_exchange(
            MonitorStatus::Running as u8,
            MonitorStatus::Idle as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events_tx.subscribe()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ProgressView {
        let progress = self.latest().unwrap_or(JobProgress {
            total: 0,
            done: 0,
            running: false,
        });
        ProgressView {
            percent: percent(&progress),
            done: progress.done,
            total: progress.total,
            is_running: self.status() == MonitorStatus::Running,
            last_warning: self.last_warning.read().ok().and_then(|g| g.clone()),
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
