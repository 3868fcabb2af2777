// crates/monitor/src/monitor.rs
//! Bulk-job monitor: start a remote job, poll it, expose a view.
//!
//! [`BulkMonitor`] is the piece a view binds to. It owns exactly one poll
//! session per concern — sessions never share a timer or in-flight state —
//! and keeps the start action disabled for as long as a session is active.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use presswatch_api::{ApiClient, ApiError, JobProgress};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::progress::reduce;
use crate::scheduler::{PollConfig, Poller};
use crate::state::{MonitorEvent, MonitorState, ProgressView};

/// The two calls a background job exposes to its monitor.
///
/// `start_job` is fire-and-forget: a success means the job is presumed
/// running and polling must begin regardless of any response content.
/// `fetch_progress` is an idempotent read.
#[async_trait]
pub trait JobClient: Send + Sync + 'static {
    async fn start_job(&self) -> Result<(), ApiError>;
    async fn fetch_progress(&self) -> Result<JobProgress, ApiError>;
}

#[async_trait]
impl JobClient for ApiClient {
    async fn start_job(&self) -> Result<(), ApiError> {
        self.start_bulk_processing().await
    }

    async fn fetch_progress(&self) -> Result<JobProgress, ApiError> {
        self.bulk_progress().await
    }
}

/// One live polling session over a job's progress endpoint.
///
/// Stops itself on the first accepted terminal progress (`running == false`),
/// emitting exactly one [`MonitorEvent::Completed`]. Poll failures are
/// warnings, not stops. Owned by [`BulkMonitor`]; dropping it cancels the
/// loop and discards any in-flight response.
pub struct PollSession {
    poller: Poller,
}

impl PollSession {
    pub fn spawn(
        source: Arc<dyn JobClient>,
        state: Arc<MonitorState>,
        config: PollConfig,
    ) -> Self {
        let poller = Poller::spawn(config, move || {
            let source = source.clone();
            let state = state.clone();
            async move {
                match source.fetch_progress().await {
                    Ok(incoming) => {
                        let (accepted, warning) = reduce(state.latest().as_ref(), incoming);
                        if let Some(w) = warning {
                            tracing::warn!(warning = %w, "accepted progress with clamp");
                            state.warn(w.to_string());
                        }
                        state.apply(accepted);
                        if !accepted.running {
                            // Terminal signal: the loop ends here, which is
                            // what makes the completion notification fire
                            // exactly once. Any duplicate terminal response
                            // has no session left to act on.
                            state.complete();
                            return ControlFlow::Break(());
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "progress poll failed; retrying on next tick");
                        state.warn(e.to_string());
                    }
                }
                ControlFlow::Continue(())
            }
        });
        Self { poller }
    }

    /// Tear the session down synchronously.
    pub fn stop(&self) {
        self.poller.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.poller.is_finished()
    }
}

/// Errors surfaced by [`BulkMonitor::start`].
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A session is already active; the start action is disabled.
    #[error("a processing session is already running")]
    AlreadyRunning,

    /// The remote start request failed. No session was created; the start
    /// action is re-enabled for retry.
    #[error("failed to start processing: {0}")]
    Start(#[from] ApiError),
}

/// View binding for one bulk-processing concern.
pub struct BulkMonitor {
    client: Arc<dyn JobClient>,
    config: PollConfig,
    state: Arc<MonitorState>,
    session: Mutex<Option<PollSession>>,
}

impl BulkMonitor {
    pub fn new(client: Arc<dyn JobClient>, config: PollConfig) -> Self {
        Self {
            client,
            config,
            state: Arc::new(MonitorState::new()),
            session: Mutex::new(None),
        }
    }

    /// Kick off the remote job and begin polling.
    ///
    /// Fails with [`MonitorError::AlreadyRunning`] while a session is
    /// active. If the remote start request fails, the monitor returns to
    /// idle and the error is surfaced for retry.
    pub async fn start(&self) -> Result<(), MonitorError> {
        if !self.state.try_begin() {
            return Err(MonitorError::AlreadyRunning);
        }

        if let Err(e) = self.client.start_job().await {
            self.state.set_idle();
            return Err(e.into());
        }

        let session = PollSession::spawn(self.client.clone(), self.state.clone(), self.config);
        match self.session.lock() {
            Ok(mut guard) => *guard = Some(session),
            Err(e) => tracing::error!("session mutex poisoned: {e}"),
        }
        Ok(())
    }

    /// Explicitly stop the active session, if any. Re-enables the start
    /// action.
    pub fn stop(&self) {
        if let Ok(mut guard) = self.session.lock() {
            if let Some(session) = guard.take() {
                session.stop();
            }
        }
        self.state.set_idle();
    }

    /// True while a session is active (start action disabled).
    pub fn is_running(&self) -> bool {
        self.state.view().is_running
    }

    /// Current derived view state.
    pub fn view(&self) -> ProgressView {
        self.state.view()
    }

    /// Subscribe to progress/warning/completion events.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.state.subscribe()
    }
}
