//! Single-flight job polling.
//!
//! The poller owns the one timer handle in the program. Every (re)arm aborts
//! the previous timer before spawning the next, so at most one tick is ever
//! scheduled; the main loop processes one tick result at a time, so at most
//! one is ever in flight. A tick that fails halts the chain: the poller drops
//! to `Idle` with the error on the status line, and the next user action
//! restarts it. No automatic retry, no backoff.

use crate::api::client::SkillsApi;
use crate::app::{JobStatus, ViewQuery, POLL_INTERVAL_MS};
use crate::events::{AppEvent, RefreshTrigger};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No timer armed; nothing being watched.
    Idle,
    /// A timer is armed for the next tick.
    Polling,
    /// Running→finished edge observed; terminal reconciliation in flight.
    Completing,
}

/// What one tick decided to do, derived purely from the fetched status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickPlan {
    /// Job still running: show the PID, tail the log, re-arm.
    Continue { pid: u32 },
    /// Job finished since we last looked: tail the log once, then refresh
    /// the summary, then go idle.
    Reconcile { pid: u32, exit_code: Option<i32> },
    /// No job has ever run.
    NoJob,
}

pub fn plan_tick(status: &JobStatus) -> TickPlan {
    if status.running {
        TickPlan::Continue {
            pid: status.pid.unwrap_or(0),
        }
    } else if let Some(pid) = status.pid {
        TickPlan::Reconcile {
            pid,
            exit_code: status.exit_code,
        }
    } else {
        TickPlan::NoJob
    }
}

pub struct JobPoller {
    phase: PollPhase,
    timer: Option<JoinHandle<()>>,
}

impl JobPoller {
    pub fn new() -> Self {
        Self {
            phase: PollPhase::Idle,
            timer: None,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the pending timer, if any.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Schedule a tick after `delay`, cancelling any pending timer first.
    pub fn arm(&mut self, tx: &mpsc::UnboundedSender<AppEvent>, delay: Duration) {
        self.disarm();
        let tx = tx.clone();
        self.timer = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            if tx.send(AppEvent::PollDue).is_err() {
                tracing::warn!("poll timer: channel closed");
            }
        }));
        self.phase = PollPhase::Polling;
    }

    /// Eager tick: enter `Polling` without waiting out the interval. Used at
    /// startup (to pick up a job already running) and right after the server
    /// accepts a start request.
    pub fn begin(&mut self, tx: &mpsc::UnboundedSender<AppEvent>) {
        self.arm(tx, Duration::ZERO);
    }

    /// Apply a tick decision. `Continue` re-arms; the other outcomes leave no
    /// timer behind.
    pub fn on_plan(&mut self, plan: &TickPlan, tx: &mpsc::UnboundedSender<AppEvent>) {
        match plan {
            TickPlan::Continue { .. } => self.arm(tx, POLL_INTERVAL),
            TickPlan::Reconcile { .. } => {
                self.disarm();
                self.phase = PollPhase::Completing;
            }
            TickPlan::NoJob => {
                self.disarm();
                self.phase = PollPhase::Idle;
            }
        }
    }

    /// The terminal reconciliation finished (successfully or not).
    pub fn finish_reconcile(&mut self) {
        if self.phase == PollPhase::Completing {
            self.phase = PollPhase::Idle;
        }
    }

    /// A tick fetch failed: halt the chain.
    pub fn fail(&mut self) {
        self.disarm();
        self.phase = PollPhase::Idle;
    }
}

impl Default for JobPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// The terminal reconciliation for a running→finished edge: exactly one log
/// tail, then one summary refresh. The summary result is tagged `Poll`; the
/// main loop uses that tag to return the poller to `Idle`.
pub async fn run_reconcile(
    api: &dyn SkillsApi,
    tx: &mpsc::UnboundedSender<AppEvent>,
    lines: u32,
    query: ViewQuery,
) {
    let log = api.fetch_log(lines).await;
    if tx.send(AppEvent::LogResult(log)).is_err() {
        tracing::warn!("reconcile: channel closed");
        return;
    }
    let result = api.fetch_summary(query).await;
    if tx
        .send(AppEvent::SummaryResult {
            trigger: RefreshTrigger::Poll,
            result,
        })
        .is_err()
    {
        tracing::warn!("reconcile: channel closed");
    }
}
