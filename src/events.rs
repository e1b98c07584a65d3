use crate::app::{InstallAck, JobStatus, PathInfo, Summary};
use crate::error::ApiError;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

/// Who asked for a summary refresh. The poller's terminal reconciliation is
/// the only refresh that moves the poller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    User,
    Poll,
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// The poll timer elapsed (or an eager tick was requested).
    PollDue,
    JobStatusResult(Result<JobStatus, ApiError>),
    SummaryResult {
        trigger: RefreshTrigger,
        result: Result<Summary, ApiError>,
    },
    LogResult(Result<String, ApiError>),
    ReportResult(Result<String, ApiError>),
    InstallResult(Result<InstallAck, ApiError>),
    PathsResult(Result<PathInfo, ApiError>),
    ClipboardResult { label: &'static str, ok: bool },
}

/// Reads crossterm key events on a dedicated thread and multiplexes them with
/// a fixed-rate tick into the app channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let thread = std::thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if event_tx.send(AppEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            tx,
            shutdown,
            thread: Some(thread),
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
