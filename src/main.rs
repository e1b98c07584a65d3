use skw::api;
use skw::app;
use skw::cli;
use skw::clipboard;
use skw::dispatcher;
use skw::events;
use skw::input;
use skw::poller;
use skw::tui;

use api::client::{HttpClient, SkillsApi};
use app::{AppConfig, AppState, ViewQuery, LIMIT_STEP};
use clap::Parser;
use cli::Cli;
use color_eyre::eyre::{eyre, Result};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use dispatcher::{AckOutcome, Dispatch, Intent};
use events::{AppEvent, EventHandler, RefreshTrigger};
use input::{Action, InputContext};
use poller::{JobPoller, TickPlan};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use skw::error::ApiError;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    let api: Arc<dyn SkillsApi> = Arc::new(HttpClient::new(&args.url)?);

    let mut state = AppState::new(
        AppConfig {
            base_url: args.url,
            log_lines: args.lines,
            desktop_notify: !args.no_notify,
        },
        args.view,
        args.limit,
    );
    state.is_loading = true;

    // Setup terminal with panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let events = EventHandler::new(Duration::from_millis(100));
    let tx = events.sender();
    let mut job_poller = JobPoller::new();

    // Startup: load the summary and paths, and self-arm the poller to pick
    // up a job that was already running before this client started.
    spawn_summary(&api, &tx, state.query(), RefreshTrigger::User);
    spawn_paths(&api, &tx);
    job_poller.begin(&tx);

    let result = run_app(&mut terminal, &mut state, &mut job_poller, events, &tx, &api).await;

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    job_poller: &mut JobPoller,
    mut events: EventHandler,
    tx: &UnboundedSender<AppEvent>,
    api: &Arc<dyn SkillsApi>,
) -> Result<()> {
    loop {
        terminal.draw(|f| tui::render::render(f, state))?;

        if let Some(event) = events.next().await {
            match event {
                AppEvent::Key(key) => {
                    let ctx = InputContext {
                        has_error: state.error_message().is_some(),
                        is_loading: state.is_loading,
                    };
                    match input::map_key(key, &ctx) {
                        Action::Quit => state.should_quit = true,
                        Action::DismissError => state.clear_error(),
                        Action::MoveUp => state.move_cursor_up(),
                        Action::MoveDown => state.move_cursor_down(),
                        Action::Sync => {
                            handle_intent(Intent::Sync, state, job_poller, tx, api);
                        }
                        Action::ForceRefresh => {
                            handle_intent(Intent::ForceRefresh, state, job_poller, tx, api);
                        }
                        Action::ViewReport => {
                            handle_intent(Intent::ViewReport, state, job_poller, tx, api);
                        }
                        Action::RefreshSummary => {
                            state.is_loading = true;
                            spawn_summary(api, tx, state.query(), RefreshTrigger::User);
                        }
                        Action::FetchLog => spawn_log(api, tx, state.config.log_lines),
                        Action::CycleView => {
                            state.cycle_view();
                            state.is_loading = true;
                            spawn_summary(api, tx, state.query(), RefreshTrigger::User);
                        }
                        Action::LimitUp => {
                            state.bump_limit(i64::from(LIMIT_STEP));
                            state.is_loading = true;
                            spawn_summary(api, tx, state.query(), RefreshTrigger::User);
                        }
                        Action::LimitDown => {
                            state.bump_limit(-i64::from(LIMIT_STEP));
                            state.is_loading = true;
                            spawn_summary(api, tx, state.query(), RefreshTrigger::User);
                        }
                        Action::CopyCustom => copy_path(state, tx, "custom"),
                        Action::CopyShared => copy_path(state, tx, "shared"),
                        Action::PanelUp => state.scroll_panel_up(1, panel_height(terminal)),
                        Action::PanelDown => state.scroll_panel_down(1, panel_height(terminal)),
                        Action::PanelPageUp => state.scroll_panel_up(20, panel_height(terminal)),
                        Action::PanelPageDown => {
                            state.scroll_panel_down(20, panel_height(terminal));
                        }
                        Action::PanelTop => state.scroll_panel_top(),
                        Action::PanelBottom => state.scroll_panel_bottom(panel_height(terminal)),
                        Action::None => {}
                    }
                }
                AppEvent::Tick => state.advance_spinner(),
                AppEvent::PollDue => {
                    // Cancel-before-fetch: even if an eager start raced a
                    // pending timer, only this tick survives.
                    job_poller.disarm();
                    spawn_job_status(api, tx);
                }
                AppEvent::JobStatusResult(Ok(job)) => {
                    let plan = poller::plan_tick(&job);
                    job_poller.on_plan(&plan, tx);
                    match plan {
                        TickPlan::Continue { pid } => {
                            let now = chrono::Utc::now().timestamp() as f64;
                            state.set_status(app::running_label(pid, job.started_at, now));
                            spawn_log(api, tx, state.config.log_lines);
                        }
                        TickPlan::Reconcile { exit_code, .. } => {
                            state.set_status(finished_label(exit_code));
                            #[cfg(feature = "desktop-notify")]
                            if state.config.desktop_notify {
                                skw::notify::job_finished(exit_code);
                            }
                            spawn_reconcile(api, tx, state.config.log_lines, state.query());
                        }
                        TickPlan::NoJob => state.set_status("No job has run"),
                    }
                }
                AppEvent::JobStatusResult(Err(e)) => {
                    // Halt the polling chain; the next user action restarts it
                    job_poller.fail();
                    state.set_error(format!("Job status: {e}"));
                    state.set_status("Polling halted");
                }
                AppEvent::SummaryResult { trigger, result } => {
                    match result {
                        Ok(summary) => state.apply_summary(summary),
                        Err(e) => state.summary_failed(e.to_string()),
                    }
                    if trigger == RefreshTrigger::Poll {
                        job_poller.finish_reconcile();
                        if state.error_message().is_none() {
                            state.set_status("Job finished, summary refreshed");
                        }
                    }
                }
                AppEvent::LogResult(Ok(text)) => {
                    if text.is_empty() {
                        state.set_tail("(no log output yet)");
                    } else {
                        state.set_tail(&text);
                    }
                }
                AppEvent::LogResult(Err(_)) => {
                    // Best-effort tailing: keep whatever the panel showed before
                }
                AppEvent::ReportResult(Ok(pretty)) => {
                    state.set_report(&pretty);
                    state.set_status("Loaded latest report");
                }
                AppEvent::ReportResult(Err(ApiError::NoReport)) => {
                    // Panel content stays as it was
                    state.set_status("No report yet");
                }
                AppEvent::ReportResult(Err(e)) => state.set_error(format!("Report: {e}")),
                AppEvent::InstallResult(Ok(ack)) => match dispatcher::on_ack(ack.status) {
                    AckOutcome::BeginPolling => {
                        state.set_status("Job started");
                        job_poller.begin(tx);
                    }
                    AckOutcome::AlreadyRunning => state.set_status("Job already running"),
                    AckOutcome::Unrecognized => {
                        state.set_status("Install request acknowledged");
                    }
                },
                AppEvent::InstallResult(Err(e)) => state.set_error(format!("Install: {e}")),
                AppEvent::PathsResult(Ok(paths)) => state.paths = paths,
                AppEvent::PathsResult(Err(_)) => {
                    // Paths are a convenience; the panel simply stays empty
                }
                AppEvent::ClipboardResult { label, ok } => {
                    if ok {
                        state.set_status(format!("Copied {label} path"));
                    } else {
                        state.set_error("Clipboard copy failed");
                    }
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn handle_intent(
    intent: Intent,
    state: &mut AppState,
    job_poller: &JobPoller,
    tx: &UnboundedSender<AppEvent>,
    api: &Arc<dyn SkillsApi>,
) {
    match dispatcher::plan(intent, job_poller.phase()) {
        Dispatch::StartJob { refresh } => {
            state.set_status("Starting job...");
            spawn_install(api, tx, state.query(), refresh);
        }
        Dispatch::AlreadyRunning => state.set_status("Job already running"),
        Dispatch::FetchReport => spawn_report(api, tx),
    }
}

fn finished_label(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) if code != 0 => {
            format!("Job finished (exit {code}), refreshing summary...")
        }
        _ => "Job finished, refreshing summary...".to_string(),
    }
}

fn copy_path(state: &mut AppState, tx: &UnboundedSender<AppEvent>, label: &'static str) {
    let value = match label {
        "custom" => state.paths.custom.clone(),
        _ => state.paths.shared.clone(),
    };
    let Some(value) = value else {
        state.set_status(format!("No {label} path known"));
        return;
    };
    let tx = tx.clone();
    tokio::spawn(async move {
        let ok = clipboard::copy(&value).await.is_ok();
        if tx.send(AppEvent::ClipboardResult { label, ok }).is_err() {
            tracing::warn!("clipboard: channel closed");
        }
    });
}

/// Approximate inner height of the log/report panel, for scroll clamping.
fn panel_height(terminal: &Terminal<CrosstermBackend<io::Stdout>>) -> usize {
    terminal
        .size()
        .map(|s| s.height as usize)
        .unwrap_or(24)
        .saturating_sub(7)
}

fn spawn_summary(
    api: &Arc<dyn SkillsApi>,
    tx: &UnboundedSender<AppEvent>,
    query: ViewQuery,
    trigger: RefreshTrigger,
) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_summary(query).await;
        if tx.send(AppEvent::SummaryResult { trigger, result }).is_err() {
            tracing::warn!("summary: channel closed");
        }
    });
}

fn spawn_job_status(api: &Arc<dyn SkillsApi>, tx: &UnboundedSender<AppEvent>) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_job().await;
        if tx.send(AppEvent::JobStatusResult(result)).is_err() {
            tracing::warn!("job status: channel closed");
        }
    });
}

fn spawn_log(api: &Arc<dyn SkillsApi>, tx: &UnboundedSender<AppEvent>, lines: u32) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_log(lines).await;
        if tx.send(AppEvent::LogResult(result)).is_err() {
            tracing::warn!("log: channel closed");
        }
    });
}

fn spawn_report(api: &Arc<dyn SkillsApi>, tx: &UnboundedSender<AppEvent>) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_report().await;
        if tx.send(AppEvent::ReportResult(result)).is_err() {
            tracing::warn!("report: channel closed");
        }
    });
}

fn spawn_install(
    api: &Arc<dyn SkillsApi>,
    tx: &UnboundedSender<AppEvent>,
    query: ViewQuery,
    refresh: bool,
) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.start_install(query, refresh).await;
        if tx.send(AppEvent::InstallResult(result)).is_err() {
            tracing::warn!("install: channel closed");
        }
    });
}

fn spawn_paths(api: &Arc<dyn SkillsApi>, tx: &UnboundedSender<AppEvent>) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_paths().await;
        if tx.send(AppEvent::PathsResult(result)).is_err() {
            tracing::warn!("paths: channel closed");
        }
    });
}

fn spawn_reconcile(
    api: &Arc<dyn SkillsApi>,
    tx: &UnboundedSender<AppEvent>,
    lines: u32,
    query: ViewQuery,
) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        poller::run_reconcile(api.as_ref(), &tx, lines, query).await;
    });
}

fn setup_verbose_logging() -> Result<()> {
    let state_dir = state_dir_or_fallback();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(
        "skw v{} starting with verbose logging",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn state_dir_or_fallback() -> std::path::PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        std::path::PathBuf::from(state).join("skw")
    } else if let Some(home) = std::env::var_os("HOME") {
        std::path::PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("skw")
    } else {
        std::path::PathBuf::from("/tmp/skw")
    }
}
