use crate::projector::{self, SkillRow};

// Polling
pub const POLL_INTERVAL_MS: u64 = 3000;

// Query controls
pub const DEFAULT_LIMIT: u32 = 80;
pub const LIMIT_STEP: u32 = 10;
pub const MAX_LIMIT: u32 = 500;

// Log tailing
pub const DEFAULT_LOG_LINES: u32 = 120;
pub const PANEL_MAX_LINES: usize = 500;

// UI constants
pub const SPINNER_FRAME_COUNT: usize = 10;
pub const NARROW_WIDTH_THRESHOLD: u16 = 72;

/// Server-side ranking views, as accepted by `GET /api/summary?view=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    AllTime,
    Trending,
    Hot,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::AllTime => "all-time",
            View::Trending => "trending",
            View::Hot => "hot",
        }
    }

    pub fn next(self) -> View {
        match self {
            View::AllTime => View::Trending,
            View::Trending => View::Hot,
            View::Hot => View::AllTime,
        }
    }
}

/// Query parameters read fresh from UI state at the moment of each fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewQuery {
    pub view: View,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Installed,
    Missing,
}

impl SkillStatus {
    /// Fixed badge label per value.
    pub fn label(self) -> &'static str {
        match self {
            SkillStatus::Installed => "installed",
            SkillStatus::Missing => "missing",
        }
    }
}

/// One entry of the server-ranked skills list. Order is server-assigned and
/// carries rank semantics; the client never re-sorts.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub installs: u64,
    #[serde(default)]
    pub top_source: String,
    pub status: SkillStatus,
}

#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    #[serde(default)]
    pub installed_total: u64,
    #[serde(default)]
    pub installed_top: u64,
    #[serde(default)]
    pub missing_top: u64,
}

/// The inventory snapshot. Replaced wholesale on each successful fetch,
/// never patched in place.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Summary {
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub counts: Counts,
}

/// Remote job state for one poll tick. `pid` present with `running=false`
/// means a job finished since we last looked.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub running: bool,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub started_at: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStatus {
    Started,
    Running,
    #[serde(other)]
    Unknown,
}

/// Server answer to `POST /api/install`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct InstallAck {
    pub status: InstallStatus,
}

/// Skills directories, fetched once per startup for the copy affordance.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PathInfo {
    #[serde(default)]
    pub custom: Option<String>,
    #[serde(default)]
    pub shared: Option<String>,
}

/// Which content currently owns the shared log/report surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Tail,
    Report,
}

/// Immutable configuration set at startup.
pub struct AppConfig {
    pub base_url: String,
    pub log_lines: u32,
    pub desktop_notify: bool,
}

pub struct AppState {
    pub config: AppConfig,

    // Query controls (mutable, read fresh at each fetch)
    pub view: View,
    pub limit: u32,

    // Summary cache: last good snapshot plus its projection
    pub summary: Option<Summary>,
    pub rows: Vec<SkillRow>,
    pub cursor: usize,

    // Shared log/report surface (mutually exclusive contents)
    pub panel_kind: PanelKind,
    pub panel_lines: Vec<String>,
    pub panel_scroll: usize,
    pub panel_follow: bool,

    // One status label surface for the job lifecycle
    pub status: String,
    pub error: Option<String>,

    pub paths: PathInfo,

    // Transient UI
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, view: View, limit: u32) -> Self {
        Self {
            config,
            view,
            limit: limit.clamp(1, MAX_LIMIT),
            summary: None,
            rows: Vec::new(),
            cursor: 0,
            panel_kind: PanelKind::Tail,
            panel_lines: Vec::new(),
            panel_scroll: 0,
            panel_follow: true,
            status: String::new(),
            error: None,
            paths: PathInfo::default(),
            is_loading: false,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// The query as it stands right now. Never cached between fetches.
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            view: self.view,
            limit: self.limit,
        }
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn bump_limit(&mut self, delta: i64) {
        let next = i64::from(self.limit).saturating_add(delta);
        self.limit = next.clamp(1, i64::from(MAX_LIMIT)) as u32;
    }

    /// Replace the snapshot wholesale and rebuild the row projection.
    pub fn apply_summary(&mut self, summary: Summary) {
        self.rows = projector::project(&summary);
        self.summary = Some(summary);
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
        self.is_loading = false;
        self.error = None;
    }

    /// A failed refresh leaves the previous snapshot untouched; the UI keeps
    /// showing it alongside the error message.
    pub fn summary_failed(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if !self.rows.is_empty() && self.cursor < self.rows.len() - 1 {
            self.cursor += 1;
        }
    }

    pub fn set_status(&mut self, label: impl Into<String>) {
        self.status = label.into();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- Shared log/report surface ---

    /// Show fresh tail text. Retains at most `PANEL_MAX_LINES` lines.
    pub fn set_tail(&mut self, text: &str) {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.len() > PANEL_MAX_LINES {
            lines.drain(..lines.len() - PANEL_MAX_LINES);
        }
        self.panel_kind = PanelKind::Tail;
        self.panel_lines = lines;
        if !self.panel_follow {
            let last = self.panel_lines.len().saturating_sub(1);
            self.panel_scroll = self.panel_scroll.min(last);
        }
    }

    /// Substitute the pretty-printed report for the log view.
    pub fn set_report(&mut self, text: &str) {
        self.panel_kind = PanelKind::Report;
        self.panel_lines = text.lines().map(str::to_string).collect();
        self.panel_scroll = 0;
        self.panel_follow = false;
    }

    /// Effective scroll offset for a panel of `visible_height` rows.
    pub fn panel_offset(&self, visible_height: usize) -> usize {
        let max = self.panel_lines.len().saturating_sub(visible_height);
        if self.panel_follow {
            max
        } else {
            self.panel_scroll.min(max)
        }
    }

    pub fn scroll_panel_up(&mut self, amount: usize, visible_height: usize) {
        self.panel_scroll = self.panel_offset(visible_height).saturating_sub(amount);
        self.panel_follow = false;
    }

    pub fn scroll_panel_down(&mut self, amount: usize, visible_height: usize) {
        let max = self.panel_lines.len().saturating_sub(visible_height);
        self.panel_scroll = (self.panel_offset(visible_height) + amount).min(max);
        if self.panel_scroll == max && self.panel_kind == PanelKind::Tail {
            // Re-stick to the tail once the user scrolls back to the bottom
            self.panel_follow = true;
        }
    }

    pub fn scroll_panel_top(&mut self) {
        self.panel_scroll = 0;
        self.panel_follow = false;
    }

    pub fn scroll_panel_bottom(&mut self, visible_height: usize) {
        self.panel_scroll = self.panel_lines.len().saturating_sub(visible_height);
        self.panel_follow = self.panel_kind == PanelKind::Tail;
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAME_COUNT;
    }
}

/// Status label for a live job, e.g. `Job running (PID 4711, 1m 12s)`.
pub fn running_label(pid: u32, started_at: Option<f64>, now_epoch: f64) -> String {
    match started_at {
        Some(start) if now_epoch > start => {
            format!(
                "Job running (PID {pid}, {})",
                format_elapsed((now_epoch - start) as u64)
            )
        }
        _ => format!("Job running (PID {pid})"),
    }
}

pub fn format_elapsed(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn skill(name: &str, status: SkillStatus) -> SkillRecord {
        SkillRecord {
            id: name.to_string(),
            name: name.to_string(),
            installs: 7,
            top_source: "github.com/example/repo".to_string(),
            status,
        }
    }

    fn summary_of(names: &[&str]) -> Summary {
        Summary {
            skills: names
                .iter()
                .map(|n| skill(n, SkillStatus::Installed))
                .collect(),
            counts: Counts::default(),
        }
    }

    fn make_state() -> AppState {
        AppState::new(
            AppConfig {
                base_url: "http://127.0.0.1:5199".to_string(),
                log_lines: DEFAULT_LOG_LINES,
                desktop_notify: false,
            },
            View::AllTime,
            DEFAULT_LIMIT,
        )
    }

    // --- Query controls ---

    #[test]
    fn query_reads_current_values() {
        let mut state = make_state();
        state.view = View::Hot;
        state.limit = 25;
        assert_eq!(
            state.query(),
            ViewQuery {
                view: View::Hot,
                limit: 25
            }
        );
    }

    #[test]
    fn cycle_view_is_a_closed_loop() {
        let mut state = make_state();
        assert_eq!(state.view, View::AllTime);
        state.cycle_view();
        assert_eq!(state.view, View::Trending);
        state.cycle_view();
        assert_eq!(state.view, View::Hot);
        state.cycle_view();
        assert_eq!(state.view, View::AllTime);
    }

    #[test]
    fn view_wire_names() {
        assert_eq!(View::AllTime.as_str(), "all-time");
        assert_eq!(View::Trending.as_str(), "trending");
        assert_eq!(View::Hot.as_str(), "hot");
    }

    #[test]
    fn bump_limit_never_reaches_zero() {
        let mut state = make_state();
        state.limit = 5;
        state.bump_limit(-100);
        assert_eq!(state.limit, 1);
    }

    #[test]
    fn bump_limit_caps_at_max() {
        let mut state = make_state();
        state.bump_limit(i64::from(MAX_LIMIT) * 2);
        assert_eq!(state.limit, MAX_LIMIT);
    }

    // --- Summary cache ---

    #[test]
    fn apply_summary_replaces_wholesale() {
        let mut state = make_state();
        state.apply_summary(summary_of(&["a", "b", "c"]));
        assert_eq!(state.rows.len(), 3);

        state.apply_summary(summary_of(&["x"]));
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.rows[0].name, "x");
        assert_eq!(state.summary.as_ref().unwrap().skills.len(), 1);
    }

    #[test]
    fn apply_summary_clears_error_and_loading() {
        let mut state = make_state();
        state.is_loading = true;
        state.set_error("boom");
        state.apply_summary(summary_of(&["a"]));
        assert!(!state.is_loading);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut state = make_state();
        state.apply_summary(summary_of(&["a", "b"]));
        state.summary_failed("Failed to fetch skills list".to_string());
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.summary.as_ref().unwrap().skills.len(), 2);
        assert_eq!(state.error_message(), Some("Failed to fetch skills list"));
    }

    #[test]
    fn cursor_clamped_when_rows_shrink() {
        let mut state = make_state();
        state.apply_summary(summary_of(&["a", "b", "c"]));
        state.cursor = 2;
        state.apply_summary(summary_of(&["a"]));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn cursor_bounds() {
        let mut state = make_state();
        state.move_cursor_up();
        assert_eq!(state.cursor, 0);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);

        state.apply_summary(summary_of(&["a", "b"]));
        state.move_cursor_down();
        assert_eq!(state.cursor, 1);
        state.move_cursor_down();
        assert_eq!(state.cursor, 1);
        state.move_cursor_up();
        assert_eq!(state.cursor, 0);
    }

    // --- Log/report surface ---

    #[test]
    fn set_tail_clips_to_retention_cap() {
        let mut state = make_state();
        let text = (0..PANEL_MAX_LINES + 50)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        state.set_tail(&text);
        assert_eq!(state.panel_lines.len(), PANEL_MAX_LINES);
        assert_eq!(state.panel_lines[0], "line 50");
        assert_eq!(state.panel_kind, PanelKind::Tail);
    }

    #[test]
    fn set_report_takes_over_the_surface() {
        let mut state = make_state();
        state.set_tail("old tail");
        state.set_report("{\n  \"installed\": []\n}");
        assert_eq!(state.panel_kind, PanelKind::Report);
        assert_eq!(state.panel_lines.len(), 3);
        assert_eq!(state.panel_offset(10), 0);
    }

    #[test]
    fn tail_follows_bottom_by_default() {
        let mut state = make_state();
        let text = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        state.set_tail(&text);
        assert_eq!(state.panel_offset(10), 30);
    }

    #[test]
    fn scrolling_up_unsticks_scrolling_back_resticks() {
        let mut state = make_state();
        let text = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        state.set_tail(&text);

        state.scroll_panel_up(5, 10);
        assert!(!state.panel_follow);
        assert_eq!(state.panel_offset(10), 25);

        state.scroll_panel_down(5, 10);
        assert!(state.panel_follow);
        assert_eq!(state.panel_offset(10), 30);
    }

    #[test]
    fn panel_top_and_bottom_jumps() {
        let mut state = make_state();
        let text = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        state.set_tail(&text);
        state.scroll_panel_top();
        assert_eq!(state.panel_offset(10), 0);
        state.scroll_panel_bottom(10);
        assert_eq!(state.panel_offset(10), 30);
        assert!(state.panel_follow);
    }

    #[test]
    fn report_does_not_restick_on_bottom() {
        let mut state = make_state();
        let text = (0..40).map(|i| format!("{i}")).collect::<Vec<_>>().join("\n");
        state.set_report(&text);
        state.scroll_panel_down(100, 10);
        assert!(!state.panel_follow);
        assert_eq!(state.panel_offset(10), 30);
    }

    // --- Labels ---

    #[test]
    fn running_label_with_elapsed() {
        assert_eq!(
            running_label(4711, Some(1000.0), 1072.0),
            "Job running (PID 4711, 1m 12s)"
        );
    }

    #[test]
    fn running_label_without_start_time() {
        assert_eq!(running_label(42, None, 1000.0), "Job running (PID 42)");
    }

    #[test]
    fn elapsed_formats() {
        assert_eq!(format_elapsed(9), "9s");
        assert_eq!(format_elapsed(75), "1m 15s");
        assert_eq!(format_elapsed(3700), "1h 01m");
    }

    #[test]
    fn spinner_wraps() {
        let mut state = make_state();
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner();
        }
        assert_eq!(state.spinner_frame, 0);
    }

    #[test]
    fn badge_labels_are_fixed() {
        assert_eq!(SkillStatus::Installed.label(), "installed");
        assert_eq!(SkillStatus::Missing.label(), "missing");
    }
}
