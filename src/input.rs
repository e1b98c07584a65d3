use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    MoveUp,
    MoveDown,
    Sync,
    ForceRefresh,
    ViewReport,
    RefreshSummary,
    FetchLog,
    CycleView,
    LimitUp,
    LimitDown,
    CopyCustom,
    CopyShared,
    PanelUp,
    PanelDown,
    PanelPageUp,
    PanelPageDown,
    PanelTop,
    PanelBottom,
    None,
}

/// UI state needed to interpret a key press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    pub has_error: bool,
    pub is_loading: bool,
}

pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else {
                Action::Quit
            }
        }
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Char('s') => Action::Sync,
        KeyCode::Char('f') => Action::ForceRefresh,
        KeyCode::Char('p') => Action::ViewReport,
        KeyCode::Char('r') if !ctx.is_loading => Action::RefreshSummary,
        KeyCode::Char('l') => Action::FetchLog,
        KeyCode::Char('v') => Action::CycleView,
        KeyCode::Char('+' | '=') => Action::LimitUp,
        KeyCode::Char('-' | '_') => Action::LimitDown,
        KeyCode::Char('c') => Action::CopyCustom,
        KeyCode::Char('C') => Action::CopyShared,
        KeyCode::Char('K') => Action::PanelUp,
        KeyCode::Char('J') => Action::PanelDown,
        KeyCode::PageUp => Action::PanelPageUp,
        KeyCode::PageDown => Action::PanelPageDown,
        KeyCode::Char('g') => Action::PanelTop,
        KeyCode::Char('G') => Action::PanelBottom,
        _ => Action::None,
    }
}
