use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::service::ConsoleCommand;

use super::app::{AppState, InspectField, Tab};

/// Single dispatch point for every control in the console. Returns true when
/// the operator confirmed quitting.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::Sender<ConsoleCommand>,
) -> bool {
    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => app.confirm_quit = true,
            KeyCode::Char('l') => match app.active_tab {
                Tab::Config => dispatch(app.request_config_load(), cmd_tx),
                Tab::Logs => dispatch(app.submit_load_logs(), cmd_tx),
                Tab::Inspect => {}
            },
            KeyCode::Char('r') => {
                if app.active_tab == Tab::Config {
                    dispatch(app.submit_reload(), cmd_tx);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Tab => dispatch(app.next_tab(), cmd_tx),
        KeyCode::BackTab => dispatch(app.prev_tab(), cmd_tx),
        KeyCode::Up => app.focus_prev(),
        KeyCode::Down => app.focus_next(),
        KeyCode::Esc => app.clear_status(),
        KeyCode::Enter => match app.active_tab {
            Tab::Inspect => dispatch(app.submit_inspect(), cmd_tx),
            Tab::Config => dispatch(app.submit_save(), cmd_tx),
            Tab::Logs => dispatch(app.submit_load_logs(), cmd_tx),
        },
        KeyCode::Left | KeyCode::Right
            if app.active_tab == Tab::Inspect
                && app.inspect.focus == InspectField::DetectionType =>
        {
            app.toggle_detection_type()
        }
        KeyCode::Char(c) => app.input_char(c),
        KeyCode::Backspace => app.backspace(),
        _ => {}
    }
    false
}

fn dispatch(command: Option<ConsoleCommand>, cmd_tx: &mpsc::Sender<ConsoleCommand>) {
    if let Some(command) = command {
        let _ = cmd_tx.try_send(command);
    }
}
