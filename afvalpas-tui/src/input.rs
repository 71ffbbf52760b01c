use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.resolve_waste_pass`(...) for the current inputs
    Resolve,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, F, Left, Tab, Up};

    // Global shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == F(2) {
        app.toggle_screen();
        return Action::None;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Lookup => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.focused_input().push(character);
                }
            }
            Backspace => {
                app.focused_input().pop();
            }
            Tab | BackTab | Up | Down => {
                app.toggle_focus();
            }
            Enter => {
                action = Action::Resolve;
            }
            Esc => {
                app.focused_input().clear();
            }
            _ => {}
        },

        Screen::Districts => match key.code {
            Up | Char('k') => {
                if app.district_list_index > 0 {
                    app.district_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.district_list_index + 1 < app.districts.len() {
                    app.district_list_index += 1;
                }
            }
            Left | Esc | Char('b' | 'd') => {
                app.screen = Screen::Lookup;
            }
            Char('q') => {
                action = Action::Quit;
            }
            _ => {}
        },
    }
    action
}
