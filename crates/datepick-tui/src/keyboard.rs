/// Keyboard and mouse input mapping
use crate::actions::{Action, NavKey};
use crate::config::FieldKind;
use crate::stores::{PickerStore, UIStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use datepick_core::Edit;
use ratatui::crossterm;

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    picker_store: &PickerStore,
) -> Option<Action> {
    let ui_state = ui_store.get_state();
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys
    match key_event.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Some(Action::Quit),
        KeyCode::F(1) => return Some(Action::ToggleHelp),
        KeyCode::F(2) => return Some(Action::ToggleLogs),
        KeyCode::Up if ctrl && ui_state.show_logs => return Some(Action::ScrollLogs(1)),
        KeyCode::Down if ctrl && ui_state.show_logs => return Some(Action::ScrollLogs(-1)),
        _ => {}
    }

    if ui_state.show_help {
        return match key_event.code {
            KeyCode::Esc => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    if ui_state.error_message.is_some() && key_event.code == KeyCode::Esc {
        return Some(Action::ClearError);
    }

    if picker_store.modal_open() {
        return match key_event.code {
            KeyCode::Char('p') => Some(Action::PickModal),
            KeyCode::Esc => Some(Action::ClosePicker),
            _ => handle_grid_keys(key_event, picker_store.focused_columns()),
        };
    }

    match key_event.code {
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        _ => {}
    }

    match picker_store.focused_kind()? {
        FieldKind::Input => handle_input_keys(key_event, picker_store),
        FieldKind::Inline => match key_event.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => handle_grid_keys(key_event, picker_store.focused_columns()),
        },
        FieldKind::Modal => match key_event.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::OpenPicker),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Keys on a text input: the popup takes arrows and Enter while it is open,
/// every other key edits the text
fn handle_input_keys(key_event: KeyEvent, picker_store: &PickerStore) -> Option<Action> {
    if picker_store.focused_is_open() {
        if key_event.code == KeyCode::Esc {
            return Some(Action::ClosePicker);
        }
        if let Some(action) = handle_grid_keys(key_event, picker_store.focused_columns()) {
            return Some(action);
        }
    } else if matches!(key_event.code, KeyCode::Enter | KeyCode::Down) {
        return Some(Action::OpenPicker);
    }

    let edit = match key_event.code {
        KeyCode::Char(c) => Edit::Insert(c),
        KeyCode::Backspace => Edit::Backspace,
        KeyCode::Delete => Edit::Delete,
        KeyCode::Left => Edit::Left,
        KeyCode::Right => Edit::Right,
        KeyCode::Home => Edit::Home,
        KeyCode::End => Edit::End,
        _ => return None,
    };
    Some(Action::EditField(edit))
}

/// Keys that drive an open grid of `columns` columns
fn handle_grid_keys(key_event: KeyEvent, columns: usize) -> Option<Action> {
    let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);
    let columns = columns as isize;

    match key_event.code {
        KeyCode::Up if shift => Some(Action::Navigate(NavKey::Up)),
        KeyCode::Left => Some(Action::MoveHighlight(-1)),
        KeyCode::Right => Some(Action::MoveHighlight(1)),
        KeyCode::Up => Some(Action::MoveHighlight(-columns)),
        KeyCode::Down => Some(Action::MoveHighlight(columns)),
        KeyCode::PageUp => Some(Action::Navigate(NavKey::Prev)),
        KeyCode::PageDown => Some(Action::Navigate(NavKey::Next)),
        KeyCode::Enter => Some(Action::ActivateHighlight),
        _ => None,
    }
}

/// Map a left click to an action using the regions of the last frame
pub fn handle_mouse_event(mouse_event: MouseEvent, picker_store: &PickerStore) -> Option<Action> {
    let (column, row) = (mouse_event.column, mouse_event.row);

    if let Some(region) = picker_store.hit_test(column, row) {
        return Some(Action::ClickPicker {
            field: region.field,
            hit: region.hit,
        });
    }
    if picker_store.modal_open() {
        return None;
    }
    match picker_store.field_at(column, row) {
        Some(index) => Some(Action::ClickField(index)),
        None => Some(Action::OutsideClick),
    }
}
