/// UIStore manages UI-specific state (help and log pane visibility, errors, exit)
use crate::actions::Action;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct UIState {
    /// Whether help overlay is visible
    pub show_help: bool,

    /// Whether the application log pane is visible
    pub show_logs: bool,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Last known terminal size
    pub size: (u16, u16),

    /// Whether the application should exit
    pub should_exit: bool,
}

/// Store that holds UI-related state
#[derive(Clone, Default)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
}

impl UIStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        match action {
            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::ToggleLogs => {
                state.show_logs = !state.show_logs;
            }

            Action::ShowError(message) => {
                state.error_message = Some(message.clone());
            }

            Action::ClearError => {
                state.error_message = None;
            }

            Action::Resize(width, height) => {
                state.size = (*width, *height);
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .should_exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let store = UIStore::new();
        let state = store.get_state();
        assert!(!state.show_help);
        assert!(!state.show_logs);
        assert!(!state.should_exit);
    }

    #[test]
    fn test_toggles() {
        let store = UIStore::new();

        store.reduce(&Action::ToggleHelp);
        assert!(store.get_state().show_help);
        store.reduce(&Action::ToggleHelp);
        assert!(!store.get_state().show_help);

        store.reduce(&Action::ToggleLogs);
        assert!(store.get_state().show_logs);
    }

    #[test]
    fn test_errors() {
        let store = UIStore::new();
        store.reduce(&Action::ShowError("bad form".to_string()));
        assert_eq!(store.get_state().error_message.as_deref(), Some("bad form"));
        store.reduce(&Action::ClearError);
        assert!(store.get_state().error_message.is_none());
    }

    #[test]
    fn test_quit() {
        let store = UIStore::new();
        store.reduce(&Action::Quit);
        assert!(store.should_exit());
    }
}
