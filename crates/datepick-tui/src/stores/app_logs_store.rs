/// AppLogsStore mirrors the in-memory log buffer for the log pane
use crate::actions::Action;
use crate::logger::LogBuffer;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct AppLogsState {
    /// Formatted log lines
    pub logs: Vec<String>,

    /// Lines scrolled up from the most recent
    pub scroll_offset: usize,
}

pub struct AppLogsStore {
    state: Arc<RwLock<AppLogsState>>,
    log_buffer: LogBuffer,
}

impl AppLogsStore {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppLogsState::default())),
            log_buffer,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> AppLogsState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Refresh logs from the buffer and handle scroll actions
    pub fn dispatch(&self, action: &Action) {
        self.refresh_logs();

        match action {
            Action::ScrollLogs(amount) if *amount > 0 => self.scroll_up(*amount as usize),
            Action::ScrollLogs(amount) => self.scroll_down(amount.unsigned_abs()),
            Action::ToggleLogs => self.scroll_to_bottom(),
            _ => {}
        }
    }

    fn refresh_logs(&self) {
        let logs = self.log_buffer.get_logs();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.logs = logs;
    }

    fn scroll_down(&self, amount: usize) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.scroll_offset = state.scroll_offset.saturating_sub(amount);
    }

    fn scroll_up(&self, amount: usize) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let max = state.logs.len().saturating_sub(1);
        state.scroll_offset = state.scroll_offset.saturating_add(amount).min(max);
    }

    fn scroll_to_bottom(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.scroll_offset = 0;
    }
}
