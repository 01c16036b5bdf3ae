/// Main application struct and event loop
use crate::actions::Action;
use crate::config::FormConfig;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::keyboard;
use crate::stores::{AppLogsStore, PickerStore, UIStore};
use crate::ui::render_layout;
use ratatui::crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use std::io;
use std::time::Duration;

/// The main application structure following flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Store for the form and its pickers
    picker_store: PickerStore,

    /// Store for UI state
    ui_store: UIStore,

    /// Store for application logs
    app_logs_store: AppLogsStore,
}

impl App {
    pub fn new(form: FormConfig) -> Result<(Self, ActionReceiver), Box<dyn std::error::Error>> {
        let (dispatcher, rx) = Dispatcher::new();
        let action_receiver = ActionReceiver::new(rx);

        let log_buffer = crate::logger::init_memory_logger()?;

        let picker_store = PickerStore::from_config(&form)?;
        let ui_store = UIStore::new();
        let app_logs_store = AppLogsStore::new(log_buffer);

        Ok((
            Self {
                dispatcher,
                picker_store,
                ui_store,
                app_logs_store,
            },
            action_receiver,
        ))
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("datepick TUI started");

        // Place any popup against the real terminal size before the first key
        let size = terminal.size()?;
        self.dispatcher
            .dispatch(Action::Resize(size.width, size.height));

        loop {
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.picker_store,
                    &self.ui_store,
                    &self.app_logs_store,
                );
            })?;

            if self.ui_store.should_exit() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        let action = match event::read()? {
                            // Only process key press events (not release)
                            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                                keyboard::handle_key_event(
                                    key_event,
                                    &self.ui_store,
                                    &self.picker_store,
                                )
                            }
                            Event::Mouse(mouse_event)
                                if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) =>
                            {
                                keyboard::handle_mouse_event(mouse_event, &self.picker_store)
                            }
                            Event::Resize(width, height) => Some(Action::Resize(width, height)),
                            _ => None,
                        };
                        if let Some(action) = action {
                            self.dispatcher.dispatch(action);
                        }
                    }
                }

                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        log::info!("datepick TUI stopped");
        Ok(())
    }

    /// Handle an action by routing it to the stores
    fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);

        self.picker_store.reduce(action);
        self.ui_store.reduce(action);
        self.app_logs_store.dispatch(action);

        if let Some(message) = self.picker_store.take_error() {
            self.dispatcher.dispatch(Action::ShowError(message));
        }
    }
}
