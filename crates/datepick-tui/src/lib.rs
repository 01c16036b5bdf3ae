use std::io;
use std::path::PathBuf;

// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod keyboard;
mod logger;
mod stores;
mod ui;

pub mod config;
mod tui;

pub use app::App;
pub use config::{FieldConfig, FieldKind, FormConfig};

/// Main entry point for the TUI application. `config` is a YAML form
/// description; without one the built-in booking form is shown.
pub async fn tui_main(config: Option<PathBuf>) -> io::Result<()> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    // A broken form is reported on the normal screen
    let form = match config {
        Some(path) => FormConfig::from_file(&path).map_err(io::Error::other)?,
        None => FormConfig::default(),
    };

    let mut terminal = tui::init()?;

    // Create the application and action receiver (this initializes the logger)
    let (mut app, action_receiver) = match App::new(form) {
        Ok(app) => app,
        Err(e) => {
            let _ = tui::restore();
            eprintln!("Failed to initialize application: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    let result = app.run(&mut terminal, action_receiver).await;

    // Always restore terminal
    let _ = tui::restore();

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
