mod components;

use clap::{Parser, Subcommand};
use components::{format::FormatArgs, grid::GridArgs, tui::TuiArgs};
use dotenv::dotenv;
use log::error;

/// Calendar date picker: an interactive form in the terminal, plus one-shot
/// grid rendering and date reformatting
#[derive(Parser)]
#[command(name = "datepick", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the terminal form
    Tui(TuiArgs),
    /// Print the grid a picker would show for a date
    Grid(GridArgs),
    /// Read a date leniently and write it in another format
    Format(FormatArgs),
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        // the TUI installs its own in-memory logger
        Command::Tui(args) => args.run().await,
        Command::Grid(args) => {
            env_logger::init();
            args.run()
        }
        Command::Format(args) => {
            env_logger::init();
            args.run()
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
