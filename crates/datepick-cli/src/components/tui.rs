use std::error::Error;
use std::path::PathBuf;

/// Interactive form with text, inline and modal date fields
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct TuiArgs {
    /// YAML file describing the form. The built-in booking
    /// form is shown when omitted
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl TuiArgs {
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        datepick_tui::tui_main(self.config).await?;
        Ok(())
    }
}
