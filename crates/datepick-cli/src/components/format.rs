use datepick_core::{PickerError, PickerOptions, format_date, parse_date, parse_format};
use std::error::Error;

/// Date reformatting. Reading is lenient: missing or unreadable
/// parts fall back to today's value
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct FormatArgs {
    /// The date text to read
    pub text: String,

    /// Pattern the text is written in. Defaults to
    /// DATEPICK_DATE_FORMAT
    #[arg(long, short)]
    pub from: Option<String>,

    /// Pattern to write. Defaults to --from
    #[arg(long, short)]
    pub to: Option<String>,
}

impl FormatArgs {
    pub fn reformat(&self) -> Result<String, PickerError> {
        let from = self
            .from
            .clone()
            .unwrap_or_else(|| PickerOptions::from_env().date_format);
        let to = self.to.clone().unwrap_or_else(|| from.clone());

        let date = parse_date(&self.text, &parse_format(&from)?);
        Ok(format_date(&date, &parse_format(&to)?))
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.reformat()?);
        Ok(())
    }
}
