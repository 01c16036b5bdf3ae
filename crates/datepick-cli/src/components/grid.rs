use datepick_core::{
    CalendarDate, Grid, PickerError, PickerOptions, ViewLevel, grid, parse_date, parse_format,
};
use std::error::Error;

/// Grid preview. Prints the cells a picker would show for a date,
/// as text or in the list markup of the web widget
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct GridArgs {
    /// The selected date, written in --format. Today if
    /// not provided
    #[arg(long, short)]
    pub date: Option<String>,

    /// Date format pattern. Defaults to DATEPICK_DATE_FORMAT
    #[arg(long, short)]
    pub format: Option<String>,

    /// First column of the days grid, 0 for Sunday
    #[arg(long, short)]
    pub week_start: Option<u32>,

    /// Grid to print: days, months or years
    #[arg(long, short)]
    pub view: Option<ViewLevel>,

    /// Print `<li>` markup instead of text
    #[arg(long, short)]
    pub markup: bool,
}

impl GridArgs {
    fn options(&self) -> PickerOptions {
        let mut options = PickerOptions::from_env();
        if let Some(pattern) = &self.format {
            options = options.date_format(pattern.clone());
        }
        if let Some(week_start) = self.week_start {
            options = options.week_start(week_start);
        }
        if let Some(view) = self.view {
            options = options.view_start(view);
        }
        options
    }

    pub fn render(&self) -> Result<String, PickerError> {
        let options = self.options();
        options.validate()?;
        let format = parse_format(&options.date_format)?;

        let date = match &self.date {
            Some(text) => parse_date(text, &format),
            None => CalendarDate::today(),
        };
        log::debug!("Rendering {} grid for {}", options.view_start.name(), date);

        let grid = grid::render(options.view_start, &date, &date, &options);
        if self.markup {
            Ok(format!(
                "{}\n{}",
                grid.week_markup(&options),
                grid.to_markup(&options)
            ))
        } else {
            Ok(text_grid(&grid))
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.render()?);
        Ok(())
    }
}

/// Plain text layout: selected cells in brackets, disabled ones in parentheses
fn text_grid(grid: &Grid) -> String {
    let width = grid
        .cells
        .iter()
        .map(|cell| cell.text.chars().count())
        .chain(grid.week.iter().map(|name| name.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![grid.title.clone()];
    if !grid.week.is_empty() {
        lines.push(
            grid.week
                .iter()
                .map(|name| format!(" {:>width$} ", name))
                .collect(),
        );
    }
    for row in grid.rows() {
        lines.push(
            row.iter()
                .map(|cell| {
                    let (open, close) = if cell.selected {
                        ('[', ']')
                    } else if cell.disabled {
                        ('(', ')')
                    } else {
                        (' ', ' ')
                    };
                    format!("{open}{:>width$}{close}", cell.text)
                })
                .collect::<String>()
                .trim_end()
                .to_string(),
        );
    }
    lines.join("\n")
}
