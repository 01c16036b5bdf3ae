/// Pure rendering of the three picker grids. A grid depends only on the view
/// date, the selected date, the level and the options, so rendering the same
/// state twice always yields the same cells.
use crate::calendar::{
    CalendarDate, days_in_month, first_weekday, last_weekday, leading_offset, trailing_count,
};
use crate::exceptions::PickerError;
use crate::options::PickerOptions;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Which calendar granularity is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLevel {
    #[default]
    Days,
    Months,
    Years,
}

impl ViewLevel {
    /// 0 for days, 1 for months, 2 for years
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Months,
            2 => Self::Years,
            _ => Self::Days,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl FromStr for ViewLevel {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" | "0" => Ok(Self::Days),
            "months" | "month" | "1" => Ok(Self::Months),
            "years" | "year" | "2" => Ok(Self::Years),
            other => Err(PickerError::InvalidOption(format!(
                "viewStart must be days, months or years, got {other:?}"
            ))),
        }
    }
}

/// Accepts the level names and the numeric form `0`, `1` or `2`
impl<'de> Deserialize<'de> for ViewLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
        }

        let level = match Raw::deserialize(deserializer)? {
            Raw::Index(index) => index.to_string().parse(),
            Raw::Name(name) => name.parse(),
        };
        level.map_err(serde::de::Error::custom)
    }
}

/// Which month a days-grid cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    Prev,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Year(i32),
    /// zero-based month
    Month(u32),
    Day { kind: DayKind, day: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub kind: CellKind,
    pub selected: bool,
    pub disabled: bool,
}

impl Cell {
    /// The `data-type` attribute of the list markup
    pub fn data_type(&self) -> &'static str {
        match self.kind {
            CellKind::Year(_) if self.selected => "year selected",
            CellKind::Year(_) => "year",
            CellKind::Month(_) if self.selected => "month selected",
            CellKind::Month(_) => "month",
            CellKind::Day {
                kind: DayKind::Prev,
                ..
            } => "day prev",
            CellKind::Day {
                kind: DayKind::Next,
                ..
            } => "day next",
            CellKind::Day { .. } if self.disabled => "day disabled",
            CellKind::Day { .. } if self.selected => "day selected",
            CellKind::Day { .. } => "day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub level: ViewLevel,
    pub title: String,
    /// Weekday labels, only filled for the days grid
    pub week: Vec<String>,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn columns(&self) -> usize {
        match self.level {
            ViewLevel::Days => 7,
            ViewLevel::Months | ViewLevel::Years => 4,
        }
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.columns())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cells.iter().position(|cell| cell.selected)
    }

    /// List items in the shape a web calendar widget emits, e.g.
    /// `<li class="selected" data-type="day selected">15</li>`
    pub fn to_markup(&self, options: &PickerOptions) -> String {
        let tag = &options.item_tag;
        self.cells
            .iter()
            .map(|cell| {
                let class = if cell.selected {
                    format!(" class=\"{}\"", options.selected_class)
                } else if cell.disabled {
                    format!(" class=\"{}\"", options.disabled_class)
                } else {
                    String::new()
                };
                format!(
                    "<{tag}{class} data-type=\"{}\">{}</{tag}>",
                    cell.data_type(),
                    cell.text
                )
            })
            .collect()
    }

    pub fn week_markup(&self, options: &PickerOptions) -> String {
        let tag = &options.item_tag;
        self.week
            .iter()
            .map(|name| format!("<{tag}>{name}</{tag}>"))
            .collect()
    }
}

pub fn render(
    level: ViewLevel,
    view: &CalendarDate,
    selected: &CalendarDate,
    options: &PickerOptions,
) -> Grid {
    match level {
        ViewLevel::Years => years_grid(view, selected, options),
        ViewLevel::Months => months_grid(view, selected, options),
        ViewLevel::Days => days_grid(view, selected, options),
    }
}

/// Twelve years from five before to six after the view year. The two edge
/// cells only preview the neighbouring windows and cannot be picked.
pub fn years_grid(view: &CalendarDate, selected: &CalendarDate, options: &PickerOptions) -> Grid {
    let suffix = &options.year_suffix;
    let cells = (-5..7)
        .map(|offset| {
            let year = view.year + offset;
            Cell {
                text: year.to_string(),
                kind: CellKind::Year(year),
                selected: year == selected.year,
                disabled: offset == -5 || offset == 6,
            }
        })
        .collect();

    Grid {
        level: ViewLevel::Years,
        title: format!(
            "{}{suffix} - {}{suffix}",
            view.year - 5,
            view.year + 6
        ),
        week: Vec::new(),
        cells,
    }
}

pub fn months_grid(view: &CalendarDate, selected: &CalendarDate, options: &PickerOptions) -> Grid {
    let cells = options
        .months_short
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, name)| Cell {
            text: name.clone(),
            kind: CellKind::Month(i as u32),
            selected: view.year == selected.year && i as u32 == selected.month,
            disabled: false,
        })
        .collect();

    Grid {
        level: ViewLevel::Months,
        title: format!("{}{}", view.year, options.year_suffix),
        week: Vec::new(),
        cells,
    }
}

/// Weekday labels starting from `week_start`. A missing name is blank.
pub fn week_header(options: &PickerOptions) -> Vec<String> {
    let start = (options.week_start % 7) as usize;
    (0..7)
        .map(|offset| {
            options
                .days_min
                .get((start + offset) % 7)
                .cloned()
                .unwrap_or_default()
        })
        .collect()
}

/// Seven columns: the tail of the previous month, the view month, the head of
/// the next month, always 42 cells.
pub fn days_grid(view: &CalendarDate, selected: &CalendarDate, options: &PickerOptions) -> Grid {
    let year = view.year;
    let month = view.month;
    let week_start = options.week_start % 7;
    let month_name = options
        .months_short
        .get(month as usize)
        .cloned()
        .unwrap_or_default();
    let suffix = &options.year_suffix;

    let title = if options.show_month_after_year {
        format!("{year}{suffix} {month_name}")
    } else {
        format!("{month_name} {year}{suffix}")
    };

    let prev = CalendarDate::with_clamped_day(year as i64, month as i64 - 1, 1);
    let prev_len = days_in_month(prev.year, prev.month);
    let length = days_in_month(year, month);
    let leading = leading_offset(first_weekday(year, month), week_start);
    let trailing = trailing_count(last_weekday(year, month), week_start, leading, length);

    let mut cells = Vec::with_capacity((leading + length + trailing) as usize);

    cells.extend((prev_len - leading + 1..=prev_len).map(|day| Cell {
        text: day.to_string(),
        kind: CellKind::Day {
            kind: DayKind::Prev,
            day,
        },
        selected: false,
        disabled: true,
    }));

    cells.extend((1..=length).map(|day| {
        let date = CalendarDate { year, month, day };
        Cell {
            text: day.to_string(),
            kind: CellKind::Day {
                kind: DayKind::Current,
                day,
            },
            selected: year == selected.year && month == selected.month && day == selected.day,
            disabled: options.is_disabled.is_disabled(&date),
        }
    }));

    cells.extend((1..=trailing).map(|day| Cell {
        text: day.to_string(),
        kind: CellKind::Day {
            kind: DayKind::Next,
            day,
        },
        selected: false,
        disabled: true,
    }));

    Grid {
        level: ViewLevel::Days,
        title,
        week: week_header(options),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_years_grid_window() {
        let view = date(2024, 1, 15);
        let grid = years_grid(&view, &view, &PickerOptions::default());
        assert_eq!(grid.cells.len(), 12);
        assert_eq!(grid.cells[0].text, "2019");
        assert_eq!(grid.cells[11].text, "2030");
        assert_eq!(grid.cells.iter().filter(|c| c.disabled).count(), 2);
        assert!(grid.cells[0].disabled && grid.cells[11].disabled);
        assert_eq!(grid.selected_index(), Some(5));
        assert_eq!(grid.title, "2019 - 2030");
    }

    #[test]
    fn test_years_grid_always_twelve_with_two_disabled() {
        let selected = date(2000, 0, 1);
        for year in [-3, 0, 1, 1999, 2024, 9999] {
            let grid = years_grid(&date(year, 5, 10), &selected, &PickerOptions::default());
            assert_eq!(grid.cells.len(), 12);
            assert_eq!(grid.cells.iter().filter(|c| c.disabled).count(), 2);
        }
    }

    #[test]
    fn test_years_title_suffix() {
        let view = date(2024, 1, 15);
        let grid = years_grid(&view, &view, &PickerOptions::default().year_suffix("年"));
        assert_eq!(grid.title, "2019年 - 2030年");
    }

    #[test]
    fn test_months_grid_selection_depends_on_view_year() {
        let selected = date(2024, 1, 15);
        let options = PickerOptions::default();

        let grid = months_grid(&selected, &selected, &options);
        assert_eq!(grid.cells.len(), 12);
        assert_eq!(grid.selected_index(), Some(1));
        assert_eq!(grid.cells[1].text, "Feb");
        assert_eq!(grid.title, "2024");

        let grid = months_grid(&date(2025, 1, 15), &selected, &options);
        assert_eq!(grid.selected_index(), None);
    }

    #[test]
    fn test_days_grid_february_2024() {
        let selected = date(2024, 1, 15);
        let grid = days_grid(&selected, &selected, &PickerOptions::default());

        assert_eq!(grid.title, "Feb 2024");
        assert_eq!(grid.week, vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(grid.cells.len(), 42);

        // 2024-02-01 is a Thursday, so four January days lead
        let leading: Vec<&str> = grid.cells[..4].iter().map(|c| c.text.as_str()).collect();
        assert_eq!(leading, vec!["28", "29", "30", "31"]);
        assert!(grid.cells[..4].iter().all(|c| c.disabled));
        assert_eq!(
            grid.cells[4].kind,
            CellKind::Day {
                kind: DayKind::Current,
                day: 1
            }
        );

        let selected_cell = &grid.cells[grid.selected_index().unwrap()];
        assert_eq!(selected_cell.text, "15");
        assert_eq!(selected_cell.data_type(), "day selected");

        let trailing: Vec<&Cell> = grid
            .cells
            .iter()
            .filter(|c| matches!(c.kind, CellKind::Day { kind: DayKind::Next, .. }))
            .collect();
        assert_eq!(trailing.len(), 9);
    }

    #[test]
    fn test_days_grid_is_always_six_rows() {
        let selected = date(2024, 0, 1);
        for week_start in 0..7 {
            let options = PickerOptions::default().week_start(week_start);
            for year in [2015, 2023, 2024, 2026] {
                for month in 0..12 {
                    let grid = days_grid(&date(year, month, 1), &selected, &options);
                    assert_eq!(grid.cells.len() % 7, 0);
                    assert_eq!(
                        grid.cells.len(),
                        42,
                        "{year}-{month} week_start {week_start}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_days_grid_week_start_monday() {
        let view = date(2024, 1, 15);
        let options = PickerOptions::default().week_start(1);
        let grid = days_grid(&view, &view, &options);
        assert_eq!(grid.week, vec!["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);
        // Thursday is the fourth column when weeks start on Monday
        assert_eq!(grid.cells[3].text, "1");
    }

    #[test]
    fn test_days_grid_full_leading_week() {
        // February 2015 starts on a Sunday
        let view = date(2015, 1, 10);
        let grid = days_grid(&view, &view, &PickerOptions::default());
        assert_eq!(grid.cells[0].text, "25");
        assert_eq!(grid.cells[7].text, "1");
    }

    #[test]
    fn test_days_grid_disabled_predicate() {
        let view = date(2024, 1, 15);
        let options = PickerOptions::default().disabled_when(|d| d.day == 14 || d.day == 15);
        let grid = days_grid(&view, &view, &options);

        let cell_14 = &grid.cells[4 + 13];
        assert_eq!(cell_14.text, "14");
        assert!(cell_14.disabled);
        assert_eq!(cell_14.data_type(), "day disabled");

        let cell_15 = &grid.cells[4 + 14];
        assert!(cell_15.disabled && cell_15.selected);
        assert_eq!(cell_15.data_type(), "day disabled");
    }

    #[test]
    fn test_render_with_short_name_tables() {
        let view = date(2024, 1, 15);
        let mut options = PickerOptions::default().week_start(3);
        options.days_min.truncate(2);
        options.months_short.truncate(1);

        let days = render(ViewLevel::Days, &view, &view, &options);
        assert_eq!(days.week.len(), 7);
        assert_eq!(days.week[4], "Su");
        assert_eq!(days.week[0], "");
        assert_eq!(days.title, " 2024");

        let months = render(ViewLevel::Months, &view, &view, &options);
        assert_eq!(months.cells.len(), 1);
    }

    #[test]
    fn test_days_title_month_after_year() {
        let view = date(2024, 1, 15);
        let options = PickerOptions::default()
            .show_month_after_year(true)
            .year_suffix("年");
        assert_eq!(days_grid(&view, &view, &options).title, "2024年 Feb");
    }

    #[test]
    fn test_render_is_deterministic() {
        let view = date(2024, 1, 15);
        let selected = date(2023, 11, 3);
        let options = PickerOptions::default();
        for level in [ViewLevel::Days, ViewLevel::Months, ViewLevel::Years] {
            assert_eq!(
                render(level, &view, &selected, &options),
                render(level, &view, &selected, &options)
            );
        }
    }

    #[test]
    fn test_markup() {
        let view = date(2024, 1, 15);
        let options = PickerOptions::default();
        let markup = years_grid(&view, &view, &options).to_markup(&options);
        assert!(markup.starts_with(r#"<li class="disabled" data-type="year">2019</li>"#));
        assert!(markup.contains(r#"<li class="selected" data-type="year selected">2024</li>"#));
        assert!(markup.contains(r#"<li data-type="year">2025</li>"#));

        let days = days_grid(&view, &view, &options);
        assert!(
            days.week_markup(&options)
                .starts_with("<li>Su</li><li>Mo</li>")
        );
    }

    #[test]
    fn test_view_level_parse() {
        assert_eq!("Years".parse::<ViewLevel>().unwrap(), ViewLevel::Years);
        assert_eq!("1".parse::<ViewLevel>().unwrap(), ViewLevel::Months);
        assert!("weeks".parse::<ViewLevel>().is_err());
        assert_eq!(ViewLevel::from_index(2), ViewLevel::Years);
        assert_eq!(ViewLevel::from_index(9), ViewLevel::Days);
    }
}
