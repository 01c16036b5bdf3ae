/// Picker configuration. Every key is optional when read from a file and uses
/// the camelCase names used by web date pickers (`dateFormat`, `weekStart`, ...).
use crate::calendar::CalendarDate;
use crate::config;
use crate::exceptions::PickerError;
use crate::get_datepick_setting;
use crate::grid::ViewLevel;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Host supplied policy deciding which dates cannot be picked
#[derive(Clone)]
pub struct DisabledPredicate(Arc<dyn Fn(&CalendarDate) -> bool + Send + Sync>);

impl DisabledPredicate {
    pub fn new(f: impl Fn(&CalendarDate) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        (self.0)(date)
    }
}

impl Default for DisabledPredicate {
    fn default() -> Self {
        Self::never()
    }
}

impl fmt::Debug for DisabledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisabledPredicate")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerOptions {
    /// Initial value, read instead of the host field when set
    pub date: Option<String>,
    pub date_format: String,
    /// 0 for Sunday through 6 for Saturday
    pub week_start: u32,
    pub view_start: ViewLevel,
    pub inline: bool,
    pub auto_close: bool,
    pub container: Option<String>,
    pub trigger: Option<String>,
    pub z_index: i32,
    pub days: Vec<String>,
    pub days_short: Vec<String>,
    pub days_min: Vec<String>,
    pub months: Vec<String>,
    pub months_short: Vec<String>,
    pub year_suffix: String,
    pub show_month_after_year: bool,
    pub item_tag: String,
    pub selected_class: String,
    pub disabled_class: String,
    #[serde(skip)]
    pub is_disabled: DisabledPredicate,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            date: None,
            date_format: config::DATEPICK_DATE_FORMAT.to_string(),
            week_start: config::DATEPICK_WEEK_START as u32,
            view_start: config::DATEPICK_VIEW_START.parse().unwrap_or_default(),
            inline: false,
            auto_close: config::DATEPICK_AUTO_CLOSE == "true",
            container: None,
            trigger: None,
            z_index: config::DATEPICK_Z_INDEX as i32,
            days: names(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            days_short: names(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            days_min: names(&["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            months: names(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            months_short: names(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            year_suffix: String::new(),
            show_month_after_year: false,
            item_tag: "li".to_string(),
            selected_class: "selected".to_string(),
            disabled_class: "disabled".to_string(),
            is_disabled: DisabledPredicate::never(),
        }
    }
}

impl PickerOptions {
    /// Defaults with any `DATEPICK_*` environment overrides applied
    pub fn from_env() -> Self {
        let view_start = get_datepick_setting!(DATEPICK_VIEW_START);
        Self {
            date_format: get_datepick_setting!(DATEPICK_DATE_FORMAT),
            week_start: get_datepick_setting!(DATEPICK_WEEK_START, usize) as u32,
            view_start: view_start.parse().unwrap_or_else(|e: PickerError| {
                warn!("{}. Using default", e);
                ViewLevel::default()
            }),
            z_index: get_datepick_setting!(DATEPICK_Z_INDEX, usize) as i32,
            auto_close: get_datepick_setting!(DATEPICK_AUTO_CLOSE, bool),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, PickerError> {
        serde_norway::from_str(s).map_err(|e| PickerError::Config(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, PickerError> {
        serde_json::from_str(s).map_err(|e| PickerError::Config(e.to_string()))
    }

    /// Read options from a `.json`, `.yml` or `.yaml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PickerError::Config(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yml") | Some("yaml") => Self::from_yaml_str(&contents),
            _ => Err(PickerError::Config(format!(
                "{}: expected a .json, .yml or .yaml file",
                path.display()
            ))),
        }
    }

    /// Check the values serde cannot: weekday range and name table sizes
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.week_start > 6 {
            return Err(PickerError::InvalidOption(format!(
                "weekStart must be between 0 and 6, got {}",
                self.week_start
            )));
        }
        for (name, table, expected) in [
            ("days", &self.days, 7),
            ("daysShort", &self.days_short, 7),
            ("daysMin", &self.days_min, 7),
            ("months", &self.months, 12),
            ("monthsShort", &self.months_short, 12),
        ] {
            if table.len() < expected {
                return Err(PickerError::InvalidOption(format!(
                    "{} needs {} names, got {}",
                    name,
                    expected,
                    table.len()
                )));
            }
        }
        Ok(())
    }

    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn week_start(mut self, week_start: u32) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn view_start(mut self, level: ViewLevel) -> Self {
        self.view_start = level;
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn show_month_after_year(mut self, show: bool) -> Self {
        self.show_month_after_year = show;
        self
    }

    pub fn year_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.year_suffix = suffix.into();
        self
    }

    pub fn disabled_when(
        mut self,
        f: impl Fn(&CalendarDate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_disabled = DisabledPredicate::new(f);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = PickerOptions::default();
        assert_eq!(options.date_format, "mm/dd/yyyy");
        assert_eq!(options.week_start, 0);
        assert_eq!(options.view_start, ViewLevel::Days);
        assert!(options.auto_close);
        assert_eq!(options.z_index, 1);
        assert!(options.validate().is_ok());
        assert!(
            !options
                .is_disabled
                .is_disabled(&CalendarDate::new(2024, 0, 1).unwrap())
        );
    }

    #[test]
    fn test_yaml_uses_camel_case_and_defaults() {
        let options = PickerOptions::from_yaml_str(
            "dateFormat: yyyy-mm-dd\nweekStart: 1\nviewStart: years\nyearSuffix: 年\n",
        )
        .unwrap();
        assert_eq!(options.date_format, "yyyy-mm-dd");
        assert_eq!(options.week_start, 1);
        assert_eq!(options.view_start, ViewLevel::Years);
        assert_eq!(options.year_suffix, "年");
        assert_eq!(options.months_short.len(), 12);
    }

    #[test]
    fn test_json_options() {
        let options =
            PickerOptions::from_json_str(r#"{"inline": true, "showMonthAfterYear": true}"#)
                .unwrap();
        assert!(options.inline);
        assert!(options.show_month_after_year);
    }

    #[test]
    fn test_bad_view_start_is_config_error() {
        let err = PickerOptions::from_yaml_str("viewStart: decades\n").unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }

    #[test]
    fn test_numeric_view_start() {
        let options = PickerOptions::from_yaml_str("viewStart: 2\n").unwrap();
        assert_eq!(options.view_start, ViewLevel::Years);

        let options = PickerOptions::from_json_str(r#"{"viewStart": 1}"#).unwrap();
        assert_eq!(options.view_start, ViewLevel::Months);

        let options = PickerOptions::from_json_str(r#"{"viewStart": "months"}"#).unwrap();
        assert_eq!(options.view_start, ViewLevel::Months);

        let err = PickerOptions::from_yaml_str("viewStart: 5\n").unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let options = PickerOptions::default().week_start(7);
        assert!(matches!(
            options.validate(),
            Err(PickerError::InvalidOption(_))
        ));

        let mut options = PickerOptions::default();
        options.months_short.truncate(11);
        assert!(matches!(
            options.validate(),
            Err(PickerError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dateFormat: dd.mm.yyyy").unwrap();
        writeln!(file, "autoClose: false").unwrap();

        let options = PickerOptions::from_file(&path).unwrap();
        assert_eq!(options.date_format, "dd.mm.yyyy");
        assert!(!options.auto_close);

        let missing = PickerOptions::from_file(dir.path().join("missing.yml"));
        assert!(matches!(missing, Err(PickerError::Config(_))));

        let txt = dir.path().join("picker.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(PickerOptions::from_file(&txt).is_err());
    }

    #[test]
    fn test_disabled_when() {
        let options = PickerOptions::default().disabled_when(|d| d.weekday() == 0);
        // 2024-02-18 was a Sunday
        assert!(
            options
                .is_disabled
                .is_disabled(&CalendarDate::new(2024, 1, 18).unwrap())
        );
        assert!(
            !options
                .is_disabled
                .is_disabled(&CalendarDate::new(2024, 1, 19).unwrap())
        );
    }
}
