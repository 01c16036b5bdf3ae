/// The form the TUI shows, read from YAML:
///
/// ```yaml
/// title: Booking
/// fields:
///   - id: checkin
///     label: Check-in
///     value: 02/15/2024
///     blackoutWeekdays: [0]
///   - id: month
///     label: Billing month
///     kind: inline
///     value: 2024-03
///     options:
///       dateFormat: yyyy-mm
///   - id: birthday
///     label: Birthday
///     kind: modal
///     blackoutDates: [2024-12-25]
/// ```
use chrono::{Datelike, NaiveDate};
use datepick_core::{CalendarDate, PickerError, PickerOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Text input with a popup below it
    #[default]
    Input,
    /// Always-visible calendar
    Inline,
    /// Read-only field that opens a modal calendar
    Modal,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Inline => "inline",
            Self::Modal => "modal",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub options: PickerOptions,
    /// Weekdays that cannot be picked, 0 for Sunday
    #[serde(default)]
    pub blackout_weekdays: Vec<u32>,
    /// Dates that cannot be picked, as yyyy-mm-dd
    #[serde(default)]
    pub blackout_dates: Vec<String>,
}

impl FieldConfig {
    pub fn new(id: &str, label: &str, kind: FieldKind, value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: value.to_string(),
            options: PickerOptions::default(),
            blackout_weekdays: Vec::new(),
            blackout_dates: Vec::new(),
        }
    }

    /// Picker options with the blackout lists turned into a disabled-date
    /// predicate
    pub fn picker_options(&self) -> Result<PickerOptions, PickerError> {
        if let Some(day) = self.blackout_weekdays.iter().find(|d| **d > 6) {
            return Err(PickerError::Config(format!(
                "{}: blackout weekday {} is not between 0 and 6",
                self.id, day
            )));
        }
        let dates = self
            .blackout_dates
            .iter()
            .map(|text| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(CalendarDate::from_naive)
                    .map_err(|e| {
                        PickerError::Config(format!("{}: blackout date {:?}: {}", self.id, text, e))
                    })
            })
            .collect::<Result<HashSet<CalendarDate>, PickerError>>()?;

        let mut options = self.options.clone();
        if self.kind == FieldKind::Inline {
            options = options.inline(true);
        }
        if dates.is_empty() && self.blackout_weekdays.is_empty() {
            return Ok(options);
        }

        let weekdays = self.blackout_weekdays.clone();
        Ok(options.disabled_when(move |date| {
            weekdays.contains(&date.weekday()) || dates.contains(date)
        }))
    }
}

fn default_title() -> String {
    "datepick".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub fields: Vec<FieldConfig>,
}

impl Default for FormConfig {
    /// A small booking form showing each kind of field
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        let mut checkin = FieldConfig::new(
            "checkin",
            "Check-in",
            FieldKind::Input,
            &today.format("%m/%d/%Y").to_string(),
        );
        checkin.blackout_weekdays = vec![0];

        let mut checkout = FieldConfig::new("checkout", "Check-out", FieldKind::Input, "");
        checkout.options = PickerOptions::default().week_start(1);

        let mut month = FieldConfig::new(
            "month",
            "Billing month",
            FieldKind::Inline,
            &format!("{}-{:02}", today.year(), today.month()),
        );
        month.options = PickerOptions::default().date_format("yyyy-mm");

        let birthday = FieldConfig::new("birthday", "Birthday", FieldKind::Modal, "1990-07-04");

        Self {
            title: "Booking".to_string(),
            fields: vec![checkin, checkout, month, birthday],
        }
    }
}

impl FormConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, PickerError> {
        let config: Self =
            serde_norway::from_str(s).map_err(|e| PickerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PickerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&contents)
    }

    /// Field ids must be unique and the form must not be empty
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.fields.is_empty() {
            return Err(PickerError::Config("form has no fields".to_string()));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(PickerError::DuplicateHost(field.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
title: Booking
fields:
  - id: checkin
    label: Check-in
    value: 02/15/2024
    blackoutWeekdays: [0]
    blackoutDates: [2024-02-14]
  - id: month
    label: Billing month
    kind: inline
    options:
      dateFormat: yyyy-mm
"#;

    #[test]
    fn test_parse_form() {
        let form = FormConfig::from_yaml_str(FORM).unwrap();
        assert_eq!(form.title, "Booking");
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[0].kind, FieldKind::Input);
        assert_eq!(form.fields[1].kind, FieldKind::Inline);
        assert_eq!(form.fields[1].options.date_format, "yyyy-mm");
        assert_eq!(form.fields[1].options.week_start, 0);
    }

    #[test]
    fn test_blackouts_become_predicate() {
        let form = FormConfig::from_yaml_str(FORM).unwrap();
        let options = form.fields[0].picker_options().unwrap();
        let disabled = |y, m, d| {
            options
                .is_disabled
                .is_disabled(&CalendarDate::new(y, m, d).unwrap())
        };
        // 2024-02-18 was a Sunday
        assert!(disabled(2024, 1, 18));
        assert!(disabled(2024, 1, 14));
        assert!(!disabled(2024, 1, 15));

        assert!(form.fields[1].picker_options().unwrap().inline);
    }

    #[test]
    fn test_bad_blackouts() {
        let mut field = FieldConfig::new("f", "F", FieldKind::Input, "");
        field.blackout_weekdays = vec![7];
        assert!(matches!(field.picker_options(), Err(PickerError::Config(_))));

        field.blackout_weekdays.clear();
        field.blackout_dates = vec!["2024-02-30".to_string()];
        assert!(matches!(field.picker_options(), Err(PickerError::Config(_))));
    }

    #[test]
    fn test_duplicate_ids() {
        let yaml = "fields:\n  - {id: a, label: A}\n  - {id: a, label: B}\n";
        assert_eq!(
            FormConfig::from_yaml_str(yaml).unwrap_err(),
            PickerError::DuplicateHost("a".to_string())
        );
        assert!(FormConfig::from_yaml_str("fields: []\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.yml");
        std::fs::write(&path, FORM).unwrap();
        assert_eq!(FormConfig::from_file(&path).unwrap().fields[0].id, "checkin");
        assert!(FormConfig::from_file(dir.path().join("nope.yml")).is_err());
    }

    #[test]
    fn test_default_form_is_valid() {
        let form = FormConfig::default();
        assert!(form.validate().is_ok());
        for field in &form.fields {
            assert!(field.picker_options().is_ok());
        }
    }
}
