/// A modal wrapper around an inline picker. The embedded picker is built the
/// first time the modal opens, seeded from the target field, and only writes
/// back to the target when the user picks.
use crate::calendar::CalendarDate;
use crate::exceptions::PickerError;
use crate::host::{DisplayElement, HostField};
use crate::listeners::ListenerRegistry;
use crate::options::PickerOptions;
use crate::picker::{DatePicker, PickerEvent, Target};
use log::{debug, info};

/// Format the embedded picker always uses
pub const MODAL_DATE_FORMAT: &str = "yyyy-mm-dd";

/// The big date shown above the embedded calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub year: i32,
    /// Short month name, upper-cased
    pub month: String,
    /// Full weekday name
    pub weekday: String,
    pub day: u32,
}

pub struct ModalPicker {
    id: String,
    target: Box<dyn HostField>,
    options: PickerOptions,
    embedded: Option<DatePicker>,
    open: bool,
}

impl std::fmt::Debug for ModalPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalPicker")
            .field("id", &self.id)
            .field("target", &self.target.value())
            .field("embedded", &self.embedded)
            .field("open", &self.open)
            .finish()
    }
}

impl ModalPicker {
    pub fn new(id: impl Into<String>, target: Box<dyn HostField>, options: PickerOptions) -> Self {
        Self {
            id: id.into(),
            target,
            options,
            embedded: None,
            open: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_built(&self) -> bool {
        self.embedded.is_some()
    }

    pub fn target(&self) -> &dyn HostField {
        self.target.as_ref()
    }

    pub fn embedded(&self) -> Option<&DatePicker> {
        self.embedded.as_ref()
    }

    fn build(&self) -> Result<DatePicker, PickerError> {
        let seed = self.target.value();
        let mut options = self
            .options
            .clone()
            .inline(true)
            .date_format(MODAL_DATE_FORMAT);
        if !seed.trim().is_empty() {
            options = options.date(seed.trim());
        }
        debug!("Building embedded picker for {}", self.id);
        DatePicker::new(
            format!("{}-modal", self.id),
            Box::new(DisplayElement::new(String::new())),
            options,
            ListenerRegistry::new(),
        )
    }

    /// Show the modal, building the embedded picker on first use
    pub fn open(&mut self) -> Result<Vec<PickerEvent>, PickerError> {
        if self.open {
            return Ok(Vec::new());
        }
        if self.embedded.is_none() {
            self.embedded = Some(self.build()?);
        }
        self.open = true;
        Ok(vec![PickerEvent::Show])
    }

    /// Forward a click to the embedded picker. Its commits never reach the
    /// target field.
    pub fn click(&mut self, target: Target) -> Vec<PickerEvent> {
        match (self.open, self.embedded.as_mut()) {
            (true, Some(picker)) => picker.click(target),
            _ => Vec::new(),
        }
    }

    pub fn click_cell(&mut self, index: usize) -> Vec<PickerEvent> {
        match (self.open, self.embedded.as_mut()) {
            (true, Some(picker)) => picker.click_cell(index),
            _ => Vec::new(),
        }
    }

    /// The embedded picker's current date
    pub fn date(&self) -> Option<CalendarDate> {
        self.embedded.as_ref().map(|p| p.date())
    }

    pub fn summary(&self) -> Option<Summary> {
        let picker = self.embedded.as_ref()?;
        let date = picker.date();
        Some(Summary {
            year: date.year,
            month: picker.month_name(None, true).to_uppercase(),
            weekday: picker.day_name(None, false, false).to_string(),
            day: date.day,
        })
    }

    /// Write the embedded date to the target field and close
    pub fn pick(&mut self) -> Vec<PickerEvent> {
        let Some(picker) = self.embedded.as_ref().filter(|_| self.open) else {
            return Vec::new();
        };
        let value = picker.formatted_date();
        self.target.set_value(&value);
        self.open = false;
        info!("Modal {} picked {}", self.id, value);
        vec![PickerEvent::Change(value), PickerEvent::Hide]
    }

    /// Close without touching the target field
    pub fn cancel(&mut self) -> Vec<PickerEvent> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        vec![PickerEvent::Hide]
    }

    pub fn destroy(mut self) {
        if let Some(picker) = self.embedded.take() {
            picker.destroy();
        }
        debug!("Modal {} destroyed", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellKind, DayKind};
    use crate::host::TextInput;

    fn modal(value: &str) -> ModalPicker {
        ModalPicker::new(
            "birthday",
            Box::new(TextInput::new(value)),
            PickerOptions::default(),
        )
    }

    #[test]
    fn test_built_lazily_and_seeded_from_target() {
        let mut modal = modal("2024-02-15");
        assert!(!modal.is_built());
        assert!(modal.summary().is_none());

        assert_eq!(modal.open().unwrap(), vec![PickerEvent::Show]);
        assert!(modal.is_built());
        assert!(modal.open().unwrap().is_empty());

        let picker = modal.embedded().unwrap();
        assert!(picker.is_inline());
        assert_eq!(picker.format().pattern(), MODAL_DATE_FORMAT);
        assert_eq!(
            modal.summary().unwrap(),
            Summary {
                year: 2024,
                month: "FEB".to_string(),
                weekday: "Thursday".to_string(),
                day: 15,
            }
        );
    }

    #[test]
    fn test_pick_writes_target() {
        let mut modal = modal("2024-02-15");
        modal.open().unwrap();

        let events = modal.click(Target::Cell(CellKind::Day {
            kind: DayKind::Current,
            day: 20,
        }));
        assert_eq!(events, vec![PickerEvent::Change("2024-02-20".to_string())]);
        assert_eq!(modal.target().value(), "2024-02-15");
        assert_eq!(modal.summary().unwrap().weekday, "Tuesday");

        let events = modal.pick();
        assert_eq!(
            events,
            vec![
                PickerEvent::Change("2024-02-20".to_string()),
                PickerEvent::Hide
            ]
        );
        assert_eq!(modal.target().value(), "2024-02-20");
        assert!(!modal.is_open());
        assert!(modal.pick().is_empty());
    }

    #[test]
    fn test_cancel_leaves_target() {
        let mut modal = modal("2024-02-15");
        assert!(modal.cancel().is_empty());
        modal.open().unwrap();
        modal.click_cell(10);
        assert_eq!(modal.cancel(), vec![PickerEvent::Hide]);
        assert_eq!(modal.target().value(), "2024-02-15");
        assert!(modal.click_cell(10).is_empty());
    }

    #[test]
    fn test_empty_target_seeds_today() {
        let mut modal = modal("");
        modal.open().unwrap();
        assert_eq!(modal.date(), Some(CalendarDate::today()));
    }
}
