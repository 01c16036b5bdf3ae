/// The date picker state machine: a selected date, a view date, and which of
/// the three grids is showing. All operations are synchronous and return the
/// events they produced so the host can react to them.
use crate::calendar::CalendarDate;
use crate::exceptions::PickerError;
use crate::format::{DateFormat, format_date, parse_date, parse_format};
use crate::grid::{self, CellKind, DayKind, Grid, ViewLevel};
use crate::host::{Edit, HostField, HostKind};
use crate::listeners::{ListenerGuard, ListenerRegistry};
use crate::options::PickerOptions;
use log::{debug, info, trace};

/// Notifications emitted by picker operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Show,
    Hide,
    /// A value was committed; carries the formatted string written to the host
    Change(String),
}

/// Everything on the popup that can be clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Previous/next ten years on the years grid
    DecadePrev,
    DecadeNext,
    /// Previous/next year on the months grid
    YearPrev,
    YearNext,
    /// Title of the months grid, leads up to the years grid
    YearTitle,
    MonthPrev,
    MonthNext,
    /// Title of the days grid, leads up to the months grid
    MonthTitle,
    Cell(CellKind),
}

/// Rectangle of the element the popup is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Absolute position of the popup, directly below its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub top: i32,
    pub left: i32,
    pub z_index: i32,
}

pub struct DatePicker {
    id: String,
    options: PickerOptions,
    format: DateFormat,
    host: Box<dyn HostField>,
    date: CalendarDate,
    view_date: CalendarDate,
    level: ViewLevel,
    visible: bool,
    is_input: bool,
    is_inline: bool,
    listeners: ListenerRegistry,
    scope: Option<ListenerGuard>,
    placement: Option<Placement>,
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("id", &self.id)
            .field("format", &self.format.pattern())
            .field("date", &self.date)
            .field("view_date", &self.view_date)
            .field("level", &self.level)
            .field("visible", &self.visible)
            .field("is_inline", &self.is_inline)
            .finish()
    }
}

impl DatePicker {
    /// Bind a picker to `host`. Fails if the options or the date format are
    /// invalid. Inline pickers are shown immediately.
    pub fn new(
        id: impl Into<String>,
        host: Box<dyn HostField>,
        options: PickerOptions,
        listeners: ListenerRegistry,
    ) -> Result<Self, PickerError> {
        options.validate()?;
        let format = parse_format(&options.date_format)?;
        let id = id.into();

        let is_input = host.kind() == HostKind::Input;
        let is_inline = options.inline && (options.container.is_some() || !is_input);

        let initial = match &options.date {
            Some(date) => date.clone(),
            None => host.value(),
        };
        let date = parse_date(&initial, &format);

        let mut picker = Self {
            id,
            level: options.view_start,
            options,
            format,
            host,
            date,
            view_date: date,
            visible: false,
            is_input,
            is_inline,
            listeners,
            scope: None,
            placement: None,
        };
        picker.level = picker.resolve_level(picker.options.view_start);
        debug!(
            "Picker {} bound to {:?} host with {} (inline: {})",
            picker.id,
            picker.host.kind(),
            picker.format.pattern(),
            picker.is_inline
        );

        if picker.is_inline {
            picker.show();
        }
        Ok(picker)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn format(&self) -> &DateFormat {
        &self.format
    }

    pub fn host(&self) -> &dyn HostField {
        self.host.as_ref()
    }

    /// The committed date
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// The committed date rendered with the picker's format
    pub fn formatted_date(&self) -> String {
        format_date(&self.date, &self.format)
    }

    pub fn view_date(&self) -> CalendarDate {
        self.view_date
    }

    pub fn level(&self) -> ViewLevel {
        self.level
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_inline(&self) -> bool {
        self.is_inline
    }

    pub fn is_input(&self) -> bool {
        self.is_input
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Month name for `month`, or for the selected month when `None`
    pub fn month_name(&self, month: Option<u32>, short: bool) -> &str {
        let names = if short {
            &self.options.months_short
        } else {
            &self.options.months
        };
        let index = month.unwrap_or(self.date.month) as usize % 12;
        names.get(index).map(String::as_str).unwrap_or("")
    }

    /// Weekday name for `weekday` (0 = Sunday), or for the selected date's
    /// weekday when `None`. `min` wins over `short`.
    pub fn day_name(&self, weekday: Option<u32>, short: bool, min: bool) -> &str {
        let names = if min {
            &self.options.days_min
        } else if short {
            &self.options.days_short
        } else {
            &self.options.days
        };
        let index = weekday.unwrap_or_else(|| self.date.weekday()) as usize % 7;
        names.get(index).map(String::as_str).unwrap_or("")
    }

    /// The grid for the current level
    pub fn grid(&self) -> Grid {
        grid::render(self.level, &self.view_date, &self.date, &self.options)
    }

    /// All three grids: years, months, days
    pub fn grids(&self) -> [Grid; 3] {
        [
            grid::render(ViewLevel::Years, &self.view_date, &self.date, &self.options),
            grid::render(ViewLevel::Months, &self.view_date, &self.date, &self.options),
            grid::render(ViewLevel::Days, &self.view_date, &self.date, &self.options),
        ]
    }

    /// First level at or after `level` that the format can show. Missing days
    /// fall back to months, missing months to years, missing years to days.
    fn resolve_level(&self, level: ViewLevel) -> ViewLevel {
        let mut level = level;
        for _ in 0..3 {
            let supported = match level {
                ViewLevel::Years => self.format.has_year(),
                ViewLevel::Months => self.format.has_month(),
                ViewLevel::Days => self.format.has_day(),
            };
            if supported {
                return level;
            }
            level = match level {
                ViewLevel::Days => ViewLevel::Months,
                ViewLevel::Months => ViewLevel::Years,
                ViewLevel::Years => ViewLevel::Days,
            };
        }
        level
    }

    fn show_view(&mut self, level: ViewLevel) {
        self.level = self.resolve_level(level);
        debug!("Picker {} showing {} view", self.id, self.level.name());
    }

    fn hide_view(&mut self) -> Vec<PickerEvent> {
        if self.options.auto_close {
            self.hide()
        } else {
            Vec::new()
        }
    }

    /// Open the popup on the configured start level
    pub fn show(&mut self) -> Vec<PickerEvent> {
        if self.visible {
            return Vec::new();
        }
        self.visible = true;
        if !self.is_inline {
            self.scope = Some(self.listeners.acquire(&self.id));
        }
        self.show_view(self.options.view_start);
        vec![PickerEvent::Show]
    }

    /// Close the popup. Inline pickers are always visible.
    pub fn hide(&mut self) -> Vec<PickerEvent> {
        if !self.visible || self.is_inline {
            return Vec::new();
        }
        self.visible = false;
        self.scope = None;
        debug!("Picker {} hidden", self.id);
        vec![PickerEvent::Hide]
    }

    pub fn toggle(&mut self) -> Vec<PickerEvent> {
        if self.visible {
            self.hide()
        } else {
            self.show()
        }
    }

    /// Re-read the host value into both the selected and the view date
    pub fn update(&mut self) {
        let value = self.host.value();
        self.date = parse_date(&value, &self.format);
        self.view_date = self.date;
        trace!("Picker {} read {:?} as {}", self.id, value, self.date);
    }

    /// Focus on the host input: re-read it and open the popup, unless a
    /// separate trigger opens it
    pub fn focus(&mut self) -> Vec<PickerEvent> {
        if !self.is_input || self.is_inline || self.options.trigger.is_some() {
            return Vec::new();
        }
        self.update();
        self.show()
    }

    /// Click on the host element or its trigger
    pub fn trigger_click(&mut self) -> Vec<PickerEvent> {
        if self.is_inline {
            return Vec::new();
        }
        self.show()
    }

    /// Apply a keystroke to a text input host and re-parse it. Display hosts
    /// and inline pickers ignore keystrokes.
    pub fn keystroke(&mut self, edit: Edit) -> bool {
        if !self.is_input || self.is_inline {
            return false;
        }
        let changed = self.host.edit(edit);
        if changed {
            self.update();
        }
        changed
    }

    /// A click somewhere on the page that is not the popup. Dismisses the
    /// popup unless the click landed on the host element itself.
    pub fn outside_click(&mut self, on_host: bool) -> Vec<PickerEvent> {
        if self.scope.is_none() || on_host {
            return Vec::new();
        }
        self.hide()
    }

    /// Position the popup below `anchor`
    pub fn place(&mut self, anchor: Anchor) -> Option<Placement> {
        if self.is_inline {
            return None;
        }
        let placement = Placement {
            top: anchor.y + anchor.height as i32,
            left: anchor.x,
            z_index: self.options.z_index,
        };
        self.placement = Some(placement);
        Some(placement)
    }

    fn commit(&mut self, date: CalendarDate) -> PickerEvent {
        self.date = date;
        self.view_date = date;
        let value = format_date(&date, &self.format);
        self.host.set_value(&value);
        info!("Picker {} committed {}", self.id, value);
        PickerEvent::Change(value)
    }

    /// Click the cell at `index` of the current grid
    pub fn click_cell(&mut self, index: usize) -> Vec<PickerEvent> {
        match self.grid().cells.get(index) {
            Some(cell) => self.click(Target::Cell(cell.kind)),
            None => Vec::new(),
        }
    }

    pub fn click(&mut self, target: Target) -> Vec<PickerEvent> {
        let view = self.view_date;
        let mut events = Vec::new();

        match target {
            Target::DecadePrev => self.view_date = view.shift(-10, 0),
            Target::DecadeNext => self.view_date = view.shift(10, 0),
            Target::YearPrev => self.view_date = view.shift(-1, 0),
            Target::YearNext => self.view_date = view.shift(1, 0),
            Target::MonthPrev => self.view_date = view.shift(0, -1),
            Target::MonthNext => self.view_date = view.shift(0, 1),

            Target::YearTitle => {
                if self.format.has_year() {
                    self.show_view(ViewLevel::Years);
                }
            }

            Target::MonthTitle => {
                if self.format.has_month() {
                    self.show_view(ViewLevel::Months);
                }
            }

            Target::Cell(CellKind::Year(year)) => {
                if year == view.year - 5 || year == view.year + 6 {
                    trace!("Picker {} ignored edge year {}", self.id, year);
                    return events;
                }
                let date = CalendarDate::with_clamped_day(year as i64, view.month as i64, view.day);
                if self.format.has_month() {
                    self.show_view(ViewLevel::Months);
                } else {
                    events.extend(self.hide_view());
                }
                events.push(self.commit(date));
            }

            Target::Cell(CellKind::Month(month)) => {
                let date = CalendarDate::with_clamped_day(view.year as i64, month as i64, view.day);
                if self.format.has_day() {
                    self.show_view(ViewLevel::Days);
                } else {
                    events.extend(self.hide_view());
                }
                events.push(self.commit(date));
            }

            Target::Cell(CellKind::Day { kind, day }) => {
                let offset = match kind {
                    DayKind::Prev => -1,
                    DayKind::Current => 0,
                    DayKind::Next => 1,
                };
                let date =
                    CalendarDate::normalized(view.year as i64, view.month as i64 + offset, day as i64);

                // Neighbouring-month days always commit and only move the view
                if kind == DayKind::Current {
                    events.extend(self.hide_view());
                    if self.options.is_disabled.is_disabled(&date) {
                        debug!("Picker {} refused disabled date {}", self.id, date);
                        return events;
                    }
                }
                events.push(self.commit(date));
            }
        }

        events
    }

    /// Tear the picker down, releasing its listener scope
    pub fn destroy(mut self) {
        self.scope = None;
        debug!("Picker {} destroyed", self.id);
    }
}
