/// PickerStore owns every picker of the form and reduces picker actions
/// into calls on them
use crate::actions::{Action, Hit, NavKey};
use crate::config::{FieldKind, FormConfig};
use datepick_core::{
    Anchor, DatePicker, DisplayElement, Grid, ModalPicker, PickerError, PickerEvent,
    PickerRegistry, Placement, Summary, Target, TextInput, ViewLevel,
};
use ratatui::layout::{Position, Rect};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone)]
struct FieldEntry {
    id: String,
    label: String,
    kind: FieldKind,
}

/// A clickable rectangle recorded by the last render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub field: String,
    pub hit: Hit,
}

/// Everything the renderer needs to draw one field
#[derive(Debug, Clone)]
pub struct FieldView {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    /// Cursor position in characters, for text inputs
    pub cursor: Option<usize>,
    pub focused: bool,
    /// Popup shown, modal open, or inline
    pub open: bool,
    pub grid: Option<Grid>,
    pub highlighted: Option<usize>,
    pub placement: Option<Placement>,
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Default)]
pub struct PickerViewState {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub focused: usize,
    /// Field id of the open modal, if any
    pub modal: Option<String>,
    pub last_change: Option<String>,
}

#[derive(Debug, Default)]
struct PickerState {
    title: String,
    registry: PickerRegistry,
    modals: BTreeMap<String, ModalPicker>,
    fields: Vec<FieldEntry>,
    focused: usize,
    /// Keyboard highlight per field; absent means "on the selected cell"
    highlights: BTreeMap<String, usize>,
    anchors: BTreeMap<String, Rect>,
    field_areas: Vec<(Rect, usize)>,
    hits: Vec<HitRegion>,
    last_change: Option<String>,
    /// Failure waiting to be picked up by the app loop
    error: Option<String>,
}

fn anchor(rect: Rect) -> Anchor {
    Anchor {
        x: rect.x as i32,
        y: rect.y as i32,
        width: rect.width as u32,
        height: rect.height as u32,
    }
}

/// Where the keyboard highlight rests when nothing was moved: the selected
/// cell, else the first pickable one
fn default_highlight(grid: &Grid) -> usize {
    grid.selected_index()
        .or_else(|| grid.cells.iter().position(|cell| !cell.disabled))
        .unwrap_or(0)
}

fn nav_target(level: ViewLevel, key: NavKey) -> Option<Target> {
    match (level, key) {
        (ViewLevel::Days, NavKey::Prev) => Some(Target::MonthPrev),
        (ViewLevel::Days, NavKey::Next) => Some(Target::MonthNext),
        (ViewLevel::Days, NavKey::Up) => Some(Target::MonthTitle),
        (ViewLevel::Months, NavKey::Prev) => Some(Target::YearPrev),
        (ViewLevel::Months, NavKey::Next) => Some(Target::YearNext),
        (ViewLevel::Months, NavKey::Up) => Some(Target::YearTitle),
        (ViewLevel::Years, NavKey::Prev) => Some(Target::DecadePrev),
        (ViewLevel::Years, NavKey::Next) => Some(Target::DecadeNext),
        (ViewLevel::Years, NavKey::Up) => None,
    }
}

impl PickerState {
    fn focused_entry(&self) -> Option<&FieldEntry> {
        self.fields.get(self.focused)
    }

    fn open_modal(&self) -> Option<String> {
        self.modals
            .iter()
            .find(|(_, modal)| modal.is_open())
            .map(|(id, _)| id.clone())
    }

    /// The grid-bearing picker for `id`: the field's own picker, or the
    /// embedded one of an open modal
    fn grid_picker(&self, id: &str) -> Option<&DatePicker> {
        if let Some(modal) = self.modals.get(id) {
            return modal.embedded().filter(|_| modal.is_open());
        }
        self.registry.get(id).filter(|p| p.is_visible())
    }

    fn highlight(&self, id: &str) -> Option<usize> {
        let grid = self.grid_picker(id)?.grid();
        Some(
            self.highlights
                .get(id)
                .copied()
                .filter(|i| *i < grid.cells.len())
                .unwrap_or_else(|| default_highlight(&grid)),
        )
    }

    fn record(&mut self, id: &str, events: Vec<PickerEvent>) {
        for event in events {
            match event {
                PickerEvent::Change(value) => {
                    log::info!("{} changed to {}", id, value);
                    self.last_change = Some(format!("{}: {}", id, value));
                }
                PickerEvent::Show => {
                    if let Some(rect) = self.anchors.get(id).copied() {
                        if let Some(picker) = self.registry.get_mut(id) {
                            picker.place(anchor(rect));
                        }
                    }
                    log::debug!("{} opened", id);
                }
                PickerEvent::Hide => log::debug!("{} closed", id),
            }
        }
        self.highlights.remove(id);
    }

    fn click(&mut self, id: &str, target: Target) {
        let events = if let Some(modal) = self.modals.get_mut(id) {
            modal.click(target)
        } else if let Some(picker) = self.registry.get_mut(id) {
            picker.click(target)
        } else {
            return;
        };
        self.record(id, events);
    }

    fn click_cell(&mut self, id: &str, index: usize) {
        let events = if let Some(modal) = self.modals.get_mut(id) {
            modal.click_cell(index)
        } else if let Some(picker) = self.registry.get_mut(id) {
            picker.click_cell(index)
        } else {
            return;
        };
        self.record(id, events);
    }

    fn open(&mut self, id: &str) {
        if let Some(modal) = self.modals.get_mut(id) {
            match modal.open() {
                Ok(events) => self.record(id, events),
                Err(e) => {
                    log::error!("Could not open {}: {}", id, e);
                    self.error = Some(e.to_string());
                }
            }
        } else if let Some(picker) = self.registry.get_mut(id) {
            let events = picker.trigger_click();
            self.record(id, events);
        }
    }

    fn close(&mut self, id: &str) {
        let events = if let Some(modal) = self.modals.get_mut(id) {
            modal.cancel()
        } else if let Some(picker) = self.registry.get_mut(id) {
            picker.hide()
        } else {
            return;
        };
        self.record(id, events);
    }

    /// Focus moved to field `index`: other popups see an outside click on
    /// this host, and the field's own picker gets a focus event
    fn focus(&mut self, index: usize) {
        let Some(entry) = self.fields.get(index).cloned() else {
            return;
        };
        self.focused = index;
        for (id, event) in self.registry.outside_click(Some(entry.id.as_str())) {
            self.record(&id, vec![event]);
        }
        if let Some(picker) = self.registry.get_mut(&entry.id) {
            let events = picker.focus();
            self.record(&entry.id, events);
        }
    }

    fn move_highlight(&mut self, id: &str, delta: isize) {
        let Some(picker) = self.grid_picker(id) else {
            return;
        };
        let len = picker.grid().cells.len();
        let Some(current) = self.highlight(id) else {
            return;
        };
        let next = (current as isize + delta).clamp(0, len.saturating_sub(1) as isize);
        self.highlights.insert(id.to_string(), next as usize);
    }
}

/// Store that holds the form's pickers
#[derive(Clone, Default)]
pub struct PickerStore {
    state: Arc<RwLock<PickerState>>,
}

impl PickerStore {
    /// Attach one picker (or modal) per field of the form
    pub fn from_config(form: &FormConfig) -> Result<Self, PickerError> {
        form.validate()?;
        let mut state = PickerState {
            title: form.title.clone(),
            ..PickerState::default()
        };

        for field in &form.fields {
            let options = field.picker_options()?;
            match field.kind {
                FieldKind::Input => {
                    state
                        .registry
                        .attach(&field.id, Box::new(TextInput::new(&field.value)), options)?;
                }
                FieldKind::Inline => {
                    state.registry.attach(
                        &field.id,
                        Box::new(DisplayElement::new(&field.value)),
                        options,
                    )?;
                }
                FieldKind::Modal => {
                    state.modals.insert(
                        field.id.clone(),
                        ModalPicker::new(&field.id, Box::new(TextInput::new(&field.value)), options),
                    );
                }
            }
            log::debug!("Attached {} field {}", field.kind.name(), field.id);
            state.fields.push(FieldEntry {
                id: field.id.clone(),
                label: field.label.clone(),
                kind: field.kind,
            });
        }
        log::info!("Form {:?} loaded with {} fields", form.title, state.fields.len());

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Get a render snapshot of the current state
    pub fn get_state(&self) -> PickerViewState {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        let fields = state
            .fields
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let picker = state.grid_picker(&entry.id);
                let (value, cursor, placement, summary) = match state.modals.get(&entry.id) {
                    Some(modal) => (modal.target().value(), None, None, modal.summary()),
                    None => match state.registry.get(&entry.id) {
                        Some(p) => (p.host().value(), p.host().cursor(), p.placement(), None),
                        None => (String::new(), None, None, None),
                    },
                };
                FieldView {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                    kind: entry.kind,
                    value,
                    cursor,
                    focused: i == state.focused,
                    open: picker.is_some(),
                    grid: picker.map(|p| p.grid()),
                    highlighted: state.highlight(&entry.id),
                    placement,
                    summary,
                }
            })
            .collect();

        PickerViewState {
            title: state.title.clone(),
            fields,
            focused: state.focused,
            modal: state.open_modal(),
            last_change: state.last_change.clone(),
        }
    }

    pub fn focused_kind(&self) -> Option<FieldKind> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.focused_entry().map(|entry| entry.kind)
    }

    /// Whether the focused field currently shows a grid
    pub fn focused_is_open(&self) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .focused_entry()
            .is_some_and(|entry| state.grid_picker(&entry.id).is_some())
    }

    pub fn modal_open(&self) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.open_modal().is_some()
    }

    /// Columns of the grid shown for the focused field
    pub fn focused_columns(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .focused_entry()
            .and_then(|entry| state.grid_picker(&entry.id))
            .map(|picker| picker.grid().columns())
            .unwrap_or(7)
    }

    /// Hand over the last failure, if any, so it can be shown once
    pub fn take_error(&self) -> Option<String> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.error.take()
    }

    /// Called by the layout pass with the on-screen rectangle of each field
    pub fn set_anchor(&self, id: &str, area: Rect) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.anchors.insert(id.to_string(), area);
    }

    /// Called by the layout pass with the clickable parts of this frame
    pub fn set_hit_regions(&self, fields: Vec<(Rect, usize)>, hits: Vec<HitRegion>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.field_areas = fields;
        state.hits = hits;
    }

    /// Resolve a mouse position against the last rendered frame. Later
    /// regions are drawn on top so they win.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitRegion> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let position = Position::new(column, row);
        state
            .hits
            .iter()
            .rev()
            .find(|region| region.area.contains(position))
            .cloned()
    }

    pub fn field_at(&self, column: u16, row: u16) -> Option<usize> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let position = Position::new(column, row);
        state
            .field_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, index)| *index)
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let focused_id = state.focused_entry().map(|entry| entry.id.clone());
        // an open modal captures all picker input
        let active_id = state.open_modal().or(focused_id);

        match action {
            Action::FocusNext if state.open_modal().is_none() => {
                let next = (state.focused + 1) % state.fields.len().max(1);
                state.focus(next);
            }

            Action::FocusPrev if state.open_modal().is_none() => {
                let count = state.fields.len().max(1);
                let prev = (state.focused + count - 1) % count;
                state.focus(prev);
            }

            Action::ClickField(index) => {
                state.focus(*index);
                if let Some(entry) = state.fields.get(*index).cloned() {
                    state.open(&entry.id);
                }
            }

            Action::OpenPicker => {
                if let Some(id) = active_id {
                    state.open(&id);
                }
            }

            Action::ClosePicker => {
                if let Some(id) = active_id {
                    state.close(&id);
                }
            }

            Action::EditField(edit) => {
                if let Some(id) = active_id {
                    let changed = state
                        .registry
                        .get_mut(&id)
                        .is_some_and(|picker| picker.keystroke(*edit));
                    if changed {
                        log::trace!("{} edited", id);
                        state.highlights.remove(&id);
                    }
                }
            }

            Action::MoveHighlight(delta) => {
                if let Some(id) = active_id {
                    state.move_highlight(&id, *delta);
                }
            }

            Action::ActivateHighlight => {
                if let Some(id) = active_id {
                    if let Some(index) = state.highlight(&id) {
                        state.click_cell(&id, index);
                    }
                }
            }

            Action::Navigate(key) => {
                if let Some(id) = active_id {
                    let level = state.grid_picker(&id).map(|p| p.level());
                    if let Some(target) = level.and_then(|l| nav_target(l, *key)) {
                        state.click(&id, target);
                    }
                }
            }

            Action::ClickPicker { field, hit } => match hit {
                Hit::Target(target) => state.click(field, *target),
                Hit::Cell(index) => state.click_cell(field, *index),
                Hit::Pick => {
                    if let Some(modal) = state.modals.get_mut(field) {
                        let events = modal.pick();
                        state.record(field, events);
                    }
                }
                Hit::Cancel => state.close(field),
            },

            Action::OutsideClick => {
                for (id, event) in state.registry.outside_click(None) {
                    state.record(&id, vec![event]);
                }
            }

            Action::PickModal => {
                if let Some(id) = state.open_modal() {
                    if let Some(modal) = state.modals.get_mut(&id) {
                        let events = modal.pick();
                        state.record(&id, events);
                    }
                }
            }

            Action::Resize(width, height) => {
                log::debug!("Terminal resized to {}x{}", width, height);
                let anchors = state.anchors.clone();
                let placements = state
                    .registry
                    .resize(|id| anchors.get(id).copied().map(anchor));
                for (id, placement) in placements {
                    log::trace!("{} placed at {:?}", id, placement);
                }
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }
}
