mod macros;

pub mod calendar;
pub mod config;
pub mod exceptions;
pub mod format;
pub mod grid;
pub mod host;
pub mod listeners;
pub mod modal;
pub mod options;
pub mod picker;
pub mod registry;

// public api
pub use calendar::CalendarDate;
pub use exceptions::PickerError;
pub use format::{DateFormat, format_date, parse_date, parse_format};
pub use grid::{Cell, CellKind, DayKind, Grid, ViewLevel};
pub use host::{DisplayElement, Edit, HostField, HostKind, TextInput};
pub use listeners::{ListenerKind, ListenerRegistry};
pub use modal::{ModalPicker, Summary};
pub use options::{DisabledPredicate, PickerOptions};
pub use picker::{Anchor, DatePicker, PickerEvent, Placement, Target};
pub use registry::PickerRegistry;
