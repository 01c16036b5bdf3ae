/// This config file lists out the default values for the picker options.
/// All can be overridden by an ENV var of the same name (see `get_datepick_setting!`).
/// These should only be primitive types
///

/// default pattern used to read and write the host field
pub static DATEPICK_DATE_FORMAT: &'static str = "mm/dd/yyyy";

/// first column of the days grid, 0 for Sunday through 6 for Saturday
pub static DATEPICK_WEEK_START: usize = 0;

/// grid shown when the picker opens: days, months or years
pub static DATEPICK_VIEW_START: &'static str = "days";

/// stacking order of the popup
pub static DATEPICK_Z_INDEX: usize = 1;

/// close the popup once a value is committed
pub static DATEPICK_AUTO_CLOSE: &'static str = "true";
