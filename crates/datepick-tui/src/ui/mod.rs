/// UI module - widgets and rendering
pub mod field_row;
pub mod layout;
pub mod log_panel;
pub mod modal_dialog;
pub mod picker_panel;

pub use layout::render_layout;
