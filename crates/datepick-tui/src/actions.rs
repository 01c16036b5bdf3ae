/// Core Action types for the flux architecture.
/// All state mutations flow through Actions dispatched to the Dispatcher.
use datepick_core::{Edit, Target};

/// Represents all possible user intents and system events in the application
#[derive(Debug, Clone)]
pub enum Action {
    // ===== Form navigation =====
    /// Move focus to the next field
    FocusNext,

    /// Move focus to the previous field
    FocusPrev,

    /// User clicked on the field at this index
    ClickField(usize),

    // ===== Picker interaction =====
    /// Open the popup (or modal) of the focused field
    OpenPicker,

    /// Dismiss the popup (or cancel the modal) of the focused field
    ClosePicker,

    /// Keystroke routed to the focused text input
    EditField(Edit),

    /// Move the keyboard highlight inside the open grid by this many cells
    MoveHighlight(isize),

    /// Select the highlighted cell
    ActivateHighlight,

    /// Previous / next / up on the open grid's title bar
    Navigate(NavKey),

    /// Mouse click on part of an open picker
    ClickPicker { field: String, hit: Hit },

    /// Mouse click that landed on no field and no picker
    OutsideClick,

    /// Confirm the modal's date into its field
    PickModal,

    /// Terminal was resized
    Resize(u16, u16),

    // ===== Chrome =====
    /// User toggled the help overlay
    ToggleHelp,

    /// User toggled the application log pane
    ToggleLogs,

    /// Scroll the log pane, positive is towards older lines
    ScrollLogs(isize),

    /// Generic error to display to user
    ShowError(String),

    /// Clear any displayed errors
    ClearError,

    /// Application should exit
    Quit,
}

/// The three controls of a grid's title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Prev,
    Next,
    Up,
}

/// Something clickable inside a rendered picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Target(Target),
    /// Index into the grid's cells
    Cell(usize),
    /// Modal "pick" button
    Pick,
    /// Modal "cancel" button
    Cancel,
}
