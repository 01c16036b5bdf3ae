use std::fmt;

#[derive(Debug, PartialEq)]
pub enum PickerError {
    /// the date format pattern produced no usable tokens
    InvalidFormat(String),
    InvalidOption(String),
    DuplicateHost(String),
    UnknownHost(String),
    Config(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(pattern) => write!(f, "Invalid date format: {pattern:?}"),
            Self::InvalidOption(msg) => write!(f, "Invalid option: {msg}"),
            Self::DuplicateHost(id) => write!(f, "A picker is already attached to {id}"),
            Self::UnknownHost(id) => write!(f, "No picker attached to {id}"),
            Self::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for PickerError {}
