use chrono::NaiveDateTime;
use std::fmt;

/// Capture time as written by the camera. EXIF carries no zone, so this stays naive.
pub type CaptureDate = NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLookup {
    Found(CaptureDate),
    Absent(AbsentReason),
}

impl DateLookup {
    pub fn date(&self) -> Option<CaptureDate> {
        match self {
            DateLookup::Found(date) => Some(*date),
            DateLookup::Absent(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The file could not be opened, or its container is corrupt or unsupported.
    Unreadable(String),
    NoMetadata,
    NoDateField,
    Malformed {
        field: &'static str,
        value: String,
        message: String,
    },
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsentReason::Unreadable(message) => write!(f, "unreadable metadata: {message}"),
            AbsentReason::NoMetadata => f.write_str("no EXIF metadata"),
            AbsentReason::NoDateField => f.write_str("no date field in EXIF metadata"),
            AbsentReason::Malformed {
                field,
                value,
                message,
            } => write!(f, "{field} value {value:?} is not a valid date: {message}"),
        }
    }
}
