//! Error handling for bolt-events
//!
//! The broker itself never surfaces errors: malformed event names are
//! dropped silently. These types exist for the diagnostic surfaces
//! (`EventRecord::from_str`, the known-event catalogue, tooling).
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Reason an event name does not match `namespace[>domain[>event[>status]]]`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventNameError {
    /// The name is the empty string
    #[error("Event name is empty")]
    Empty,

    /// Two separators are adjacent, or the name starts or ends with one
    #[error("Segment {position} of the event name is empty")]
    EmptySegment {
        /// Zero-based index of the empty segment.
        position: usize,
    },

    /// A segment contains something other than `[A-Za-z0-9_]`
    #[error("Invalid character {character:?} in segment {position}")]
    InvalidCharacter {
        /// Zero-based index of the offending segment.
        position: usize,
        /// The first character that is not a word character.
        character: char,
    },

    /// More than four segments were supplied
    #[error("Event name has {count} segments, at most 4 are allowed")]
    TooManySegments {
        /// Number of segments found.
        count: usize,
    },
}

/// Main error type for bolt-events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed event name
    #[error(transparent)]
    EventName(#[from] EventNameError),

    /// Well-formed name that is not part of the known-event catalogue
    #[error("Unknown event: {0}")]
    UnknownEvent(String),
}

/// Result type for bolt-events operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_error_display() {
        assert_eq!(EventNameError::Empty.to_string(), "Event name is empty");
        assert_eq!(
            EventNameError::InvalidCharacter {
                position: 1,
                character: '-'
            }
            .to_string(),
            "Invalid character '-' in segment 1"
        );
    }

    #[test]
    fn test_error_from_event_name_error() {
        let err: Error = EventNameError::TooManySegments { count: 5 }.into();
        assert!(matches!(err, Error::EventName(_)));
        assert_eq!(
            err.to_string(),
            "Event name has 5 segments, at most 4 are allowed"
        );
    }
}
