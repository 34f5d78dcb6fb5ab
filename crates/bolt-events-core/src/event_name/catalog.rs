//! Catalogue of the events fired by the Bolt admin interface.
//!
//! Producers and consumers are free to use any well-formed name; these
//! are the ones the admin UI itself fires.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::record::{EventRecord, SEGMENT_SEPARATOR};
use crate::error::{Error, Result};

/// Events fired by the admin interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KnownEvent {
    /// Before saving content
    ContentSaveStart,
    /// Content was saved successfully
    ContentSaveDone,
    /// Saving content failed
    ContentSaveFail,
    /// After saving content, failed or succeeded
    ContentSaveAlways,
    /// Before saving an edited file
    FileSaveStart,
    /// File was saved successfully
    FileSaveDone,
    /// Saving file failed
    FileSaveFail,
    /// After saving file, failed or succeeded
    FileSaveAlways,
    /// Request loading of the Google Maps API
    GoogleMapsApiLoadStart,
    /// Google Maps API loaded successfully
    GoogleMapsApiLoadDone,
    /// Loading the Google Maps API failed
    GoogleMapsApiLoadFail,
}

impl KnownEvent {
    /// Every catalogued event, in documentation order
    pub const ALL: [KnownEvent; 11] = [
        KnownEvent::ContentSaveStart,
        KnownEvent::ContentSaveDone,
        KnownEvent::ContentSaveFail,
        KnownEvent::ContentSaveAlways,
        KnownEvent::FileSaveStart,
        KnownEvent::FileSaveDone,
        KnownEvent::FileSaveFail,
        KnownEvent::FileSaveAlways,
        KnownEvent::GoogleMapsApiLoadStart,
        KnownEvent::GoogleMapsApiLoadDone,
        KnownEvent::GoogleMapsApiLoadFail,
    ];

    /// Literal event name
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownEvent::ContentSaveStart => "bolt>content>save>start",
            KnownEvent::ContentSaveDone => "bolt>content>save>done",
            KnownEvent::ContentSaveFail => "bolt>content>save>fail",
            KnownEvent::ContentSaveAlways => "bolt>content>save>always",
            KnownEvent::FileSaveStart => "bolt>file>save>start",
            KnownEvent::FileSaveDone => "bolt>file>save>done",
            KnownEvent::FileSaveFail => "bolt>file>save>fail",
            KnownEvent::FileSaveAlways => "bolt>file>save>always",
            KnownEvent::GoogleMapsApiLoadStart => "bolt>googlemapsapi>load>start",
            KnownEvent::GoogleMapsApiLoadDone => "bolt>googlemapsapi>load>done",
            KnownEvent::GoogleMapsApiLoadFail => "bolt>googlemapsapi>load>fail",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            KnownEvent::ContentSaveStart => "Before saving content",
            KnownEvent::ContentSaveDone => "Content was saved successfully",
            KnownEvent::ContentSaveFail => "Saving content failed",
            KnownEvent::ContentSaveAlways => "After saving content (failed or succeeded)",
            KnownEvent::FileSaveStart => "Before saving file",
            KnownEvent::FileSaveDone => "File was saved successfully",
            KnownEvent::FileSaveFail => "Saving file failed",
            KnownEvent::FileSaveAlways => "After saving file (failed or succeeded)",
            KnownEvent::GoogleMapsApiLoadStart => "Request loading API",
            KnownEvent::GoogleMapsApiLoadDone => "API loaded successfully",
            KnownEvent::GoogleMapsApiLoadFail => "Loading failed",
        }
    }

    /// Parsed form of the name
    pub fn record(&self) -> EventRecord {
        let mut segments = self.as_str().split(SEGMENT_SEPARATOR).map(str::to_string);
        EventRecord {
            namespace: segments.next().unwrap_or_default(),
            domain: segments.next(),
            event: segments.next(),
            status: segments.next(),
        }
    }
}

impl AsRef<str> for KnownEvent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for KnownEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KnownEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<EventRecord>()?;
        KnownEvent::ALL
            .into_iter()
            .find(|known| known.as_str() == s)
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}

impl TryFrom<String> for KnownEvent {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KnownEvent> for String {
    fn from(event: KnownEvent) -> Self {
        event.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventNameError;
    use crate::event_name::parse;

    #[test]
    fn test_catalogue_names_are_well_formed() {
        for known in KnownEvent::ALL {
            let record = parse(known.as_str());
            assert!(record.is_some(), "{} should parse", known);
            assert_eq!(record.as_ref(), Some(&known.record()));
            assert_eq!(known.record().depth(), 4);
            assert_eq!(known.record().namespace, "bolt");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "bolt>file>save>done".parse::<KnownEvent>(),
            Ok(KnownEvent::FileSaveDone)
        );
        assert_eq!(
            "bolt>file>save>later".parse::<KnownEvent>(),
            Err(Error::UnknownEvent("bolt>file>save>later".to_string()))
        );
        assert_eq!(
            "bolt>>save".parse::<KnownEvent>(),
            Err(Error::EventName(EventNameError::EmptySegment { position: 1 }))
        );
    }

    #[test]
    fn test_serde_uses_literal_name() {
        let json = serde_json::to_string(&KnownEvent::GoogleMapsApiLoadFail).expect("serialize");
        assert_eq!(json, "\"bolt>googlemapsapi>load>fail\"");
        let back: KnownEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, KnownEvent::GoogleMapsApiLoadFail);
    }
}
