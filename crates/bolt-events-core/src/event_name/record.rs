//! Event name parsing.
//!
//! An event name is one to four word segments joined by `>`:
//! `namespace[>domain[>event[>status]]]`. Matching is always performed
//! on the full literal string, the segments carry no routing meaning.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::EventNameError;

/// Separator between event name segments
pub const SEGMENT_SEPARATOR: char = '>';

/// Maximum number of segments in an event name
pub const MAX_SEGMENTS: usize = 4;

fn event_type_regex() -> &'static Regex {
    // ASCII word characters only; `\w` would accept any Unicode letter.
    static EVENT_TYPE_REGEX: OnceLock<Regex> = OnceLock::new();
    EVENT_TYPE_REGEX.get_or_init(|| {
        Regex::new(
            r"^([A-Za-z0-9_]+)(?:>([A-Za-z0-9_]+))?(?:>([A-Za-z0-9_]+))?(?:>([A-Za-z0-9_]+))?$",
        )
        .expect("invalid regex pattern")
    })
}

/// Parsed form of a valid event name
///
/// Fields beyond the number of supplied segments are `None`, never empty.
/// Deserialization runs the same grammar check as [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEventRecord")]
pub struct EventRecord {
    /// First segment, always present.
    pub namespace: String,
    /// Second segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Third segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Fourth segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Unchecked wire form of [`EventRecord`]
#[derive(Deserialize)]
struct RawEventRecord {
    namespace: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<RawEventRecord> for EventRecord {
    type Error = EventNameError;

    fn try_from(raw: RawEventRecord) -> Result<Self, Self::Error> {
        // A gap (e.g. `event` without `domain`) leaves an empty segment.
        let mut segments = vec![raw.namespace];
        let trailing = [raw.domain, raw.event, raw.status];
        let supplied = trailing.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        segments.extend(
            trailing
                .into_iter()
                .take(supplied)
                .map(Option::unwrap_or_default),
        );
        segments.join(">").parse()
    }
}

impl EventRecord {
    /// Number of segments the name was made of (1 to 4)
    pub fn depth(&self) -> usize {
        1 + [&self.domain, &self.event, &self.status]
            .iter()
            .take_while(|segment| segment.is_some())
            .count()
    }

    /// Segments in order, stopping at the first absent one
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.namespace.as_str()).chain(
            [&self.domain, &self.event, &self.status]
                .into_iter()
                .map_while(|segment| segment.as_deref()),
        )
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                write!(f, "{}", SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Parse an event name
///
/// Returns `None` for anything that does not match the grammar. Callers
/// treat `None` as "do nothing", not as an error to report.
pub fn parse(raw: &str) -> Option<EventRecord> {
    let captures = event_type_regex().captures(raw)?;
    let segment = |i: usize| captures.get(i).map(|m| m.as_str().to_string());

    Some(EventRecord {
        namespace: segment(1)?,
        domain: segment(2),
        event: segment(3),
        status: segment(4),
    })
}

/// Check whether `raw` is a well-formed event name
pub fn is_valid(raw: &str) -> bool {
    event_type_regex().is_match(raw)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl FromStr for EventRecord {
    type Err = EventNameError;

    /// Parse with a reason on failure. Accepts exactly the strings
    /// [`parse`] accepts.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(EventNameError::Empty);
        }

        let segments: Vec<&str> = raw.split(SEGMENT_SEPARATOR).collect();
        if segments.len() > MAX_SEGMENTS {
            return Err(EventNameError::TooManySegments {
                count: segments.len(),
            });
        }

        for (position, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(EventNameError::EmptySegment { position });
            }
            if let Some(character) = segment.chars().find(|c| !is_word_char(*c)) {
                return Err(EventNameError::InvalidCharacter {
                    position,
                    character,
                });
            }
        }

        let mut owned = segments.into_iter().map(str::to_string);
        Ok(EventRecord {
            namespace: owned.next().unwrap_or_default(),
            domain: owned.next(),
            event: owned.next(),
            status: owned.next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        let record = parse("bolt>content>save>done").expect("valid name");
        assert_eq!(record.namespace, "bolt");
        assert_eq!(record.domain.as_deref(), Some("content"));
        assert_eq!(record.event.as_deref(), Some("save"));
        assert_eq!(record.status.as_deref(), Some("done"));
        assert_eq!(record.depth(), 4);
    }

    #[test]
    fn test_parse_partial_names_leave_trailing_fields_absent() {
        let record = parse("bolt").expect("valid name");
        assert_eq!(record.namespace, "bolt");
        assert!(record.domain.is_none());
        assert!(record.event.is_none());
        assert!(record.status.is_none());

        let record = parse("x>y").expect("valid name");
        assert_eq!(record.domain.as_deref(), Some("y"));
        assert!(record.event.is_none());
        assert_eq!(record.depth(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for raw in [
            "",
            ">",
            ">bolt",
            "bolt>",
            "bolt>>save",
            "a>b>c>d>e",
            "not a valid event!!",
            "bolt>con-tent",
            "bolt>content\n",
            "bölt>content",
        ] {
            assert!(parse(raw).is_none(), "{:?} should be rejected", raw);
            assert!(!is_valid(raw));
        }
    }

    #[test]
    fn test_display_reassembles_name() {
        for raw in ["bolt", "bolt>file", "bolt>file>save", "bolt>file>save>fail"] {
            let record = parse(raw).expect("valid name");
            assert_eq!(record.to_string(), raw);
        }
    }

    #[test]
    fn test_segments() {
        let record = parse("a_1>B2>c").expect("valid name");
        assert_eq!(record.segments().collect::<Vec<_>>(), vec!["a_1", "B2", "c"]);
    }

    #[test]
    fn test_from_str_reasons() {
        assert_eq!("".parse::<EventRecord>(), Err(EventNameError::Empty));
        assert_eq!(
            "a>>b".parse::<EventRecord>(),
            Err(EventNameError::EmptySegment { position: 1 })
        );
        assert_eq!(
            "a>b>".parse::<EventRecord>(),
            Err(EventNameError::EmptySegment { position: 2 })
        );
        assert_eq!(
            "a>b c".parse::<EventRecord>(),
            Err(EventNameError::InvalidCharacter {
                position: 1,
                character: ' '
            })
        );
        assert_eq!(
            "a>b>c>d>e".parse::<EventRecord>(),
            Err(EventNameError::TooManySegments { count: 5 })
        );
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let record = parse("bolt>file").expect("valid name");
        let json = serde_json::to_value(&record).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({ "namespace": "bolt", "domain": "file" })
        );
    }

    #[test]
    fn test_deserialize_checks_grammar() {
        let record: EventRecord =
            serde_json::from_str(r#"{"namespace":"bolt","domain":"file"}"#).expect("valid record");
        assert_eq!(record, parse("bolt>file").expect("valid name"));

        let bad_segment = serde_json::from_str::<EventRecord>(r#"{"namespace":"a b"}"#);
        assert!(bad_segment.is_err());

        let gap = serde_json::from_str::<EventRecord>(r#"{"namespace":"a","event":"x"}"#);
        assert!(gap.is_err());

        let empty = serde_json::from_str::<EventRecord>(r#"{"namespace":"a","domain":""}"#);
        assert!(empty.is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_segment() -> impl Strategy<Value = String> {
            "[A-Za-z0-9_]{1,8}"
        }

        proptest! {
            #[test]
            fn valid_names_split_into_fields(
                segments in proptest::collection::vec(arb_segment(), 1..=4)
            ) {
                let raw = segments.join(">");
                let record = parse(&raw);
                prop_assert!(record.is_some());
                let record = record.unwrap();
                prop_assert_eq!(record.segments().collect::<Vec<_>>(), segments.iter().map(String::as_str).collect::<Vec<_>>());
                prop_assert_eq!(record.depth(), segments.len());
            }

            #[test]
            fn more_than_four_segments_rejected(
                segments in proptest::collection::vec(arb_segment(), 5..8)
            ) {
                prop_assert!(parse(&segments.join(">")).is_none());
            }

            #[test]
            fn from_str_agrees_with_parse(raw in "[a-c_>!\\- ]{0,12}") {
                prop_assert_eq!(parse(&raw), raw.parse::<EventRecord>().ok());
            }
        }
    }
}
