//! # Event Names
//!
//! Grammar, parser and the catalogue of known event names.
//!
//! Event names look like `namespace>domain>event>status`; the trailing
//! segments are optional, so `bolt`, `bolt>file` and `bolt>file>save`
//! are all valid. Each segment is one or more of `[A-Za-z0-9_]`.
//!
//! ```rust
//! use bolt_events_core::event_name::parse;
//!
//! let record = parse("bolt>content>save>done").unwrap();
//! assert_eq!(record.namespace, "bolt");
//! assert_eq!(record.status.as_deref(), Some("done"));
//!
//! assert!(parse("bolt>>save").is_none());
//! ```

mod catalog;
mod record;

pub use catalog::*;
pub use record::*;
