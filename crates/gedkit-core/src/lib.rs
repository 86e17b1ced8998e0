//! Gedkit Core - GEDCOM 5.5 documents and relationship search
//!
//! This crate parses GEDCOM text into an arena-backed [`Document`], exposes
//! typed views over its records, writes documents back out line for line,
//! and finds relationship paths between individuals.
//!
//! ```
//! use gedkit_core::{ancestor, Document};
//!
//! let doc: Document = "0 HEAD\n0 @I1@ INDI\n1 SEX M\n1 FAMS @F1@\n\
//!                      0 @I2@ INDI\n1 FAMC @F1@\n\
//!                      0 @F1@ FAM\n1 HUSB @I1@\n1 CHIL @I2@\n0 TRLR"
//!     .parse()?;
//!
//! let father = doc.get_by_id("@I1@").unwrap().id();
//! let child = doc.get_by_id("@I2@").unwrap().id();
//! let path = doc.relationship_path(child, father).unwrap();
//! assert_eq!(path, vec![child, father]);
//!
//! let fold = ancestor(&doc, &path).unwrap();
//! assert_eq!(fold.distance, 1);
//! assert_eq!(fold.direction, -0.5);
//! # Ok::<(), gedkit_core::Error>(())
//! ```

pub mod document;
pub mod element;
pub mod error;
pub mod family;
pub mod grammar;
pub mod individual;
pub mod limits;
pub mod parser;
pub mod record;
pub mod relationship;
pub mod tag;

#[cfg(test)]
mod fixtures;

pub use document::Document;
pub use element::{ElementId, ElementRecord, ElementRef, Lines, NewElement};
pub use error::{Error, Result};
pub use family::Family;
pub use individual::{Individual, PersonName};
pub use record::{Event, Note, Source};
pub use relationship::{
    ancestor, Ancestor, RelationshipEngine, RelationshipQuery, SearchResult, SearchStats,
};
pub use tag::{ElementKind, EventKind};
