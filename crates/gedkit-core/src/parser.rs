//! Text to document assembly
//!
//! Lines are decoded by [`crate::grammar`] and attached under the most recent
//! open element one level up. The stack of open elements is indexed by level,
//! so a line at level `L` closes every subtree at `L` or deeper.

use crate::document::Document;
use crate::element::{ElementId, NewElement};
use crate::error::{Error, Result};
use crate::grammar::{parse_line, starts_at_level_zero};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

const SYNTHETIC_HEADER: &str = "0 HEAD";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Incremental builder fed one line at a time
pub(crate) struct DocumentBuilder {
    document: Document,
    open: Vec<ElementId>,
    seen_first: bool,
}

impl DocumentBuilder {
    pub(crate) fn new() -> Self {
        Self {
            document: Document::new(),
            open: Vec::new(),
            seen_first: false,
        }
    }

    /// Consume one raw line; `number` is 1-based and used for error reporting
    pub(crate) fn push_line(&mut self, number: usize, raw: &str) -> Result<()> {
        let mut line = raw.trim();
        if !self.seen_first {
            line = line.trim_start_matches(BYTE_ORDER_MARK).trim();
        }
        if line.is_empty() {
            return Ok(());
        }

        if !self.seen_first {
            self.seen_first = true;
            if !starts_at_level_zero(line) {
                tracing::warn!(
                    "Line {} does not start at level 0, substituting {:?}",
                    number,
                    SYNTHETIC_HEADER
                );
                line = SYNTHETIC_HEADER;
            }
        }

        let parsed = parse_line(line).ok_or_else(|| Error::Grammar {
            line: number,
            content: line.to_string(),
        })?;

        let level = parsed.level as usize;
        self.open.truncate(level);
        let parent = if level == 0 {
            None
        } else if self.open.len() < level {
            return Err(Error::MissingParent {
                line: number,
                level: parsed.level,
            });
        } else {
            Some(self.open[level - 1])
        };

        let mut draft = NewElement::new(parsed.tag).with_level(parsed.level);
        draft.value = parsed.value;
        draft.id = parsed.id;
        draft.parent = parent;

        let id = self.document.create(draft)?;
        self.document.add_element(id)?;
        self.open.push(id);
        Ok(())
    }

    pub(crate) fn finish(self) -> Document {
        tracing::debug!(
            "Parsed {} elements into {} records",
            self.document.element_count(),
            self.document.roots().count()
        );
        self.document
    }
}

impl Document {
    /// Parse a complete GEDCOM text
    pub fn parse_str(text: &str) -> Result<Self> {
        let mut builder = DocumentBuilder::new();
        for (index, line) in text.lines().enumerate() {
            builder.push_line(index + 1, line)?;
        }
        Ok(builder.finish())
    }

    /// Parse from any buffered reader, line by line
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = DocumentBuilder::new();
        for (index, line) in reader.lines().enumerate() {
            builder.push_line(index + 1, &line?)?;
        }
        Ok(builder.finish())
    }

    /// Parse the file at `path`
    pub fn parse_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading GEDCOM file {:?}", path);
        let file = File::open(path)?;
        Self::parse_reader(BufReader::new(file))
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}
