//! Event, note and source views

use crate::element::ElementRef;
use crate::error::{Error, Result};
use crate::tag::{ElementKind, EventKind};
use std::ops::Deref;

/// A dated, placed event such as `BIRT` or `MARR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    element: ElementRef<'a>,
    kind: EventKind,
}

impl<'a> Event<'a> {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn date(&self) -> Option<&'a str> {
        self.element.child_value("DATE")
    }

    pub fn place(&self) -> Option<&'a str> {
        self.element.child_value("PLAC")
    }

    /// Free-form classification from `TYPE`
    pub fn event_type(&self) -> Option<&'a str> {
        self.element.child_value("TYPE")
    }

    pub fn sources(&self) -> Vec<Source<'a>> {
        sources_of(self.element)
    }
}

impl<'a> Deref for Event<'a> {
    type Target = ElementRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.element
    }
}

/// A `NOTE` whose text may continue over `CONT`/`CONC` children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note<'a>(ElementRef<'a>);

impl<'a> Note<'a> {
    /// The note's value joined with its continuations.
    ///
    /// `CONT` starts a new line, `CONC` appends directly. Any other child
    /// makes the text ambiguous and is an error.
    pub fn full_text(&self) -> Result<String> {
        let mut text = self.0.value().unwrap_or_default().to_string();
        for part in self.0.children() {
            match part.tag() {
                "CONT" => {
                    text.push('\n');
                    text.push_str(part.value().unwrap_or_default());
                }
                "CONC" => text.push_str(part.value().unwrap_or_default()),
                other => return Err(Error::InvalidNoteChild(other.to_string())),
            }
        }
        Ok(text)
    }
}

impl<'a> Deref for Note<'a> {
    type Target = ElementRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A `SOUR` citation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a>(ElementRef<'a>);

impl<'a> Source<'a> {
    pub fn page(&self) -> Option<&'a str> {
        self.0.child_value("PAGE")
    }

    /// `DATA.TEXT` of the citation
    pub fn data_text(&self) -> Option<&'a str> {
        self.0.child("DATA").and_then(|data| data.child_value("TEXT"))
    }
}

impl<'a> Deref for Source<'a> {
    type Target = ElementRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn sources_of(element: ElementRef<'_>) -> Vec<Source<'_>> {
    element
        .children_with_tag("SOUR")
        .into_iter()
        .map(Source)
        .collect()
}

impl<'a> ElementRef<'a> {
    pub fn as_event(&self) -> Option<Event<'a>> {
        match self.kind() {
            ElementKind::Event(kind) => Some(Event {
                element: *self,
                kind,
            }),
            _ => None,
        }
    }

    pub fn as_note(&self) -> Option<Note<'a>> {
        (self.kind() == ElementKind::Note).then(|| Note(*self))
    }

    pub fn as_source(&self) -> Option<Source<'a>> {
        (self.kind() == ElementKind::Source).then(|| Source(*self))
    }

    /// Full text of the first `NOTE` child, if any
    pub fn note(&self) -> Result<Option<String>> {
        self.child("NOTE")
            .and_then(|note| note.as_note())
            .map(|note| note.full_text())
            .transpose()
    }

    /// `SOUR` citations directly under this element
    pub fn sources(&self) -> Vec<Source<'a>> {
        sources_of(*self)
    }
}
