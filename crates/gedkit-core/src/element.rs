//! Element tree types
//!
//! Elements live in their [`Document`]'s arena and refer to each other by
//! [`ElementId`]. Reading happens through [`ElementRef`], a borrowed view that
//! pairs an id with its document; all mutation goes through `Document`.

use crate::document::Document;
use crate::grammar::encode_line;
use crate::tag::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an element inside its document's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena slot for one GEDCOM element
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) kind: ElementKind,
    /// `None` until the element is parsed with a level, registered, or normalized
    pub(crate) level: Option<u32>,
    pub(crate) tag: String,
    pub(crate) value: Option<String>,
    /// Cross-reference token including its `@` delimiters
    pub(crate) xref: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) registered: bool,
}

/// Data for creating a new element
///
/// The kind defaults to the one registered for `tag`. A kind with a fixed tag
/// rejects any other tag; leaving the tag out uses the kind's own.
#[derive(Debug, Clone, Default)]
pub struct NewElement {
    pub kind: Option<ElementKind>,
    pub tag: Option<String>,
    pub level: Option<u32>,
    pub value: Option<String>,
    pub id: Option<String>,
    pub parent: Option<ElementId>,
}

impl NewElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn of_kind(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Borrowed view of one element in a document
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: ElementId,
}

impl<'a> ElementRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: ElementId) -> Self {
        Self { doc, id }
    }

    fn element(&self) -> &'a Element {
        self.doc.node(self.id)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn kind(&self) -> ElementKind {
        self.element().kind
    }

    pub fn level(&self) -> Option<u32> {
        self.element().level
    }

    pub fn tag(&self) -> &'a str {
        &self.element().tag
    }

    pub fn value(&self) -> Option<&'a str> {
        self.element().value.as_deref()
    }

    /// The element's own cross-reference id, e.g. `@I1@`
    pub fn xref(&self) -> Option<&'a str> {
        self.element().xref.as_deref()
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.element().parent.map(|id| Self::new(self.doc, id))
    }

    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        self.element()
            .children
            .iter()
            .map(move |&id| ElementRef::new(doc, id))
    }

    /// All children with this tag, in document order (zero, one or many)
    pub fn children_with_tag(&self, tag: &str) -> Vec<ElementRef<'a>> {
        self.children().filter(|c| c.tag() == tag).collect()
    }

    /// First child with this tag
    pub fn child(&self, tag: &str) -> Option<ElementRef<'a>> {
        self.children().find(|c| c.tag() == tag)
    }

    /// Value of the first child with this tag
    pub fn child_value(&self, tag: &str) -> Option<&'a str> {
        self.child(tag).and_then(|c| c.value())
    }

    /// True if at least one child has this tag
    pub fn contains(&self, tag: &str) -> bool {
        self.children().any(|c| c.tag() == tag)
    }

    /// Follow this element's value as a pointer into the document
    pub fn resolve(&self) -> Option<ElementRef<'a>> {
        self.value().and_then(|xref| self.doc.get_by_id(xref))
    }

    /// Encoded lines for this element and its subtree, depth first.
    ///
    /// Each call starts a fresh traversal. Elements whose level was never
    /// set render as level 0; normalize levels first for meaningful output.
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            doc: self.doc,
            stack: vec![self.id],
        }
    }

    /// Owned snapshot of this subtree
    pub fn to_record(&self) -> ElementRecord {
        ElementRecord {
            level: self.level(),
            tag: self.tag().to_string(),
            id: self.xref().map(str::to_string),
            value: self.value().map(str::to_string),
            children: self.children().map(|c| c.to_record()).collect(),
        }
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind() {
            ElementKind::Event(event) => format!("{:?}", event),
            kind => format!("{:?}", kind),
        };
        let mut tuple = f.debug_tuple(&name);
        match self.level() {
            Some(level) => tuple.field(&level),
            None => tuple.field(&format_args!("None")),
        };
        tuple.field(&self.tag());
        if let Some(xref) = self.xref() {
            tuple.field(&xref);
        }
        if let Some(value) = self.value().filter(|v| !v.is_empty()) {
            tuple.field(&value);
        }
        let children: Vec<_> = self.children().collect();
        if !children.is_empty() {
            tuple.field(&children);
        }
        tuple.finish()
    }
}

/// Depth-first, pre-order iterator over encoded lines
pub struct Lines<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let id = self.stack.pop()?;
        let element = self.doc.node(id);
        self.stack.extend(element.children.iter().rev().copied());
        Some(encode_line(
            element.level.unwrap_or_default(),
            element.xref.as_deref(),
            &element.tag,
            element.value.as_deref(),
        ))
    }
}

/// Serializable snapshot of an element subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub level: Option<u32>,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::WIKIPEDIA_SAMPLE;

    #[test]
    fn test_child_lookup_shapes() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let bob = doc.get_by_id("@I1@").unwrap();

        assert!(bob.children_with_tag("BIRT").is_empty());
        assert_eq!(bob.children_with_tag("SEX").len(), 1);
        assert_eq!(bob.children_with_tag("NAME").len(), 3);

        assert_eq!(bob.child("NAME").unwrap().value(), Some("Robert /Cox/"));
        assert_eq!(bob.child_value("SEX"), Some("M"));
        assert!(bob.child("BIRT").is_none());
    }

    #[test]
    fn test_contains() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let bob = doc.get_by_id("@I1@").unwrap();

        assert!(bob.contains("FAMS"));
        assert!(!bob.contains("FAMC"));
    }

    #[test]
    fn test_parent_links() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let bob = doc.get_by_id("@I1@").unwrap();
        let chan = bob.child("CHAN").unwrap();
        let date = chan.child("DATE").unwrap();

        assert_eq!(date.parent(), Some(chan));
        assert_eq!(chan.parent(), Some(bob));
        assert!(bob.parent().is_none());
    }

    #[test]
    fn test_resolve_pointer() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let family = doc.get_by_id("@F1@").unwrap();

        let husband = family.child("HUSB").unwrap().resolve().unwrap();
        assert_eq!(husband.xref(), Some("@I1@"));
        assert_eq!(husband.kind(), ElementKind::Individual);

        let dangling = Document::parse_str("0 HEAD\n0 @F1@ FAM\n1 HUSB @I404@\n0 TRLR").unwrap();
        let husb = dangling.get_by_id("@F1@").unwrap().child("HUSB").unwrap();
        assert!(husb.resolve().is_none());
    }

    #[test]
    fn test_lines_are_restartable() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let family = doc.get_by_id("@F1@").unwrap();

        let first: Vec<String> = family.lines().collect();
        let second: Vec<String> = family.lines().collect();
        assert_eq!(
            first,
            vec![
                "0 @F1@ FAM",
                "1 HUSB @I1@",
                "1 WIFE @I2@",
                "1 MARR",
                "1 CHIL @I3@"
            ]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_lines_are_pre_order() {
        let doc = Document::parse_str("0 HEAD\n0 @I1@ INDI\n1 BIRT\n2 DATE 1980\n2 PLAC London\n1 SEX M\n0 TRLR").unwrap();
        let lines: Vec<String> = doc.get_by_id("@I1@").unwrap().lines().collect();
        assert_eq!(
            lines,
            vec!["0 @I1@ INDI", "1 BIRT", "2 DATE 1980", "2 PLAC London", "1 SEX M"]
        );
    }

    #[test]
    fn test_record_snapshot() {
        let doc = Document::parse_str("0 HEAD\n0 @I1@ INDI\n1 SEX M\n0 TRLR").unwrap();
        let record = doc.get_by_id("@I1@").unwrap().to_record();

        assert_eq!(record.level, Some(0));
        assert_eq!(record.tag, "INDI");
        assert_eq!(record.id.as_deref(), Some("@I1@"));
        assert_eq!(record.children.len(), 1);
        assert_eq!(record.children[0].value.as_deref(), Some("M"));
    }

    #[test]
    fn test_debug_output() {
        let doc = Document::parse_str("0 HEAD\n0 @I1@ INDI\n1 SEX M\n0 TRLR").unwrap();
        let indi = doc.get_by_id("@I1@").unwrap();
        assert_eq!(
            format!("{:?}", indi),
            r#"Individual(0, "INDI", "@I1@", [Sex(1, "SEX", "M")])"#
        );
    }
}
