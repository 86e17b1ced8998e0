//! GEDCOM document: element arena, pointer table and serialization

use crate::element::{Element, ElementId, ElementRecord, ElementRef, NewElement};
use crate::error::{Error, Result};
use crate::family::Family;
use crate::individual::Individual;
use crate::limits::MAX_ID_ATTEMPTS;
use crate::tag::ElementKind;
use std::collections::HashMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Name written into generated headers
pub const SOURCE_NAME: &str = "gedkit";

/// Version written into generated headers
pub const SOURCE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An in-memory GEDCOM document
///
/// The document owns every element it creates. Elements reference each other
/// and their parent by [`ElementId`], so there are no ownership cycles. Ids
/// are only meaningful for the document that issued them; passing an id from
/// another document panics or yields an unrelated element.
#[derive(Clone)]
pub struct Document {
    nodes: Vec<Element>,
    roots: Vec<ElementId>,
    pointers: HashMap<String, ElementId>,
    next_free_id: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            pointers: HashMap::new(),
            next_free_id: 1,
        }
    }

    pub(crate) fn node(&self, id: ElementId) -> &Element {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.index()]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// View of an element created by this document
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this document.
    pub fn get(&self, id: ElementId) -> ElementRef<'_> {
        assert!(id.index() < self.nodes.len(), "element {} not in document", id);
        ElementRef::new(self, id)
    }

    /// Element registered under a cross-reference id such as `@I1@`
    pub fn get_by_id(&self, xref: &str) -> Option<ElementRef<'_>> {
        self.pointers.get(xref).map(|&id| ElementRef::new(self, id))
    }

    /// Number of elements in the arena, attached or not
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.roots.iter().map(move |&id| ElementRef::new(self, id))
    }

    /// Root records that are individuals
    pub fn individuals(&self) -> impl Iterator<Item = Individual<'_>> + '_ {
        self.roots().filter_map(|root| root.as_individual())
    }

    /// Root records that are families
    pub fn families(&self) -> impl Iterator<Item = Family<'_>> + '_ {
        self.roots().filter_map(|root| root.as_family())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element for `tag`, with no level, value or id
    pub fn element(&mut self, tag: &str) -> ElementId {
        self.push(Element {
            kind: ElementKind::for_tag(tag),
            level: None,
            tag: tag.to_string(),
            value: None,
            xref: None,
            parent: None,
            children: Vec::new(),
            registered: false,
        })
    }

    /// Create an element from a builder, attaching it to `draft.parent` if given.
    ///
    /// The element is not registered; see [`Document::add_element`].
    pub fn create(&mut self, draft: NewElement) -> Result<ElementId> {
        let kind = draft.kind.unwrap_or_else(|| {
            draft.tag
                .as_deref()
                .map(ElementKind::for_tag)
                .unwrap_or_default()
        });

        let tag = match (kind.canonical_tag(), draft.tag) {
            (Some(expected), Some(found)) if found != expected => {
                return Err(Error::TagMismatch { expected, found });
            }
            (Some(expected), _) => expected.to_string(),
            (None, Some(tag)) => tag,
            (None, None) => {
                return Err(Error::Type("generic element needs a tag".to_string()));
            }
        };

        let id = self.push(Element {
            kind,
            level: draft.level,
            tag,
            value: draft.value,
            xref: draft.id,
            parent: None,
            children: Vec::new(),
            registered: false,
        });

        if let Some(parent) = draft.parent {
            self.add_child(parent, id);
        }
        Ok(id)
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(element);
        id
    }

    /// Append `child` to `parent`'s children. Levels are left untouched.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn set_value(&mut self, id: ElementId, value: Option<String>) {
        self.node_mut(id).value = value;
    }

    /// Give every descendant of `id` the level of its parent plus one.
    ///
    /// Fails if `id` itself has no level.
    pub fn set_levels_downward(&mut self, id: ElementId) -> Result<()> {
        let level = self.node(id).level.ok_or_else(|| {
            Error::InvalidLevel(format!(
                "{} element {} has no level to normalize from",
                self.node(id).tag,
                id
            ))
        })?;
        self.normalize_from(id, level);
        Ok(())
    }

    fn normalize_from(&mut self, id: ElementId, level: u32) {
        self.node_mut(id).level = Some(level);
        let mut stack = vec![(id, level)];
        while let Some((current, level)) = stack.pop() {
            let children = self.node(current).children.clone();
            for child in children {
                self.node_mut(child).level = Some(level + 1);
                stack.push((child, level + 1));
            }
        }
    }

    /// Register an element with this document.
    ///
    /// An element without a level must be an individual or family record; it
    /// becomes a level 0 root with normalized descendants and a fresh id. An
    /// element that already has a level is recorded as is: in the pointer
    /// table if it has an id, and among the roots if its level is 0.
    pub fn add_element(&mut self, id: ElementId) -> Result<()> {
        if self.node(id).registered {
            return Ok(());
        }

        if self.node(id).level.is_none() {
            let node = self.node(id);
            let prefix = match (node.kind, node.tag.as_str()) {
                (ElementKind::Individual, _) | (_, "INDI") => 'I',
                (ElementKind::Family, _) | (_, "FAM") => 'F',
                _ => {
                    return Err(Error::Type(format!(
                        "only INDI or FAM records can be added without a level, got {}",
                        node.tag
                    )));
                }
            };
            self.normalize_from(id, 0);
            let xref = self.allocate_xref(prefix)?;
            tracing::debug!("Allocated id {} for new {} record", xref, self.node(id).tag);
            self.node_mut(id).xref = Some(xref);
        }

        if let Some(xref) = self.node(id).xref.clone() {
            if self.pointers.contains_key(&xref) {
                return Err(Error::DuplicateId(xref));
            }
            self.pointers.insert(xref, id);
        }
        if self.node(id).level == Some(0) {
            self.roots.push(id);
        }
        self.node_mut(id).registered = true;
        Ok(())
    }

    fn allocate_xref(&mut self, prefix: char) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = format!("@{}{}@", prefix, self.next_free_id);
            self.next_free_id += 1;
            if !self.pointers.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::ExhaustedIdSpace {
            prefix,
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Create and register a new individual record
    pub fn individual(&mut self) -> Result<ElementId> {
        let id = self.create(NewElement::of_kind(ElementKind::Individual))?;
        self.add_element(id)?;
        Ok(id)
    }

    /// Create and register a new family record
    pub fn family(&mut self) -> Result<ElementId> {
        let id = self.create(NewElement::of_kind(ElementKind::Family))?;
        self.add_element(id)?;
        Ok(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a HEAD root first and a TRLR root last unless already present
    pub fn ensure_header_trailer(&mut self) -> Result<()> {
        if self.roots.first().map(|&id| self.node(id).tag.as_str()) != Some("HEAD") {
            let head = self.create(NewElement::new("HEAD").with_level(0))?;

            let source = self.create(NewElement::new("SOUR").with_parent(head))?;
            self.create(
                NewElement::new("NAME")
                    .with_value(SOURCE_NAME)
                    .with_parent(source),
            )?;
            self.create(
                NewElement::new("VERS")
                    .with_value(SOURCE_VERSION)
                    .with_parent(source),
            )?;
            self.create(NewElement::new("CHAR").with_value("UTF-8").with_parent(head))?;

            let format = self.create(NewElement::new("GEDC").with_parent(head))?;
            self.create(NewElement::new("VERS").with_value("5.5").with_parent(format))?;
            self.create(
                NewElement::new("FORM")
                    .with_value("LINEAGE-LINKED")
                    .with_parent(format),
            )?;

            self.set_levels_downward(head)?;
            self.roots.insert(0, head);
        }

        if self.roots.last().map(|&id| self.node(id).tag.as_str()) != Some("TRLR") {
            let trailer = self.create(NewElement::new("TRLR").with_level(0))?;
            self.roots.push(trailer);
        }
        Ok(())
    }

    /// Set every root to level 0 and renumber all descendants
    pub fn ensure_levels(&mut self) {
        for root in self.roots.clone() {
            self.normalize_from(root, 0);
        }
    }

    /// Encoded lines of every root, in order, without any normalization
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.roots().flat_map(|root| root.lines())
    }

    /// Add header/trailer if missing, normalize levels, then encode all lines
    pub fn gedcom_lines(&mut self) -> Result<impl Iterator<Item = String> + '_> {
        self.ensure_header_trailer()?;
        self.ensure_levels();
        Ok(self.lines())
    }

    /// The whole document as text, lines joined by `\n`
    pub fn gedcom_string(&mut self) -> Result<String> {
        Ok(self.gedcom_lines()?.collect::<Vec<_>>().join("\n"))
    }

    /// Write the document, each line terminated by `\n`
    pub fn save<W: Write>(&mut self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        for line in self.gedcom_lines()? {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the document to `path`, refusing to replace an existing file
    /// unless `overwrite` is set
    pub fn save_to_path(&mut self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options.open(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::DestinationExists(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        tracing::debug!("Saving document to {:?}", path);
        self.save(file)
    }

    /// Owned snapshots of every root
    pub fn records(&self) -> Vec<ElementRecord> {
        self.roots().map(|root| root.to_record()).collect()
    }

    /// Pretty JSON rendering of [`Document::records`]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records())?)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.roots()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::WIKIPEDIA_SAMPLE;
    use tempfile::TempDir;

    fn header_lines() -> String {
        format!(
            "0 HEAD\n1 SOUR\n2 NAME {}\n2 VERS {}\n1 CHAR UTF-8\n1 GEDC\n2 VERS 5.5\n2 FORM LINEAGE-LINKED",
            SOURCE_NAME, SOURCE_VERSION
        )
    }

    #[test]
    fn test_empty_document_serializes_header_and_trailer() {
        let mut doc = Document::new();
        assert_eq!(
            doc.gedcom_string().unwrap(),
            format!("{}\n0 TRLR", header_lines())
        );
    }

    #[test]
    fn test_create_records_allocates_ids() {
        let mut doc = Document::new();
        let individual = doc.individual().unwrap();
        doc.set_sex(individual, "M").unwrap();
        let family = doc.family().unwrap();

        let indi = doc.get(individual);
        assert_eq!(indi.level(), Some(0));
        assert_eq!(indi.tag(), "INDI");
        assert_eq!(indi.xref(), Some("@I1@"));
        assert_eq!(doc.get(family).xref(), Some("@F2@"));
        assert_eq!(doc.individuals().next().unwrap().id(), individual);

        assert_eq!(
            doc.gedcom_string().unwrap(),
            format!(
                "{}\n0 @I1@ INDI\n1 SEX M\n0 @F2@ FAM\n0 TRLR",
                header_lines()
            )
        );
    }

    #[test]
    fn test_register_raw_elements() {
        let mut doc = Document::new();

        let raw_individual = doc.element("INDI");
        doc.add_element(raw_individual).unwrap();
        assert_eq!(doc.get(raw_individual).xref(), Some("@I1@"));

        let raw_family = doc.element("FAM");
        doc.add_element(raw_family).unwrap();
        assert_eq!(doc.get(raw_family).xref(), Some("@F2@"));

        let generic_indi = doc
            .create(NewElement::of_kind(ElementKind::Generic).with_tag("INDI"))
            .unwrap();
        doc.add_element(generic_indi).unwrap();
        assert_eq!(doc.get(generic_indi).xref(), Some("@I3@"));
    }

    #[test]
    fn test_only_records_can_be_added_without_level() {
        let mut doc = Document::new();
        let title = doc.element("TITL");
        assert!(matches!(doc.add_element(title), Err(Error::Type(_))));
        assert_eq!(doc.roots().count(), 0);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut doc = Document::new();
        let first = doc.element("INDI");
        let second = doc.element("INDI");
        assert!(doc.get(first).xref().is_none());

        doc.add_element(first).unwrap();
        doc.add_element(second).unwrap();
        assert_eq!(doc.get(first).xref(), Some("@I1@"));
        assert_eq!(doc.get(second).xref(), Some("@I2@"));
    }

    #[test]
    fn test_id_allocation_skips_taken_ids() {
        let mut doc =
            Document::parse_str("0 HEAD\n0 @I1@ INDI\n1 NAME\n2 GIVN Bob\n2 SURN Cox\n\n0 TRLR")
                .unwrap();
        let individual = doc.element("INDI");
        doc.add_element(individual).unwrap();
        assert_eq!(doc.get(individual).xref(), Some("@I2@"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        for _ in 0..5 {
            doc.individual().unwrap();
            doc.family().unwrap();
        }

        let mut seen = std::collections::HashSet::new();
        for index in 0..doc.element_count() {
            if let Some(xref) = doc.get(ElementId(index as u32)).xref() {
                assert!(seen.insert(xref.to_string()), "duplicate id {}", xref);
            }
        }
        assert_eq!(seen.len(), 4 + 10);
    }

    #[test]
    fn test_duplicate_explicit_id_is_rejected() {
        let mut doc = Document::new();
        let first = doc
            .create(NewElement::new("INDI").with_level(0).with_id("@I1@"))
            .unwrap();
        doc.add_element(first).unwrap();

        let second = doc
            .create(NewElement::new("INDI").with_level(0).with_id("@I1@"))
            .unwrap();
        assert!(matches!(doc.add_element(second), Err(Error::DuplicateId(id)) if id == "@I1@"));
        assert_eq!(doc.get_by_id("@I1@").unwrap().id(), first);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut doc = Document::new();
        let individual = doc.individual().unwrap();
        doc.add_element(individual).unwrap();
        assert_eq!(doc.roots().count(), 1);
    }

    #[test]
    fn test_tag_mismatch() {
        let mut doc = Document::new();
        let result = doc.create(NewElement::of_kind(ElementKind::Individual).with_tag("FAM"));
        assert!(matches!(
            result,
            Err(Error::TagMismatch { expected: "INDI", ref found }) if found == "FAM"
        ));
    }

    #[test]
    fn test_generic_element_needs_tag() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.create(NewElement::of_kind(ElementKind::Generic)),
            Err(Error::Type(_))
        ));
    }

    #[test]
    fn test_factory_dispatches_on_tag() {
        let mut doc = Document::new();
        let birth = doc.create(NewElement::new("BIRT")).unwrap();
        let custom = doc.create(NewElement::new("_MILT")).unwrap();
        assert_eq!(
            doc.get(birth).kind(),
            ElementKind::Event(crate::tag::EventKind::Birth)
        );
        assert_eq!(doc.get(custom).kind(), ElementKind::Generic);
    }

    #[test]
    fn test_set_levels_downward_requires_level() {
        let mut doc = Document::new();
        let individual = doc.element("INDI");
        assert!(matches!(
            doc.set_levels_downward(individual),
            Err(Error::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_add_child_does_not_renumber() {
        let mut doc = Document::new();
        let parent = doc.create(NewElement::new("BIRT").with_level(1)).unwrap();
        let child = doc.element("DATE");
        doc.add_child(parent, child);

        assert_eq!(doc.get(child).parent().unwrap().id(), parent);
        assert!(doc.get(child).level().is_none());

        doc.set_levels_downward(parent).unwrap();
        assert_eq!(doc.get(child).level(), Some(2));
    }

    #[test]
    fn test_level_invariant_after_normalization() {
        let mut doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let individual = doc.individual().unwrap();
        let name = doc.element("NAME");
        let given = doc.element("GIVN");
        doc.add_child(individual, name);
        doc.add_child(name, given);
        doc.ensure_levels();

        for root in doc.roots() {
            assert_eq!(root.level(), Some(0));
            let mut stack = vec![root];
            while let Some(element) = stack.pop() {
                for child in element.children() {
                    assert_eq!(child.level(), element.level().map(|l| l + 1));
                    stack.push(child);
                }
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let mut doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        let mut output = Vec::new();
        doc.save(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), WIKIPEDIA_SAMPLE);

        assert_eq!(
            doc.gedcom_string().unwrap(),
            WIKIPEDIA_SAMPLE.trim_end_matches('\n')
        );
    }

    #[test]
    fn test_missing_trailer_is_appended() {
        let mut doc = Document::parse_str("0 HEAD\n0 @I1@ INDI").unwrap();
        assert_eq!(doc.gedcom_string().unwrap(), "0 HEAD\n0 @I1@ INDI\n0 TRLR");
    }

    #[test]
    fn test_filtered_views() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        assert_eq!(doc.individuals().count(), 3);
        assert_eq!(doc.families().count(), 1);
        assert_eq!(doc.roots().count(), 6);
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();
        assert!(doc.get_by_id("@I999@").is_none());
    }

    #[test]
    fn test_save_to_path_respects_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tree.ged");
        let mut doc = Document::parse_str(WIKIPEDIA_SAMPLE).unwrap();

        doc.save_to_path(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), WIKIPEDIA_SAMPLE);

        let result = doc.save_to_path(&path, false);
        assert!(matches!(result, Err(Error::DestinationExists(p)) if p == path));

        std::fs::write(&path, "stale").unwrap();
        doc.save_to_path(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), WIKIPEDIA_SAMPLE);
    }

    #[test]
    fn test_to_json() {
        let doc = Document::parse_str("0 HEAD\n0 @I1@ INDI\n1 SEX M\n0 TRLR").unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json[1]["tag"], "INDI");
        assert_eq!(json[1]["id"], "@I1@");
        assert_eq!(json[1]["children"][0]["value"], "M");
        assert!(json[0].get("id").is_none());
    }

    #[test]
    fn test_document_debug() {
        let doc = Document::parse_str("0 HEAD\n0 @F1@ FAM\n0 TRLR").unwrap();
        assert_eq!(
            format!("{:?}", doc),
            r#"[Generic(0, "HEAD"), Family(0, "FAM", "@F1@"), Generic(0, "TRLR")]"#
        );
    }
}
