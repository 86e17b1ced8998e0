//! Family record view

use crate::element::ElementRef;
use crate::individual::Individual;
use crate::record::Event;
use crate::tag::ElementKind;
use std::ops::Deref;

/// A `FAM` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Family<'a>(ElementRef<'a>);

impl<'a> Family<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }

    pub fn element(&self) -> ElementRef<'a> {
        self.0
    }

    /// All `HUSB` then all `WIFE` pointer elements, unresolved
    pub fn partners(&self) -> Vec<ElementRef<'a>> {
        let mut partners = self.0.children_with_tag("HUSB");
        partners.extend(self.0.children_with_tag("WIFE"));
        partners
    }

    pub fn husband(&self) -> Option<Individual<'a>> {
        self.0.child("HUSB").and_then(resolve_individual)
    }

    pub fn wife(&self) -> Option<Individual<'a>> {
        self.0.child("WIFE").and_then(resolve_individual)
    }

    /// `CHIL` pointer elements in document order, unresolved
    pub fn children(&self) -> Vec<ElementRef<'a>> {
        self.0.children_with_tag("CHIL")
    }

    /// Children resolved to their records; dangling pointers are skipped
    pub fn child_individuals(&self) -> Vec<Individual<'a>> {
        self.children()
            .into_iter()
            .filter_map(resolve_individual)
            .collect()
    }

    pub fn marriages(&self) -> Vec<Event<'a>> {
        self.0
            .children_with_tag("MARR")
            .into_iter()
            .filter_map(|e| e.as_event())
            .collect()
    }
}

impl<'a> Deref for Family<'a> {
    type Target = ElementRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> ElementRef<'a> {
    /// This element as a family record, if it is one
    pub fn as_family(&self) -> Option<Family<'a>> {
        (self.kind() == ElementKind::Family || self.tag() == "FAM").then(|| Family::new(*self))
    }
}

/// Follow a pointer element to the individual it names
pub(crate) fn resolve_individual(pointer: ElementRef<'_>) -> Option<Individual<'_>> {
    let resolved = pointer.resolve().and_then(|target| target.as_individual());
    if resolved.is_none() {
        tracing::warn!(
            "{} pointer {:?} does not name an individual",
            pointer.tag(),
            pointer.value().unwrap_or_default()
        );
    }
    resolved
}

/// Follow a pointer element to the family it names
pub(crate) fn resolve_family(pointer: ElementRef<'_>) -> Option<Family<'_>> {
    let resolved = pointer.resolve().and_then(|target| target.as_family());
    if resolved.is_none() {
        tracing::warn!(
            "{} pointer {:?} does not name a family",
            pointer.tag(),
            pointer.value().unwrap_or_default()
        );
    }
    resolved
}
