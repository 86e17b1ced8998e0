//! Individual record view

use crate::document::Document;
use crate::element::{ElementId, ElementRef, NewElement};
use crate::error::{Error, Result};
use crate::family::{resolve_family, resolve_individual, Family};
use crate::record::Event;
use crate::tag::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Given name and surname, either of which may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: Option<String>,
    pub last: Option<String>,
}

impl PersonName {
    pub fn new(first: Option<&str>, last: Option<&str>) -> Self {
        Self {
            first: first.map(str::to_string),
            last: last.map(str::to_string),
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.first, &self.last) {
            (Some(first), Some(last)) => write!(f, "{} {}", first, last),
            (Some(only), None) | (None, Some(only)) => write!(f, "{}", only),
            (None, None) => Ok(()),
        }
    }
}

/// An `INDI` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Individual<'a>(ElementRef<'a>);

impl<'a> Individual<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }

    pub fn element(&self) -> ElementRef<'a> {
        self.0
    }

    /// Families this person is a child of (`FAMC`)
    pub fn child_families(&self) -> Vec<Family<'a>> {
        self.0
            .children_with_tag("FAMC")
            .into_iter()
            .filter_map(resolve_family)
            .collect()
    }

    /// Families this person is a spouse in (`FAMS`)
    pub fn spouse_families(&self) -> Vec<Family<'a>> {
        self.0
            .children_with_tag("FAMS")
            .into_iter()
            .filter_map(resolve_family)
            .collect()
    }

    /// Every partner of every family this person is a child of.
    ///
    /// A person may belong to several families as a child, so the list can
    /// hold any number of entries.
    pub fn parents(&self) -> Vec<Individual<'a>> {
        self.child_families()
            .iter()
            .flat_map(|family| family.partners())
            .filter_map(resolve_individual)
            .collect()
    }

    /// First male parent
    pub fn father(&self) -> Option<Individual<'a>> {
        self.parents().into_iter().find(|p| p.is_male())
    }

    /// First female parent
    pub fn mother(&self) -> Option<Individual<'a>> {
        self.parents().into_iter().find(|p| p.is_female())
    }

    pub fn has_father(&self) -> bool {
        self.father().is_some()
    }

    pub fn has_mother(&self) -> bool {
        self.mother().is_some()
    }

    /// Value of `SEX`, or an empty string if absent
    pub fn sex(&self) -> &'a str {
        self.0.child_value("SEX").unwrap_or_default()
    }

    pub fn is_male(&self) -> bool {
        self.sex().eq_ignore_ascii_case("m")
    }

    pub fn is_female(&self) -> bool {
        self.sex().eq_ignore_ascii_case("f")
    }

    /// The preferred name.
    ///
    /// With several `NAME` children the first one without a `TYPE` wins,
    /// falling back to the last. A person with no `NAME` has an empty name.
    pub fn name(&self) -> Result<PersonName> {
        let names = self.0.children_with_tag("NAME");
        let preferred = match names.as_slice() {
            [] => return Ok(PersonName::default()),
            [only] => *only,
            [.., last] => names
                .iter()
                .find(|n| !n.contains("TYPE"))
                .copied()
                .unwrap_or(*last),
        };

        match preferred.value().filter(|v| !v.is_empty()) {
            None => Ok(name_from_parts(preferred)),
            Some(value) => {
                let parts: Vec<&str> = value.split('/').collect();
                match parts.as_slice() {
                    [first] => Ok(PersonName::new(Some(first.trim()), None)),
                    [_, _] => Err(Error::MalformedName(value.to_string())),
                    [first, last, _] => Ok(PersonName::new(Some(first.trim()), Some(last.trim()))),
                    _ => Ok(name_from_parts(preferred)),
                }
            }
        }
    }

    /// Names marked `TYPE aka`, only considered when there is more than one
    /// `NAME`
    pub fn aka(&self) -> Result<Vec<PersonName>> {
        let names = self.0.children_with_tag("NAME");
        if names.len() < 2 {
            return Ok(Vec::new());
        }

        names
            .into_iter()
            .filter(|name| {
                name.child_value("TYPE")
                    .is_some_and(|t| t.eq_ignore_ascii_case("aka"))
            })
            .map(|name| match name.value().filter(|v| !v.is_empty()) {
                None => Ok(name_from_parts(name)),
                Some(value) => match value.split('/').collect::<Vec<_>>().as_slice() {
                    [first, last, _] => Ok(PersonName::new(Some(first.trim()), Some(last.trim()))),
                    _ => Err(Error::MalformedName(value.to_string())),
                },
            })
            .collect()
    }

    pub fn birth(&self) -> Option<Event<'a>> {
        self.0.child("BIRT").and_then(|e| e.as_event())
    }

    pub fn death(&self) -> Option<Event<'a>> {
        self.0.child("DEAT").and_then(|e| e.as_event())
    }

    pub fn title(&self) -> Option<&'a str> {
        self.0.child_value("TITL")
    }
}

fn name_from_parts(name: ElementRef<'_>) -> PersonName {
    PersonName::new(name.child_value("GIVN"), name.child_value("SURN"))
}

impl<'a> Deref for Individual<'a> {
    type Target = ElementRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> ElementRef<'a> {
    /// This element as an individual record, if it is one
    pub fn as_individual(&self) -> Option<Individual<'a>> {
        (self.kind() == ElementKind::Individual || self.tag() == "INDI")
            .then(|| Individual::new(*self))
    }
}

impl Document {
    /// Set an individual's `SEX` to `M` or `F`, in either case.
    ///
    /// Replaces the value of an existing `SEX` child or appends a new one.
    pub fn set_sex(&mut self, individual: ElementId, sex: &str) -> Result<()> {
        let sex = sex.to_uppercase();
        if sex != "M" && sex != "F" {
            return Err(Error::InvalidSex(sex));
        }

        let element = self.get(individual);
        if element.as_individual().is_none() {
            return Err(Error::Type(format!(
                "SEX can only be set on INDI records, not {}",
                element.tag()
            )));
        }

        match element.child("SEX").map(|s| s.id()) {
            Some(existing) => self.set_value(existing, Some(sex)),
            None => {
                let mut draft = NewElement::of_kind(ElementKind::Sex)
                    .with_value(sex)
                    .with_parent(individual);
                draft.level = element.level().map(|level| level + 1);
                self.create(draft)?;
            }
        }
        Ok(())
    }
}
