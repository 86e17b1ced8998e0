//! Tag registry: maps GEDCOM tags to element kinds
//!
//! The set of kinds is closed. Any tag not in [`TAG_TABLE`] dispatches to
//! [`ElementKind::Generic`], so lookup never fails.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Life and family events that carry DATE/PLAC details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Event,
    Residence,
    Birth,
    Death,
    Burial,
    Marriage,
    Divorce,
    BaptismLds,
    Baptism,
    BarMitzvah,
    BasMitzvah,
    Blessing,
    Christening,
    AdultChristening,
    Confirmation,
    ConfirmationLds,
    Cremation,
    Emigration,
    Endowment,
    Engagement,
    Graduation,
    Immigration,
    Naturalization,
    Will,
}

impl EventKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Event => "EVEN",
            Self::Residence => "RESI",
            Self::Birth => "BIRT",
            Self::Death => "DEAT",
            Self::Burial => "BURI",
            Self::Marriage => "MARR",
            Self::Divorce => "DIV",
            Self::BaptismLds => "BAPL",
            Self::Baptism => "BAPM",
            Self::BarMitzvah => "BARM",
            Self::BasMitzvah => "BASM",
            Self::Blessing => "BLES",
            Self::Christening => "CHR",
            Self::AdultChristening => "CHRA",
            Self::Confirmation => "CONF",
            Self::ConfirmationLds => "CONL",
            Self::Cremation => "CREM",
            Self::Emigration => "EMIG",
            Self::Endowment => "ENDL",
            Self::Engagement => "ENGA",
            Self::Graduation => "GRAD",
            Self::Immigration => "IMMI",
            Self::Naturalization => "NATU",
            Self::Will => "WILL",
        }
    }
}

/// Concrete variant of an element, chosen from its tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Any tag without a dedicated variant
    #[default]
    Generic,
    Individual,
    Family,
    Name,
    Sex,
    /// `HUSB` pointer to an individual
    Husband,
    /// `WIFE` pointer to an individual
    Wife,
    /// `CHIL` pointer to an individual
    Child,
    /// `FAMS` pointer to a family where the owner is a spouse
    SpouseFamily,
    /// `FAMC` pointer to a family where the owner is a child
    ChildFamily,
    FatherRelation,
    MotherRelation,
    Event(EventKind),
    Date,
    Place,
    EventType,
    Note,
    Source,
    SourceData,
    SourceText,
    Page,
}

/// Every tag with a dedicated kind
pub const TAG_TABLE: &[(&str, ElementKind)] = &[
    ("INDI", ElementKind::Individual),
    ("FAM", ElementKind::Family),
    ("NAME", ElementKind::Name),
    ("SEX", ElementKind::Sex),
    ("HUSB", ElementKind::Husband),
    ("WIFE", ElementKind::Wife),
    ("CHIL", ElementKind::Child),
    ("FAMS", ElementKind::SpouseFamily),
    ("FAMC", ElementKind::ChildFamily),
    ("_FREL", ElementKind::FatherRelation),
    ("_MREL", ElementKind::MotherRelation),
    ("DATE", ElementKind::Date),
    ("PLAC", ElementKind::Place),
    ("TYPE", ElementKind::EventType),
    ("NOTE", ElementKind::Note),
    ("SOUR", ElementKind::Source),
    ("DATA", ElementKind::SourceData),
    ("TEXT", ElementKind::SourceText),
    ("PAGE", ElementKind::Page),
    ("EVEN", ElementKind::Event(EventKind::Event)),
    ("RESI", ElementKind::Event(EventKind::Residence)),
    ("BIRT", ElementKind::Event(EventKind::Birth)),
    ("DEAT", ElementKind::Event(EventKind::Death)),
    ("BURI", ElementKind::Event(EventKind::Burial)),
    ("MARR", ElementKind::Event(EventKind::Marriage)),
    ("DIV", ElementKind::Event(EventKind::Divorce)),
    ("BAPL", ElementKind::Event(EventKind::BaptismLds)),
    ("BAPM", ElementKind::Event(EventKind::Baptism)),
    ("BARM", ElementKind::Event(EventKind::BarMitzvah)),
    ("BASM", ElementKind::Event(EventKind::BasMitzvah)),
    ("BLES", ElementKind::Event(EventKind::Blessing)),
    ("CHR", ElementKind::Event(EventKind::Christening)),
    ("CHRA", ElementKind::Event(EventKind::AdultChristening)),
    ("CONF", ElementKind::Event(EventKind::Confirmation)),
    ("CONL", ElementKind::Event(EventKind::ConfirmationLds)),
    ("CREM", ElementKind::Event(EventKind::Cremation)),
    ("EMIG", ElementKind::Event(EventKind::Emigration)),
    ("ENDL", ElementKind::Event(EventKind::Endowment)),
    ("ENGA", ElementKind::Event(EventKind::Engagement)),
    ("GRAD", ElementKind::Event(EventKind::Graduation)),
    ("IMMI", ElementKind::Event(EventKind::Immigration)),
    ("NATU", ElementKind::Event(EventKind::Naturalization)),
    ("WILL", ElementKind::Event(EventKind::Will)),
];

static REGISTRY: Lazy<HashMap<&'static str, ElementKind>> =
    Lazy::new(|| TAG_TABLE.iter().copied().collect());

impl ElementKind {
    /// Kind for a tag; unknown tags are `Generic`
    pub fn for_tag(tag: &str) -> Self {
        REGISTRY.get(tag).copied().unwrap_or(Self::Generic)
    }

    /// The fixed tag of this kind, `None` for `Generic`
    pub fn canonical_tag(&self) -> Option<&'static str> {
        let tag = match self {
            Self::Generic => return None,
            Self::Event(event) => event.tag(),
            Self::Individual => "INDI",
            Self::Family => "FAM",
            Self::Name => "NAME",
            Self::Sex => "SEX",
            Self::Husband => "HUSB",
            Self::Wife => "WIFE",
            Self::Child => "CHIL",
            Self::SpouseFamily => "FAMS",
            Self::ChildFamily => "FAMC",
            Self::FatherRelation => "_FREL",
            Self::MotherRelation => "_MREL",
            Self::Date => "DATE",
            Self::Place => "PLAC",
            Self::EventType => "TYPE",
            Self::Note => "NOTE",
            Self::Source => "SOUR",
            Self::SourceData => "DATA",
            Self::SourceText => "TEXT",
            Self::Page => "PAGE",
        };
        Some(tag)
    }

    /// Whether the value of this kind is a pointer to another record
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::Husband | Self::Wife | Self::Child | Self::SpouseFamily | Self::ChildFamily
        )
    }
}
