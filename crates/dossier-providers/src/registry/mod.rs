//! Company register provider: search, details and ownership.
//!
//! The register describes people attached to a company as *parties*: a
//! `type` tag plus one sub-object per kind (`natural_person` or
//! `legal_person`). Only the sub-object matching the tag is meaningful.

pub mod details;
pub mod owners;
pub mod search;

pub use details::{map_registry_details, RegistryDetails};
pub use owners::{map_registry_owners, OwnerEntry};
pub use search::{parse_search_response, SearchHit, SearchQuery, SearchResponse};

use crate::payload::text;
use serde::Deserialize;

/// Kind tag of a party.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    /// A human being
    NaturalPerson,
    /// A company, foundation or other legal entity
    LegalPerson,
    /// Any tag this crate does not know
    #[serde(other)]
    Unknown,
}

/// Person data shared by both party sub-objects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PartyDetails {
    #[serde(deserialize_with = "text")]
    pub full_name: String,
    #[serde(deserialize_with = "text")]
    pub first_name: String,
    #[serde(deserialize_with = "text")]
    pub last_name: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub country: String,
}

impl PartyDetails {
    /// Display name of a natural person: `full_name`, else first and last name.
    #[must_use]
    pub fn person_name(&self) -> String {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }
        let joined = format!("{} {}", self.first_name, self.last_name);
        let joined = joined.trim();
        if joined.is_empty() {
            self.name.clone()
        } else {
            joined.to_string()
        }
    }
}

/// The tagged part of a representation or ownership entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Party {
    /// Which sub-object applies
    #[serde(rename = "type")]
    pub kind: Option<PartyKind>,
    /// Present for natural persons
    pub natural_person: Option<PartyDetails>,
    /// Present for legal persons
    pub legal_person: Option<PartyDetails>,
}

impl Party {
    /// The sub-object selected by the tag.
    ///
    /// Without a recognised tag the natural person wins if both are present.
    #[must_use]
    pub fn details(&self) -> Option<&PartyDetails> {
        match self.kind {
            Some(PartyKind::NaturalPerson) => self.natural_person.as_ref(),
            Some(PartyKind::LegalPerson) => self.legal_person.as_ref(),
            Some(PartyKind::Unknown) | None => {
                self.natural_person.as_ref().or(self.legal_person.as_ref())
            }
        }
    }

    /// Whether this party describes a natural person.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        match self.kind {
            Some(PartyKind::NaturalPerson) => true,
            Some(PartyKind::LegalPerson) => false,
            Some(PartyKind::Unknown) | None => self.natural_person.is_some(),
        }
    }
}
