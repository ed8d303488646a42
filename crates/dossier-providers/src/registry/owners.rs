//! Register ownership listing.

use super::Party;
use crate::error::{Provider, Result};
use crate::payload::{self, non_negative, number, percentage, text};
use dossier_core::{CompanyRecord, Owner, Person};
use serde::Deserialize;
use serde_json::Value;

/// One entry of the ownership listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OwnerEntry {
    /// Relation to the company, e.g. `SHAREHOLDER`
    #[serde(deserialize_with = "text")]
    pub relation_type: String,
    /// Nominal value of the shares held
    #[serde(deserialize_with = "number")]
    pub nominal_share: f64,
    /// Share of the capital in percent
    #[serde(deserialize_with = "number")]
    pub percentage_share: f64,
    /// Who holds the shares
    #[serde(flatten)]
    pub party: Party,
}

/// The listing arrives either bare or wrapped in `{"owners": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwnersPayload {
    List(Vec<OwnerEntry>),
    Wrapped { owners: Vec<OwnerEntry> },
}

impl From<OwnerEntry> for Owner {
    fn from(entry: OwnerEntry) -> Self {
        let mut person = Person {
            role: entry.relation_type,
            ..Person::default()
        };

        if let Some(details) = entry.party.details() {
            person.city.clone_from(&details.city);
            person.country.clone_from(&details.country);
            if entry.party.is_natural() {
                person.date_of_birth.clone_from(&details.date_of_birth);
                person.name = details.person_name();
            } else {
                person.name.clone_from(&details.name);
            }
        }

        Self {
            person,
            shares_percentage: percentage(entry.percentage_share, "percentage_share"),
            shares_nominal: non_negative(entry.nominal_share, "nominal_share"),
        }
    }
}

/// Map a register ownership payload into a record fragment holding only owners.
pub fn map_registry_owners(payload: &Value) -> Result<CompanyRecord> {
    let entries = match payload::parse(Provider::RegistryOwners, payload)? {
        OwnersPayload::List(entries) | OwnersPayload::Wrapped { owners: entries } => entries,
    };

    let record = CompanyRecord {
        owners: entries.into_iter().map(Owner::from).collect(),
        ..CompanyRecord::default()
    };

    tracing::debug!(owners = record.owners.len(), "mapped registry owners");
    Ok(record)
}
