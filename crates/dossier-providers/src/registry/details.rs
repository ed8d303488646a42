//! Register company details.

use super::Party;
use crate::error::{Provider, Result};
use crate::payload::{self, non_negative, number, optional_text, text};
use dossier_core::{Capital, Company, CompanyRecord, Person};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Details payload. `id` and `name.name` are the only required keys.
#[derive(Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct RegistryDetails {
    pub id: String,
    pub name: DetailsName,
    #[serde(default, deserialize_with = "or_default")]
    pub address: DetailsAddress,
    #[serde(default, deserialize_with = "text")]
    pub legal_form: String,
    #[serde(default, deserialize_with = "or_default")]
    pub purpose: DetailsPurpose,
    #[serde(default, deserialize_with = "or_default")]
    pub register: DetailsRegister,
    #[serde(default, deserialize_with = "optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub capital: DetailsCapital,
    #[serde(default, deserialize_with = "or_default")]
    pub representation: Vec<Representation>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct DetailsName {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DetailsAddress {
    #[serde(deserialize_with = "text")]
    pub formatted_value: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub postal_code: String,
    #[serde(deserialize_with = "text")]
    pub street: String,
    #[serde(deserialize_with = "text")]
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DetailsPurpose {
    #[serde(deserialize_with = "text")]
    pub purpose: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DetailsRegister {
    #[serde(deserialize_with = "text")]
    pub register_court: String,
    #[serde(deserialize_with = "text")]
    pub register_number: String,
    #[serde(deserialize_with = "text")]
    pub register_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DetailsCapital {
    #[serde(deserialize_with = "number")]
    pub amount: f64,
    #[serde(deserialize_with = "text")]
    pub currency: String,
}

/// One legal representative.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Representation {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub role: String,
    #[serde(flatten)]
    pub party: Party,
}

// `null` for an optional block means the same as a missing key.
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<Representation> for Person {
    fn from(entry: Representation) -> Self {
        let mut person = Self {
            role: entry.role,
            name: entry.name,
            ..Self::default()
        };
        if let Some(details) = entry.party.details() {
            person.date_of_birth.clone_from(&details.date_of_birth);
            person.city.clone_from(&details.city);
            person.country.clone_from(&details.country);
        }
        person
    }
}

impl From<RegistryDetails> for CompanyRecord {
    fn from(d: RegistryDetails) -> Self {
        Self {
            company: Company {
                name: d.name.name,
                legal_form: d.legal_form,
                purpose: d.purpose.purpose,
                status: d.status,
                country: d.address.country,
                address: d.address.formatted_value,
                city: d.address.city,
                postal_code: d.address.postal_code,
                street: d.address.street,
                identifier: d.id,
                register_court: d.register.register_court,
                register_number: d.register.register_number,
                register_type: d.register.register_type,
                ..Company::default()
            },
            representatives: d.representation.into_iter().map(Person::from).collect(),
            owners: Vec::new(),
            capital: Capital {
                total_amount: non_negative(d.capital.amount, "capital.amount"),
                total_shares: 0.0,
                currency: d.capital.currency,
            },
        }
    }
}

/// Map a register details payload into a record fragment.
pub fn map_registry_details(payload: &Value) -> Result<CompanyRecord> {
    let parsed: RegistryDetails = payload::parse(Provider::RegistryDetails, payload)?;
    let record = CompanyRecord::from(parsed);

    tracing::debug!(
        id = %record.company.identifier,
        representatives = record.representatives.len(),
        "mapped registry details"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use serde_json::json;

    #[test]
    fn test_minimal_payload() {
        let record = map_registry_details(&json!({
            "id": "DE-HRB-123456-00001",
            "name": {"name": "Musterfirma GmbH"}
        }))
        .expect("map details");

        assert_eq!(record.company.identifier, "DE-HRB-123456-00001");
        assert_eq!(record.company.name, "Musterfirma GmbH");
        assert_eq!(record.company.purpose, "");
        assert_eq!(record.company.status, None);
        assert!(record.representatives.is_empty());
        assert!(record.capital.is_empty());
    }

    #[test]
    fn test_missing_required_keys() {
        for payload in [
            json!({"name": {"name": "Acme"}}),
            json!({"id": "DE-HRB-1-2"}),
            json!({"id": "DE-HRB-1-2", "name": {}}),
        ] {
            let err = map_registry_details(&payload).unwrap_err();
            assert!(matches!(
                err,
                ProviderError::MalformedPayload {
                    provider: Provider::RegistryDetails,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_representation_branches_on_type() {
        let record = map_registry_details(&json!({
            "id": "DE-HRB-1-2",
            "name": {"name": "Acme GmbH"},
            "purpose": null,
            "capital": {"amount": 25000, "currency": "EUR"},
            "representation": [
                {
                    "name": "Max Mustermann",
                    "role": "DIRECTOR",
                    "type": "natural_person",
                    "natural_person": {"date_of_birth": "1970-01-01", "city": "Berlin"}
                },
                {
                    "name": "Verwaltungs GmbH",
                    "role": "PARTNER",
                    "type": "legal_person",
                    "legal_person": {"city": "Hamburg", "country": "DE"}
                },
                {"name": "Anon", "role": "DIRECTOR", "type": "natural_person"}
            ]
        }))
        .expect("map details");

        let reps = &record.representatives;
        assert_eq!(reps.len(), 3);
        assert_eq!(reps[0].date_of_birth, "1970-01-01");
        assert_eq!(reps[0].city, "Berlin");
        assert_eq!(reps[1].city, "Hamburg");
        assert_eq!(reps[1].country, "DE");
        assert_eq!(reps[2].name, "Anon");
        assert_eq!(reps[2].city, "");
        assert_eq!(record.capital.total_amount, 25_000.0);
        assert_eq!(record.capital.currency, "EUR");
    }
}
