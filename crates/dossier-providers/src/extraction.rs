//! Mapper for the document extraction provider.
//!
//! The extraction collaborator turns free document text into a JSON object
//! that already uses record vocabulary, so this mapping is mostly 1:1. Its
//! values are model output, though: any field may be `null`, a number where
//! text belongs, or a numeric string where a number belongs.

use crate::error::{Provider, ProviderError, Result};
use crate::payload::{self, non_negative, number, optional_text, percentage, text, text_list};
use dossier_core::{Capital, Company, CompanyRecord, Owner, Person};
use serde::Deserialize;
use serde_json::Value;

/// Top-level extraction payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionPayload {
    /// Required; every field inside is optional
    pub company: ExtractedCompany,
    /// Legal representatives
    #[serde(default, deserialize_with = "nullable_list")]
    pub representatives: Vec<ExtractedPerson>,
    /// Beneficial owners
    #[serde(default, deserialize_with = "nullable_list")]
    pub owners: Vec<ExtractedOwner>,
    /// Share capital
    #[serde(default, deserialize_with = "nullable_capital")]
    pub capital: ExtractedCapital,
}

/// Company block of an extraction payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ExtractedCompany {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub postal_code: String,
    #[serde(deserialize_with = "text")]
    pub street: String,
    #[serde(deserialize_with = "text")]
    pub legal_form: String,
    #[serde(deserialize_with = "text")]
    pub purpose: String,
    #[serde(deserialize_with = "text")]
    pub german_company_registration_number: String,
    #[serde(deserialize_with = "text")]
    pub register_court: String,
    #[serde(deserialize_with = "text")]
    pub register_number: String,
    #[serde(deserialize_with = "text")]
    pub register_type: String,
    #[serde(deserialize_with = "text")]
    pub country: String,
    #[serde(deserialize_with = "text")]
    pub support_phone: String,
    #[serde(deserialize_with = "text")]
    pub support_email: String,
    #[serde(deserialize_with = "optional_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub industry_codes: Vec<String>,
}

/// Representative entry of an extraction payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ExtractedPerson {
    #[serde(deserialize_with = "text")]
    pub role: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub street: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub country: String,
    #[serde(deserialize_with = "text")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "text")]
    pub phone: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
}

/// Owner entry of an extraction payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ExtractedOwner {
    #[serde(flatten)]
    pub person: ExtractedPerson,
    #[serde(deserialize_with = "number")]
    pub shares_percentage: f64,
    #[serde(deserialize_with = "number")]
    pub shares_nominal: f64,
}

/// Capital block of an extraction payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ExtractedCapital {
    #[serde(deserialize_with = "number")]
    pub total_amount: f64,
    #[serde(deserialize_with = "number")]
    pub total_shares: f64,
    #[serde(deserialize_with = "text")]
    pub currency: String,
}

/// The `{success, data}` envelope the extraction collaborator answers with.
#[derive(Debug, Clone, Deserialize)]
struct ExtractionEnvelope {
    success: bool,
    #[serde(default)]
    data: Value,
}

fn nullable_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_capital<'de, D>(deserializer: D) -> std::result::Result<ExtractedCapital, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ExtractedCapital>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ExtractedPerson> for Person {
    fn from(p: ExtractedPerson) -> Self {
        Self {
            role: p.role,
            name: p.name,
            street: p.street,
            address: p.address,
            city: p.city,
            country: p.country,
            date_of_birth: p.date_of_birth,
            phone: p.phone,
            email: p.email,
        }
    }
}

impl From<ExtractedOwner> for Owner {
    fn from(o: ExtractedOwner) -> Self {
        Self {
            person: o.person.into(),
            shares_percentage: percentage(o.shares_percentage, "shares_percentage"),
            shares_nominal: non_negative(o.shares_nominal, "shares_nominal"),
        }
    }
}

impl From<ExtractedCompany> for Company {
    fn from(c: ExtractedCompany) -> Self {
        Self {
            name: c.name,
            legal_form: c.legal_form,
            purpose: c.purpose,
            status: c.status,
            country: c.country,
            address: c.address,
            city: c.city,
            postal_code: c.postal_code,
            street: c.street,
            identifier: c.german_company_registration_number,
            register_court: c.register_court,
            register_number: c.register_number,
            register_type: c.register_type,
            industry_codes: c.industry_codes,
            support_phone: c.support_phone,
            support_email: c.support_email,
        }
    }
}

impl From<ExtractionPayload> for CompanyRecord {
    fn from(payload: ExtractionPayload) -> Self {
        Self {
            company: payload.company.into(),
            representatives: payload.representatives.into_iter().map(Person::from).collect(),
            owners: payload.owners.into_iter().map(Owner::from).collect(),
            capital: Capital {
                total_amount: payload.capital.total_amount,
                total_shares: non_negative(payload.capital.total_shares, "total_shares"),
                currency: payload.capital.currency,
            },
        }
    }
}

/// Map an extraction payload into a record.
///
/// Only the `company` key is required. Placeholder persons are kept here;
/// they are dropped when the record is serialized.
pub fn map_extraction(payload: &Value) -> Result<CompanyRecord> {
    let parsed: ExtractionPayload = payload::parse(Provider::Extraction, payload)?;
    let record = CompanyRecord::from(parsed);

    tracing::debug!(
        company = %record.company.name,
        representatives = record.representatives.len(),
        owners = record.owners.len(),
        "mapped extraction payload"
    );

    Ok(record)
}

/// Map the extraction collaborator's `{success, data}` envelope.
///
/// Returns `Ok(None)` when the collaborator reports that it found nothing.
pub fn map_extraction_response(response: &Value) -> Result<Option<CompanyRecord>> {
    let envelope: ExtractionEnvelope = payload::parse(Provider::Extraction, response)?;

    if !envelope.success {
        tracing::debug!("extraction reported no result");
        return Ok(None);
    }

    if envelope.data.is_null() {
        return Err(ProviderError::malformed(
            Provider::Extraction,
            "successful response without data",
        ));
    }

    map_extraction(&envelope.data).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_fields_map_one_to_one() {
        let record = map_extraction(&json!({
            "company": {
                "name": "Musterfirma GmbH",
                "german_company_registration_number": "DE-HRB-123456-00001",
                "register_number": 123_456,
                "status": null,
                "industry_codes": ["62.01", "62.02"]
            }
        }))
        .expect("map extraction");

        assert_eq!(record.company.name, "Musterfirma GmbH");
        assert_eq!(record.company.identifier, "DE-HRB-123456-00001");
        assert_eq!(record.company.register_number, "123456");
        assert_eq!(record.company.status, None);
        assert_eq!(record.company.industry_codes.len(), 2);
        assert!(record.representatives.is_empty());
        assert!(record.capital.is_empty());
    }

    #[test]
    fn test_missing_company_is_malformed() {
        let err = map_extraction(&json!({"owners": []})).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MalformedPayload {
                provider: Provider::Extraction,
                ..
            }
        ));
    }

    #[test]
    fn test_owner_numbers_are_lenient_and_clamped() {
        let record = map_extraction(&json!({
            "company": {},
            "owners": [
                {"name": "Erika", "shares_percentage": "50", "shares_nominal": ""},
                {"name": "Holding", "shares_percentage": 250, "shares_nominal": -10}
            ],
            "capital": {"total_amount": "25000", "total_shares": null, "currency": "EUR"}
        }))
        .expect("map extraction");

        assert_eq!(record.owners[0].shares_percentage, 50.0);
        assert_eq!(record.owners[0].shares_nominal, 0.0);
        assert_eq!(record.owners[1].shares_percentage, 100.0);
        assert_eq!(record.owners[1].shares_nominal, 0.0);
        assert_eq!(record.capital.total_amount, 25_000.0);
        assert_eq!(record.capital.currency, "EUR");
    }

    #[test]
    fn test_null_collections() {
        let record = map_extraction(&json!({
            "company": {"name": "Acme"},
            "representatives": null,
            "owners": null,
            "capital": null
        }))
        .expect("map extraction");

        assert!(record.representatives.is_empty());
        assert!(record.owners.is_empty());
        assert!(record.capital.is_empty());
    }

    #[test]
    fn test_envelope() {
        assert!(map_extraction_response(&json!({"success": false, "data": null}))
            .expect("map envelope")
            .is_none());

        let record = map_extraction_response(&json!({
            "success": true,
            "data": {"company": {"name": "Acme"}}
        }))
        .expect("map envelope")
        .expect("record present");
        assert_eq!(record.company.name, "Acme");

        assert!(map_extraction_response(&json!({"success": true})).is_err());
        assert!(map_extraction_response(&json!({"data": {}})).is_err());
    }
}
