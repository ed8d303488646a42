//! Canonical company record.
//!
//! One [`CompanyRecord`] is built per request: created empty, filled by the
//! provider mappers and the reconciler, then cleaned and serialized once.
//! Every field has an empty sentinel (`""`, `0`, `None`, empty list) that
//! means "unknown" and is never treated as data.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The normalized, provider-agnostic view of one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    /// Identity and address of the company itself
    pub company: Company,
    /// Legal representatives, in provider order
    pub representatives: Vec<Person>,
    /// Beneficial owners, in provider order
    pub owners: Vec<Owner>,
    /// Share capital
    pub capital: Capital,
}

impl CompanyRecord {
    /// Create an all-sentinel record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an otherwise empty record that only knows the company name.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.company.name = name.into();
        record
    }

    /// Whether no field of the record carries data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company.completion_percentage() == 0.0
            && self.capital.is_empty()
            && self.representatives.is_empty()
            && self.owners.is_empty()
    }

    /// Drop every representative and owner whose fields are all empty.
    pub fn cleanup(&mut self) {
        let before = self.representatives.len() + self.owners.len();

        self.representatives
            .retain(|person| person.completion_percentage() > 0.0);
        self.owners.retain(|owner| owner.completion_percentage() > 0.0);

        let removed = before - (self.representatives.len() + self.owners.len());
        if removed > 0 {
            tracing::debug!(removed, "dropped placeholder persons from record");
        }
    }

    /// Clean the record and flatten it into its transport mapping.
    ///
    /// The mapping has the top-level keys `company`, `representatives`,
    /// `owners` and `capital`. Converting an already converted record
    /// yields the same value.
    pub fn to_transport(&mut self) -> Result<serde_json::Value> {
        self.cleanup();
        Ok(serde_json::to_value(&*self)?)
    }
}

/// Identity, address and register data of a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Registered company name
    pub name: String,
    /// Legal form, e.g. `GmbH`
    pub legal_form: String,
    /// Business purpose as registered
    pub purpose: String,
    /// `None` means the status is unknown, which is distinct from `""`
    pub status: Option<String>,
    /// Country name or code as the source spells it
    pub country: String,
    /// Full formatted address
    pub address: String,
    /// City of the registered seat
    pub city: String,
    /// Postal code of the registered seat
    pub postal_code: String,
    /// Street and house number
    pub street: String,
    /// Register identifier, e.g. `DE-HRB-123456-00001`
    #[serde(rename = "id")]
    pub identifier: String,
    /// Court keeping the register entry
    pub register_court: String,
    /// Number within the court's register
    pub register_number: String,
    /// Register type, e.g. `HRB`
    pub register_type: String,
    /// Industry classification codes, in source order
    pub industry_codes: Vec<String>,
    /// Public contact phone number
    pub support_phone: String,
    /// Public contact email address
    pub support_email: String,
}

impl Company {
    const FIELD_COUNT: usize = 16;

    /// Fraction (0.0 to 1.0) of fields that are not at their sentinel.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        let text = [
            &self.name,
            &self.legal_form,
            &self.purpose,
            &self.country,
            &self.address,
            &self.city,
            &self.postal_code,
            &self.street,
            &self.identifier,
            &self.register_court,
            &self.register_number,
            &self.register_type,
            &self.support_phone,
            &self.support_email,
        ];

        let filled = text.iter().filter(|value| !value.is_empty()).count()
            + usize::from(self.status.as_deref().is_some_and(|s| !s.is_empty()))
            + usize::from(!self.industry_codes.is_empty());

        ratio(filled, Self::FIELD_COUNT)
    }
}

/// Share capital of a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capital {
    /// Registered share capital
    pub total_amount: f64,
    /// Number of shares issued
    pub total_shares: f64,
    /// Currency code of `total_amount`
    pub currency: String,
}

impl Capital {
    /// Whether every capital field is at its sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_amount == 0.0 && self.total_shares == 0.0 && self.currency.is_empty()
    }
}

/// A natural or legal person attached to a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    /// Function towards the company, e.g. `Geschäftsführer`
    pub role: String,
    /// Full name of a natural person or name of a legal entity
    pub name: String,
    /// Street and house number
    pub street: String,
    /// Full formatted address
    pub address: String,
    /// City of residence or seat
    pub city: String,
    /// Country of residence or seat
    pub country: String,
    /// Date of birth as the source spells it
    pub date_of_birth: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address
    pub email: String,
}

impl Person {
    const FIELD_COUNT: usize = 9;

    fn filled_fields(&self) -> usize {
        [
            &self.role,
            &self.name,
            &self.street,
            &self.address,
            &self.city,
            &self.country,
            &self.date_of_birth,
            &self.phone,
            &self.email,
        ]
        .iter()
        .filter(|value| !value.is_empty())
        .count()
    }

    /// Fraction (0.0 to 1.0) of fields that are not at their sentinel.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        ratio(self.filled_fields(), Self::FIELD_COUNT)
    }
}

/// A beneficial owner: a [`Person`] plus the shares held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    /// Who holds the shares
    #[serde(flatten)]
    pub person: Person,
    /// Percentage of the share capital, 0 to 100
    pub shares_percentage: f64,
    /// Nominal value of the shares held
    pub shares_nominal: f64,
}

impl Owner {
    const FIELD_COUNT: usize = Person::FIELD_COUNT + 2;

    /// Fraction (0.0 to 1.0) of fields that are not at their sentinel.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        let filled = self.person.filled_fields()
            + usize::from(self.shares_percentage != 0.0)
            + usize::from(self.shares_nominal != 0.0);
        ratio(filled, Self::FIELD_COUNT)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(filled: usize, total: usize) -> f64 {
    filled as f64 / total as f64
}
