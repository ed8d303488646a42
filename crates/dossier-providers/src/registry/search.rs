//! Register search by company name.

use crate::error::{Provider, Result};
use crate::payload::{self, is_empty_payload, text};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Search request for the register.
///
/// # Example
///
/// ```rust
/// use dossier_providers::SearchQuery;
///
/// let body = SearchQuery::new("Musterfirma GmbH")
///     .with_register_type("HRB")
///     .to_body();
///
/// assert_eq!(body["query"]["value"], "Musterfirma GmbH");
/// assert_eq!(body["filters"][0]["field"], "register_type");
/// assert_eq!(body["filters"][1]["value"], "true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text company name
    pub name: String,
    /// Register number filter
    pub register_number: Option<String>,
    /// Register type filter, e.g. `HRB`
    pub register_type: Option<String>,
    /// Register court filter
    pub register_court: Option<String>,
    /// Restrict to active (`Some(true)`) or inactive companies; `None` for both
    pub active: Option<bool>,
    /// Legal form filter
    pub legal_form: Option<String>,
    /// Address filter
    pub address: Option<String>,
}

impl SearchQuery {
    /// Query for a name, restricted to active companies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            register_number: None,
            register_type: None,
            register_court: None,
            active: Some(true),
            legal_form: None,
            address: None,
        }
    }

    /// Filter by register number.
    #[must_use]
    pub fn with_register_number(mut self, number: impl Into<String>) -> Self {
        self.register_number = Some(number.into());
        self
    }

    /// Filter by register type.
    #[must_use]
    pub fn with_register_type(mut self, register_type: impl Into<String>) -> Self {
        self.register_type = Some(register_type.into());
        self
    }

    /// Filter by register court.
    #[must_use]
    pub fn with_register_court(mut self, court: impl Into<String>) -> Self {
        self.register_court = Some(court.into());
        self
    }

    /// Set or clear the activity filter.
    #[must_use]
    pub fn with_active(mut self, active: Option<bool>) -> Self {
        self.active = active;
        self
    }

    /// Filter by legal form.
    #[must_use]
    pub fn with_legal_form(mut self, legal_form: impl Into<String>) -> Self {
        self.legal_form = Some(legal_form.into());
        self
    }

    /// Filter by address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Render the request body.
    ///
    /// Filters keep a fixed order and the `filters` key is left out when
    /// there are none.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let active = self.active.map(|a| a.to_string());
        let filters: Vec<Value> = [
            ("register_number", self.register_number.as_deref()),
            ("register_type", self.register_type.as_deref()),
            ("register_court", self.register_court.as_deref()),
            ("active", active.as_deref()),
            ("legal_form", self.legal_form.as_deref()),
            ("address", self.address.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| json!({"field": field, "value": v}))
        })
        .collect();

        let mut body = Map::new();
        body.insert("query".to_string(), json!({"value": self.name}));
        if !filters.is_empty() {
            body.insert("filters".to_string(), Value::Array(filters));
        }
        Value::Object(body)
    }
}

/// One search candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    /// Registered company name
    #[serde(deserialize_with = "text")]
    pub name: String,
    /// Register identifier as sent by the search endpoint
    #[serde(deserialize_with = "text")]
    pub company_id: String,
    /// Alternative identifier key used by some responses
    #[serde(deserialize_with = "text")]
    pub id: String,
    /// Everything else the register sent along
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchHit {
    /// The candidate's identifier, `company_id` first.
    #[must_use]
    pub fn identifier(&self) -> &str {
        if self.company_id.is_empty() {
            &self.id
        } else {
            &self.company_id
        }
    }
}

/// Search response: `{"results": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Candidates in register order
    pub results: Vec<SearchHit>,
}

/// Parse a search response. An empty payload means no candidates.
pub fn parse_search_response(payload: &Value) -> Result<SearchResponse> {
    if is_empty_payload(payload) {
        return Ok(SearchResponse::default());
    }
    payload::parse(Provider::RegistrySearch, payload)
}
