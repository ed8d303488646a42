//! The register collaborator seam.

use crate::error::{Provider, ProviderError, Result};
use crate::registry::SearchQuery;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Raw access to the company register.
///
/// Implementations own transport, credentials and retries. They hand back
/// the provider's JSON untouched; an empty answer may be `null`, `{}` or `[]`.
pub trait RegistrySource: Send + Sync {
    /// Search companies; the body of the request is [`SearchQuery::to_body`].
    fn search(&self, query: &SearchQuery) -> Result<Value>;

    /// Fetch the details of one company.
    fn company_details(&self, id: &str) -> Result<Value>;

    /// Fetch the ownership listing of one company.
    fn company_owners(&self, id: &str) -> Result<Value>;
}

/// A register backed by canned payloads.
///
/// Search answers every query with the same result list. Unknown ids answer
/// `null`, like a register that has nothing on file.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    search_results: Vec<Value>,
    details: HashMap<String, Value>,
    owners: HashMap<String, Value>,
    failing: HashSet<Provider>,
}

impl StaticRegistry {
    /// An empty register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search candidate.
    #[must_use]
    pub fn with_hit(mut self, name: &str, id: &str) -> Self {
        self.search_results
            .push(serde_json::json!({"name": name, "company_id": id}));
        self
    }

    /// Register the details payload for an id.
    #[must_use]
    pub fn with_details(mut self, id: &str, payload: Value) -> Self {
        self.details.insert(id.to_string(), payload);
        self
    }

    /// Register the ownership payload for an id.
    #[must_use]
    pub fn with_owners(mut self, id: &str, payload: Value) -> Self {
        self.owners.insert(id.to_string(), payload);
        self
    }

    /// Make every call to one endpoint fail with [`ProviderError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, provider: Provider) -> Self {
        self.failing.insert(provider);
        self
    }

    fn check(&self, provider: Provider) -> Result<()> {
        if self.failing.contains(&provider) {
            Err(ProviderError::unavailable(provider, "endpoint disabled"))
        } else {
            Ok(())
        }
    }
}

impl RegistrySource for StaticRegistry {
    fn search(&self, _query: &SearchQuery) -> Result<Value> {
        self.check(Provider::RegistrySearch)?;
        if self.search_results.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::json!({"results": self.search_results}))
    }

    fn company_details(&self, id: &str) -> Result<Value> {
        self.check(Provider::RegistryDetails)?;
        Ok(self.details.get(id).cloned().unwrap_or(Value::Null))
    }

    fn company_owners(&self, id: &str) -> Result<Value> {
        self.check(Provider::RegistryOwners)?;
        Ok(self.owners.get(id).cloned().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_registry_answers() {
        let registry = StaticRegistry::new()
            .with_hit("Acme GmbH", "DE-HRB-1-2")
            .with_details("DE-HRB-1-2", json!({"id": "DE-HRB-1-2"}));

        let found = registry.search(&SearchQuery::new("Acme")).expect("search");
        assert_eq!(found["results"][0]["company_id"], "DE-HRB-1-2");
        assert_eq!(
            registry.company_details("DE-HRB-1-2").expect("details")["id"],
            "DE-HRB-1-2"
        );
        assert!(registry.company_owners("DE-HRB-1-2").expect("owners").is_null());
        assert!(registry.company_details("DE-HRB-9-9").expect("details").is_null());
    }

    #[test]
    fn test_failing_endpoint() {
        let registry = StaticRegistry::new().failing(Provider::RegistryOwners);
        assert!(registry.company_details("x").is_ok());
        assert!(matches!(
            registry.company_owners("x"),
            Err(ProviderError::Unavailable {
                provider: Provider::RegistryOwners,
                ..
            })
        ));
    }
}
