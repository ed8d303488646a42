//! Register enrichment of partially known company records.
//!
//! The [`Reconciler`] decides whether the register can say anything about a
//! record, finds the company there (by identifier, or by fuzzy name search),
//! and merges what the register knows into the record without ever
//! replacing known data with an empty value.

use crate::matcher::{best_match_scored, similarity, MATCH_THRESHOLD};
use dossier_core::{CompanyRecord, RegistryId};
use dossier_providers::{
    is_empty_payload, map_registry_details, map_registry_owners, parse_search_response, Provider,
    RegistrySource, SearchHit, SearchQuery,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Country values the register covers. An empty country is also accepted.
const REGISTER_COUNTRIES: [&str; 3] = ["de", "deutschland", "germany"];

/// How an enrichment attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrichOutcome {
    /// The record names a country outside the register's coverage
    ForeignJurisdiction,
    /// No usable identifier and no name to search for
    MissingName,
    /// The search found no candidate above the match threshold
    NoMatch,
    /// Details and owners were fetched and merged
    Enriched {
        /// Register identifier the data was fetched for
        identifier: String,
        /// Whether the identifier came from a name search
        searched: bool,
    },
}

/// A record together with the outcome that produced it.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// The (possibly unchanged) record
    pub record: CompanyRecord,
    /// What happened
    pub outcome: EnrichOutcome,
}

/// Enriches records from the company register.
pub struct Reconciler {
    /// Register collaborator
    source: Arc<dyn RegistrySource>,
    /// Restrict name searches to active companies
    only_active: bool,
}

impl Reconciler {
    /// Create a reconciler that searches active companies only.
    #[must_use]
    pub fn new(source: Arc<dyn RegistrySource>) -> Self {
        Self {
            source,
            only_active: true,
        }
    }

    /// Set whether name searches are restricted to active companies.
    #[must_use]
    pub fn with_only_active(mut self, only_active: bool) -> Self {
        self.only_active = only_active;
        self
    }

    /// Enrich a record from the register.
    ///
    /// Returns the record unchanged when the company is outside the
    /// register's jurisdiction, has neither a valid identifier nor a name,
    /// or cannot be found by name.
    #[must_use]
    pub fn enrich(&self, known: CompanyRecord) -> CompanyRecord {
        self.enrich_detailed(known).record
    }

    /// Like [`enrich`](Self::enrich), also reporting how the attempt ended.
    #[must_use]
    pub fn enrich_detailed(&self, mut known: CompanyRecord) -> Enrichment {
        tracing::debug!(
            company = %known.company.name,
            id = %known.company.identifier,
            "trying to enrich company record"
        );

        if !in_jurisdiction(&known.company.country) {
            tracing::debug!(country = %known.company.country, "country not covered by the register");
            return Enrichment {
                record: known,
                outcome: EnrichOutcome::ForeignJurisdiction,
            };
        }

        let searched = !RegistryId::is_valid(&known.company.identifier);
        tracing::debug!(search_required = searched, "resolved identifier strategy");

        let identifier = if searched {
            if known.company.name.is_empty() {
                return Enrichment {
                    record: known,
                    outcome: EnrichOutcome::MissingName,
                };
            }

            match self.find_by_name(&known.company.name) {
                Some(hit) => hit.identifier().to_string(),
                None => {
                    tracing::debug!(company = %known.company.name, "no matching company in register");
                    return Enrichment {
                        record: known,
                        outcome: EnrichOutcome::NoMatch,
                    };
                }
            }
        } else {
            known.company.identifier.clone()
        };

        let details = fetch_fragment(
            Provider::RegistryDetails,
            self.source.company_details(&identifier),
            map_registry_details,
        );
        merge(&mut known, details);

        let owners = fetch_fragment(
            Provider::RegistryOwners,
            self.source.company_owners(&identifier),
            map_registry_owners,
        );
        merge(&mut known, owners);

        tracing::info!(id = %identifier, searched, "enriched company record from register");

        Enrichment {
            record: known,
            outcome: EnrichOutcome::Enriched {
                identifier,
                searched,
            },
        }
    }

    /// Whether the register knows a company by this name.
    ///
    /// With an identifier, the matching candidate must also carry it.
    /// Register failures count as "not found".
    #[must_use]
    pub fn validate_existence(&self, name: &str, identifier: Option<&str>) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        let wanted = identifier.filter(|id| !id.is_empty());
        let found = self.search(name).iter().any(|hit| {
            similarity(name, &hit.name) > MATCH_THRESHOLD
                && wanted.map_or(true, |id| hit.identifier() == id)
        });

        tracing::debug!(company = name, found, "validated company existence");
        found
    }

    fn find_by_name(&self, name: &str) -> Option<SearchHit> {
        let (candidates, unusable): (Vec<SearchHit>, Vec<SearchHit>) = self
            .search(name)
            .into_iter()
            .partition(|hit| !hit.identifier().is_empty());

        for hit in &unusable {
            tracing::warn!(candidate = %hit.name, "skipping search result without identifier");
        }

        let (hit, score) = best_match_scored(name, &candidates)?;
        tracing::debug!(candidate = %hit.name, score, "found matching company");
        Some(hit.clone())
    }

    fn search(&self, name: &str) -> Vec<SearchHit> {
        let query = SearchQuery::new(name).with_active(self.only_active.then_some(true));

        let payload = match self.source.search(&query) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "register search failed");
                return Vec::new();
            }
        };

        match parse_search_response(&payload) {
            Ok(response) => response.results,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable search response");
                Vec::new()
            }
        }
    }
}

fn in_jurisdiction(country: &str) -> bool {
    let country = country.trim();
    country.is_empty()
        || REGISTER_COUNTRIES
            .iter()
            .any(|covered| country.eq_ignore_ascii_case(covered))
}

/// Turn a collaborator answer into a record fragment; anything unusable is empty.
fn fetch_fragment(
    provider: Provider,
    answer: dossier_providers::Result<Value>,
    map: fn(&Value) -> dossier_providers::Result<CompanyRecord>,
) -> CompanyRecord {
    let payload = match answer {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(%provider, error = %e, "register request failed, continuing without it");
            return CompanyRecord::new();
        }
    };

    if is_empty_payload(&payload) {
        tracing::warn!(%provider, "register returned no data");
        return CompanyRecord::new();
    }

    map(&payload).unwrap_or_else(|e| {
        tracing::warn!(%provider, error = %e, "ignoring unreadable register payload");
        CompanyRecord::new()
    })
}

fn take_text(target: &mut String, fetched: String) {
    if !fetched.is_empty() {
        *target = fetched;
    }
}

fn take_number(target: &mut f64, fetched: f64) {
    if fetched != 0.0 {
        *target = fetched;
    }
}

/// Copy every non-empty field of `fetched` over `known`.
///
/// Non-empty fetched owners replace the known list as a whole.
/// Representatives are left alone.
pub fn merge(known: &mut CompanyRecord, fetched: CompanyRecord) {
    let company = &mut known.company;
    let f = fetched.company;

    take_text(&mut company.name, f.name);
    take_text(&mut company.legal_form, f.legal_form);
    take_text(&mut company.purpose, f.purpose);
    take_text(&mut company.country, f.country);
    take_text(&mut company.address, f.address);
    take_text(&mut company.city, f.city);
    take_text(&mut company.postal_code, f.postal_code);
    take_text(&mut company.street, f.street);
    take_text(&mut company.identifier, f.identifier);
    take_text(&mut company.register_court, f.register_court);
    take_text(&mut company.register_number, f.register_number);
    take_text(&mut company.register_type, f.register_type);
    take_text(&mut company.support_phone, f.support_phone);
    take_text(&mut company.support_email, f.support_email);

    if f.status.as_deref().is_some_and(|s| !s.is_empty()) {
        company.status = f.status;
    }
    if !f.industry_codes.is_empty() {
        company.industry_codes = f.industry_codes;
    }

    take_number(&mut known.capital.total_amount, fetched.capital.total_amount);
    take_number(&mut known.capital.total_shares, fetched.capital.total_shares);
    take_text(&mut known.capital.currency, fetched.capital.currency);

    if !fetched.owners.is_empty() {
        known.owners = fetched.owners;
    }
}
