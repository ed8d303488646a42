//! Request flows: records from extraction output, and records by company name.

use crate::engine::Reconciler;
use crate::error::Result;
use dossier_core::{ApiResponse, AppConfig, CompanyRecord};
use dossier_providers::{map_extraction_response, RegistrySource};
use serde_json::Value;
use std::sync::Arc;

const UNAVAILABLE: (u16, &str) = (503, "Route is unavailable");
const NOTHING_EXTRACTED: (u16, &str) = (422, "No company data could be extracted");
const EXTRACTED: (u16, &str) = (200, "Data processed successfully");
const FOUND_BY_NAME: (u16, &str) = (200, "Got the data");

/// Runs the business flows under the configured provider availability.
pub struct Pipeline {
    config: AppConfig,
    reconciler: Option<Reconciler>,
}

impl Pipeline {
    /// Create a pipeline without a register collaborator.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            reconciler: None,
        }
    }

    /// Attach the register collaborator.
    #[must_use]
    pub fn with_registry(mut self, source: Arc<dyn RegistrySource>) -> Self {
        let reconciler =
            Reconciler::new(source).with_only_active(self.config.providers.registry.only_active);
        self.reconciler = Some(reconciler);
        self
    }

    /// The configuration this pipeline runs under.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The register reconciler, if the register is enabled and attached.
    fn registry(&self) -> Option<&Reconciler> {
        let registry = &self.config.providers.registry;
        if registry.enabled {
            self.reconciler.as_ref()
        } else {
            tracing::debug!(message = %registry.message, "register disabled");
            None
        }
    }

    /// Build a record from the extraction collaborator's answer.
    ///
    /// The record is enriched from the register when it is available.
    pub fn from_extraction(&self, response: &Value) -> Result<ApiResponse> {
        let extraction = &self.config.providers.extraction;
        if !extraction.enabled {
            tracing::debug!(message = %extraction.message, "extraction disabled");
            return Ok(ApiResponse::empty(UNAVAILABLE.0, UNAVAILABLE.1)?);
        }

        let Some(record) = map_extraction_response(response)? else {
            return Ok(ApiResponse::empty(NOTHING_EXTRACTED.0, NOTHING_EXTRACTED.1)?);
        };

        let record = match self.registry() {
            Some(reconciler) => reconciler.enrich(record),
            None => record,
        };

        Ok(ApiResponse::with_record(EXTRACTED.0, EXTRACTED.1, record)?)
    }

    /// Look a company up in the register by name.
    pub fn by_company_name(&self, name: &str) -> Result<ApiResponse> {
        let Some(reconciler) = self.registry() else {
            return Ok(ApiResponse::empty(UNAVAILABLE.0, UNAVAILABLE.1)?);
        };

        let record = reconciler.enrich(CompanyRecord::with_name(name));
        Ok(ApiResponse::with_record(FOUND_BY_NAME.0, FOUND_BY_NAME.1, record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_providers::StaticRegistry;
    use serde_json::json;

    fn disabled_registry() -> AppConfig {
        let mut config = AppConfig::default();
        config.providers.registry.enabled = false;
        config
    }

    #[test]
    fn test_by_name_without_registry() {
        let pipeline = Pipeline::new(AppConfig::default());
        let response = pipeline.by_company_name("Acme").expect("response");
        assert_eq!(response.status_code, 503);
        assert_eq!(response.message, "Route is unavailable");
    }

    #[test]
    fn test_by_name_registry_disabled() {
        let pipeline =
            Pipeline::new(disabled_registry()).with_registry(Arc::new(StaticRegistry::new()));
        let response = pipeline.by_company_name("Acme").expect("response");
        assert_eq!(response.status_code, 503);
        assert_eq!(response.data["company"]["name"], "");
    }

    #[test]
    fn test_extraction_disabled() {
        let mut config = AppConfig::default();
        config.providers.extraction.enabled = false;

        let response = Pipeline::new(config)
            .from_extraction(&json!({"success": true, "data": {"company": {}}}))
            .expect("response");
        assert_eq!(response.status_code, 503);
    }

    #[test]
    fn test_extraction_without_result() {
        let response = Pipeline::new(AppConfig::default())
            .from_extraction(&json!({"success": false}))
            .expect("response");
        assert_eq!(response.status_code, 422);
        assert_eq!(response.data["representatives"], json!([]));
    }

    #[test]
    fn test_extraction_malformed() {
        let result = Pipeline::new(AppConfig::default()).from_extraction(&json!({"ok": true}));
        assert!(matches!(result, Err(crate::ReconcileError::Provider(_))));
    }
}
