//! Error types for reconciliation.

use dossier_core::DossierError;
use dossier_providers::ProviderError;
use thiserror::Error;

/// Errors surfaced by the request pipeline.
///
/// Collaborator failures during enrichment are absorbed by the engine and
/// never show up here; only the caller's own input can fail a request.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The caller's payload could not be mapped
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Building the response failed
    #[error("Core error: {0}")]
    Core(#[from] DossierError),
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
