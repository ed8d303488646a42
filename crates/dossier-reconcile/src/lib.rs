//! Dossier Reconcile - Multi-source company record reconciliation.
//!
//! This crate finds a company in the register, even when only its name is
//! known, and merges register data into a record built from another source.
//! Known data is never replaced by an empty value, and a failing register
//! endpoint never fails the request.
//!
//! # Features
//!
//! - Fuzzy name matching with a fixed similarity threshold
//! - Identifier validation to skip the search when possible
//! - Field-level merging of register details and ownership
//! - Request flows gated by provider availability from configuration
//!
//! # Example
//!
//! ```rust
//! use dossier_core::CompanyRecord;
//! use dossier_providers::StaticRegistry;
//! use dossier_reconcile::Reconciler;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = StaticRegistry::new()
//!     .with_hit("Musterfirma GmbH", "DE-HRB-123456-00001")
//!     .with_details(
//!         "DE-HRB-123456-00001",
//!         json!({"id": "DE-HRB-123456-00001", "name": {"name": "Musterfirma GmbH"},
//!                "address": {"city": "Berlin"}}),
//!     );
//!
//! let reconciler = Reconciler::new(Arc::new(registry));
//! let record = reconciler.enrich(CompanyRecord::with_name("Musterfirma GmbH"));
//!
//! assert_eq!(record.company.identifier, "DE-HRB-123456-00001");
//! assert_eq!(record.company.city, "Berlin");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod engine;
pub mod error;
pub mod matcher;
pub mod pipeline;

// Re-export commonly used types
pub use engine::{merge, EnrichOutcome, Enrichment, Reconciler};
pub use error::{ReconcileError, Result};
pub use matcher::{best_match, best_match_scored, similarity, Candidate, MATCH_THRESHOLD};
pub use pipeline::Pipeline;
