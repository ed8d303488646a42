//! Dossier Providers - Payload mapping for company data providers.
//!
//! Each provider answers in its own JSON dialect. This crate parses those
//! payloads into typed structs and maps them onto the canonical
//! [`CompanyRecord`](dossier_core::CompanyRecord). Mapping is pure; the
//! network side is abstracted behind [`RegistrySource`].
//!
//! # Architecture
//!
//! - **Extraction** ([`extraction`]): Records built from document extraction output
//! - **Registry** ([`registry`]): Company register search, details and owners
//! - **Source** ([`source`]): The register collaborator trait
//! - **Errors** ([`error`]): Provider-specific error types
//!
//! # Example
//!
//! ```rust
//! use dossier_providers::map_registry_details;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = map_registry_details(&json!({
//!     "id": "DE-HRB-123456-00001",
//!     "name": {"name": "Musterfirma GmbH"},
//!     "address": {"city": "Berlin", "country": "DE"}
//! }))?;
//!
//! assert_eq!(record.company.identifier, "DE-HRB-123456-00001");
//! assert_eq!(record.company.city, "Berlin");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod extraction;
mod payload;
pub mod registry;
pub mod source;

// Re-export commonly used types
pub use error::{Provider, ProviderError, Result};
pub use extraction::{map_extraction, map_extraction_response, ExtractionPayload};
pub use payload::is_empty_payload;
pub use registry::{
    map_registry_details, map_registry_owners, parse_search_response, SearchHit, SearchQuery,
    SearchResponse,
};
pub use source::{RegistrySource, StaticRegistry};
