//! Dossier Core - Foundation crate for company data reconciliation.
//!
//! This crate provides the canonical company record, identifier validation,
//! error handling, configuration and logging setup that the other Dossier
//! crates depend on.
//!
//! # Modules
//!
//! - [`record`] - Canonical record model, cleanup and transport serialization
//! - [`types`] - Validated identifier newtypes (`RegistryId`, `Duns`)
//! - [`response`] - Response envelope for the web layer
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`logging`] - Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use dossier_core::{CompanyRecord, Person, RegistryId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut record = CompanyRecord::with_name("Musterfirma GmbH");
//! record.representatives.push(Person::default());
//!
//! assert!(RegistryId::is_valid("DE-HRB-123456-00001"));
//!
//! // Placeholder persons are dropped on the way out
//! let mapping = record.to_transport()?;
//! assert_eq!(mapping["representatives"].as_array().map(Vec::len), Some(0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, GeneralConfig, ProviderToggle, ProvidersConfig, RegistryConfig};
pub use error::{ConfigError, ConfigResult, DossierError, Result};
pub use record::{Capital, Company, CompanyRecord, Owner, Person};
pub use response::ApiResponse;
pub use types::{Duns, RegistryId};
