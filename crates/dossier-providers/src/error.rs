//! Error types for the provider subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The provider endpoints this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Text-to-structure extraction of company documents
    Extraction,
    /// Register search by company name
    RegistrySearch,
    /// Register company details
    RegistryDetails,
    /// Register ownership listing
    RegistryOwners,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction => write!(f, "extraction"),
            Self::RegistrySearch => write!(f, "registry-search"),
            Self::RegistryDetails => write!(f, "registry-details"),
            Self::RegistryOwners => write!(f, "registry-owners"),
        }
    }
}

/// Errors that can occur while reading provider payloads.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A required key is missing or a value has the wrong shape
    #[error("malformed {provider} payload: {reason}")]
    MalformedPayload {
        /// Provider the payload came from
        provider: Provider,
        /// What was wrong with it
        reason: String,
    },

    /// The provider could not be reached or refused the request
    #[error("{provider} unavailable: {reason}")]
    Unavailable {
        /// Provider that failed
        provider: Provider,
        /// Failure reported by the collaborator
        reason: String,
    },
}

impl ProviderError {
    /// Shorthand for [`ProviderError::MalformedPayload`].
    pub fn malformed(provider: Provider, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            provider,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ProviderError::Unavailable`].
    pub fn unavailable(provider: Provider, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            provider,
            reason: reason.into(),
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
