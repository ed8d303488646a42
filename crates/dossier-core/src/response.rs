//! Response envelope handed to the web layer.

use crate::error::Result;
use crate::record::CompanyRecord;
use serde::{Deserialize, Serialize};

/// Status code, message and serialized record in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP-style status code chosen by the pipeline
    pub status_code: u16,
    /// Short human-readable outcome
    pub message: String,
    /// Transport mapping of the record (see [`CompanyRecord::serialize`])
    pub data: serde_json::Value,
}

impl ApiResponse {
    /// Build a response carrying a cleaned, serialized record.
    pub fn with_record(
        status_code: u16,
        message: impl Into<String>,
        mut record: CompanyRecord,
    ) -> Result<Self> {
        Ok(Self {
            status_code,
            message: message.into(),
            data: record.to_transport()?,
        })
    }

    /// Build a response whose data is the empty record.
    pub fn empty(status_code: u16, message: impl Into<String>) -> Result<Self> {
        Self::with_record(status_code, message, CompanyRecord::new())
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
