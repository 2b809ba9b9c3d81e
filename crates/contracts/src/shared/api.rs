//! Envelopes used by the remote REST API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::forms::ExternalId;

/// `{ "data": ... }` wrapper around every successful payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Error body; `errors` maps field names to messages on validation failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ApiErrorResponse {
    /// First message per field
    pub fn first_field_errors(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .filter_map(|(field, messages)| {
                messages.first().map(|m| (field.clone(), m.clone()))
            })
            .collect()
    }
}

/// Result of a file upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: ExternalId,
    pub url: String,
}
