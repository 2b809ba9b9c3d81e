use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File already stored remotely (result of an upload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub url: String,
}

/// Value a record contributes when a form opens in edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialValue {
    Text(String),
    File(StoredFile),
}

impl InitialValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Record that can prefill an edit form
pub trait FormRecord {
    /// Field name -> initial value; absent optional fields are simply omitted
    fn initial_values(&self) -> BTreeMap<String, InitialValue>;
}
