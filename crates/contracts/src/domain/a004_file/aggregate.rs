use crate::domain::common::record_helpers::{put_file, put_opt_text, put_text};
use crate::shared::api::UploadedFile;
use crate::shared::forms::{ExternalId, FormRecord, InitialValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Downloadable document published on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: ExternalId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub attachment: Option<UploadedFile>,
}

impl FormRecord for FileEntry {
    fn initial_values(&self) -> BTreeMap<String, InitialValue> {
        let mut values = BTreeMap::new();
        put_text(&mut values, "title", &self.title);
        put_opt_text(&mut values, "category", self.category.as_ref());
        put_file(&mut values, "attachment", self.attachment.as_ref());
        values
    }
}
