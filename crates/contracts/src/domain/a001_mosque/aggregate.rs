use crate::domain::common::record_helpers::{put_file, put_id, put_text};
use crate::shared::api::UploadedFile;
use crate::shared::forms::{ExternalId, FormRecord, InitialValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mosque {
    pub id: ExternalId,
    pub name: String,
    #[serde(default)]
    pub city_id: Option<ExternalId>,
    #[serde(default)]
    pub district_id: Option<ExternalId>,
    #[serde(default)]
    pub association_id: Option<ExternalId>,
    #[serde(default)]
    pub image: Option<UploadedFile>,
}

impl FormRecord for Mosque {
    fn initial_values(&self) -> BTreeMap<String, InitialValue> {
        let mut values = BTreeMap::new();
        put_text(&mut values, "name", &self.name);
        put_id(&mut values, "city_id", self.city_id.as_ref());
        put_id(&mut values, "district_id", self.district_id.as_ref());
        put_id(&mut values, "association_id", self.association_id.as_ref());
        put_file(&mut values, "image", self.image.as_ref());
        values
    }
}
