use crate::domain::common::record_helpers::{put_id, put_opt_text, put_text};
use crate::shared::forms::{ExternalId, FormRecord, InitialValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: ExternalId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city_id: Option<ExternalId>,
    #[serde(default)]
    pub district_id: Option<ExternalId>,
    #[serde(default)]
    pub association_id: Option<ExternalId>,
    #[serde(default)]
    pub mosque_id: Option<ExternalId>,
}

impl FormRecord for Student {
    fn initial_values(&self) -> BTreeMap<String, InitialValue> {
        let mut values = BTreeMap::new();
        put_text(&mut values, "name", &self.name);
        put_opt_text(&mut values, "email", self.email.as_ref());
        put_opt_text(&mut values, "birth_date", self.birth_date.as_ref());
        put_opt_text(&mut values, "gender", self.gender.as_ref());
        put_id(&mut values, "city_id", self.city_id.as_ref());
        put_id(&mut values, "district_id", self.district_id.as_ref());
        put_id(&mut values, "association_id", self.association_id.as_ref());
        put_id(&mut values, "mosque_id", self.mosque_id.as_ref());
        values
    }
}
