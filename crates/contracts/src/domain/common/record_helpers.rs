use crate::shared::api::UploadedFile;
use crate::shared::forms::{ExternalId, InitialValue, StoredFile};
use std::collections::BTreeMap;

pub(crate) fn put_text(values: &mut BTreeMap<String, InitialValue>, key: &str, value: &str) {
    if !value.is_empty() {
        values.insert(key.to_string(), InitialValue::text(value));
    }
}

pub(crate) fn put_opt_text(
    values: &mut BTreeMap<String, InitialValue>,
    key: &str,
    value: Option<&String>,
) {
    if let Some(v) = value {
        put_text(values, key, v);
    }
}

pub(crate) fn put_id(
    values: &mut BTreeMap<String, InitialValue>,
    key: &str,
    value: Option<&ExternalId>,
) {
    if let Some(id) = value {
        values.insert(key.to_string(), InitialValue::Text(id.to_string()));
    }
}

pub(crate) fn put_file(
    values: &mut BTreeMap<String, InitialValue>,
    key: &str,
    value: Option<&UploadedFile>,
) {
    if let Some(file) = value {
        values.insert(
            key.to_string(),
            InitialValue::File(StoredFile {
                id: file.id.to_string(),
                url: file.url.clone(),
            }),
        );
    }
}
