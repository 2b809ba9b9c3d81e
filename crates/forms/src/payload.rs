//! Transport payload built on successful validation

use crate::engine::FormMode;
use crate::schema::FieldSchema;
use crate::value::{FieldValue, FileRef, FormValues};

/// Field carrying the method override on updates
pub const METHOD_OVERRIDE_FIELD: &str = "_method";
pub const METHOD_OVERRIDE_UPDATE: &str = "PUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    Text(String),
    File(FileRef),
}

/// Ordered multipart-like list of named parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    parts: Vec<(String, PayloadPart)>,
}

impl Payload {
    pub fn parts(&self) -> &[(String, PayloadPart)] {
        &self.parts
    }

    pub fn get(&self, name: &str) -> Option<&PayloadPart> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PayloadPart::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn push(&mut self, name: &str, part: PayloadPart) {
        self.parts.push((name.to_string(), part));
    }
}

pub(crate) fn build(schema: &FieldSchema, values: &FormValues, mode: FormMode) -> Payload {
    let mut payload = Payload::default();
    for field in schema.fields() {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        match value {
            FieldValue::Empty => {}
            FieldValue::Text(s) if s.trim().is_empty() => {}
            FieldValue::Text(s) => payload.push(&field.name, PayloadPart::Text(s.clone())),
            FieldValue::File(f) => {
                if let Some(file) = &f.file {
                    payload.push(&field.name, PayloadPart::File(file.clone()));
                } else if let Some(id) = f.resolved_id.as_deref().filter(|id| !id.is_empty()) {
                    payload.push(&field.name, PayloadPart::Text(id.to_string()));
                }
            }
        }
    }
    if mode == FormMode::Edit {
        payload.push(
            METHOD_OVERRIDE_FIELD,
            PayloadPart::Text(METHOD_OVERRIDE_UPDATE.to_string()),
        );
    }
    payload
}
