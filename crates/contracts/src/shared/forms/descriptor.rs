//! Field descriptor: one entry of a form schema

use super::field_kind::FieldKind;
use super::option::SelectOption;
use serde::{Deserialize, Serialize};

/// Where a field's selectable options come from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OptionSource {
    #[default]
    None,
    /// Fixed list, never refetched
    Static(Vec<SelectOption>),
    /// Key of an external option fetcher, called with the `depends_on` values
    Remote(String),
}

/// Declarative description of a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Translation key, resolved by the UI
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: OptionSource,
    /// Ancestor fields, in the order their values are passed to the fetcher
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: OptionSource::None,
            depends_on: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn image(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::ImagePicker)
    }

    pub fn device_file(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::DeviceFile)
    }

    pub fn select_static(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = OptionSource::Static(options);
        field
    }

    pub fn select_remote(
        name: impl Into<String>,
        label: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = OptionSource::Remote(source.into());
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn depends_on(mut self, fields: &[&str]) -> Self {
        self.depends_on = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Field declares at least one ancestor
    pub fn is_dependent(&self) -> bool {
        !self.depends_on.is_empty()
    }

    /// Key of the remote option source, if any
    pub fn remote_source(&self) -> Option<&str> {
        match &self.options {
            OptionSource::Remote(key) => Some(key),
            _ => None,
        }
    }

    pub fn static_options(&self) -> Option<&[SelectOption]> {
        match &self.options {
            OptionSource::Static(options) => Some(options),
            _ => None,
        }
    }
}
