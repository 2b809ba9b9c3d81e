//! Field kind enumeration for form schemas

use serde::{Deserialize, Serialize};

/// Kind of input a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Date,       // YYYY-MM-DD
    Select,     // static or remote options
    ImagePicker,
    DeviceFile, // arbitrary file from the device
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Select => "select",
            Self::ImagePicker => "image-picker",
            Self::DeviceFile => "device-file",
        }
    }

    /// File-kind fields hold a file reference rather than a string
    pub fn is_file(&self) -> bool {
        matches!(self, Self::ImagePicker | Self::DeviceFile)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select)
    }
}
