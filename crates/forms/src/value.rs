use contracts::shared::forms::{InitialValue, StoredFile};
use std::collections::BTreeMap;

/// File picked on the device, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Value of a file-kind field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileValue {
    /// Newly chosen file, if any
    pub file: Option<FileRef>,
    /// Identifier already known remotely (existing record or finished upload)
    pub resolved_id: Option<String>,
    pub resolved_url: Option<String>,
}

impl FileValue {
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.resolved_id.as_deref().map_or(true, str::is_empty)
    }
}

impl From<StoredFile> for FileValue {
    fn from(stored: StoredFile) -> Self {
        Self {
            file: None,
            resolved_id: Some(stored.id),
            resolved_url: Some(stored.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    File(FileValue),
}

impl FieldValue {
    /// Empty strings collapse to `Empty`
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::File(f) => f.is_empty(),
        }
    }

    /// Text content, `""` for empty and file values
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_file(&self) -> Option<&FileValue> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }
}

impl From<InitialValue> for FieldValue {
    fn from(value: InitialValue) -> Self {
        match value {
            InitialValue::Text(s) => Self::text(s),
            InitialValue::File(stored) => Self::File(stored.into()),
        }
    }
}

pub type FormValues = BTreeMap<String, FieldValue>;

/// Converts a record's initial values into form values
pub fn values_from_record(initial: BTreeMap<String, InitialValue>) -> FormValues {
    initial
        .into_iter()
        .map(|(name, value)| (name, FieldValue::from(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::Text("  ".into()).is_empty());
        assert!(!FieldValue::text("1").is_empty());
        assert!(FieldValue::File(FileValue::default()).is_empty());
        assert!(!FieldValue::File(FileValue {
            resolved_id: Some("3".into()),
            ..Default::default()
        })
        .is_empty());
    }

    #[test]
    fn test_stored_file_keeps_identifier() {
        let value = FieldValue::from(InitialValue::File(StoredFile {
            id: "12".into(),
            url: "https://cdn.example/12.jpg".into(),
        }));
        let file = value.as_file().unwrap();
        assert_eq!(file.resolved_id.as_deref(), Some("12"));
        assert!(file.file.is_none());
        assert_eq!(value.as_text(), "");
    }
}
