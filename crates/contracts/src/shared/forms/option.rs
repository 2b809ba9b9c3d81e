use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as returned by the remote API: numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ExternalId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ExternalId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Option record as delivered by an option source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOption {
    pub id: ExternalId,
    pub name: String,
}

impl RawOption {
    pub fn new(id: impl Into<ExternalId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Selectable `{value, label}` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<RawOption> for SelectOption {
    fn from(raw: RawOption) -> Self {
        Self {
            value: raw.id.to_string(),
            label: raw.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_option_ids_deserialize_as_number_or_text() {
        let raw: Vec<RawOption> =
            serde_json::from_str(r#"[{"id": 10, "name": "D1"}, {"id": "x7", "name": "D2"}]"#)
                .unwrap();
        let options: Vec<SelectOption> = raw.into_iter().map(SelectOption::from).collect();
        assert_eq!(options[0], SelectOption::new("10", "D1"));
        assert_eq!(options[1], SelectOption::new("x7", "D2"));
    }
}
