//! Option source resolution
//!
//! Decides, from a descriptor and the current values, whether a field is
//! disabled, enabled without any fetch, or needs its options fetched.

use crate::value::FormValues;
use contracts::shared::forms::{FieldDescriptor, RawOption, SelectOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An ancestor is empty
    Skip,
    /// Ancestors satisfied, nothing to fetch
    Enabled,
    /// Ancestors satisfied, call `source` with `ancestors`
    Fetch { source: String, ancestors: Vec<String> },
}

/// Values of `depends_on`, in declaration order; `None` if any is empty
pub fn ancestor_values(field: &FieldDescriptor, values: &FormValues) -> Option<Vec<String>> {
    field
        .depends_on
        .iter()
        .map(|name| {
            values
                .get(name)
                .filter(|v| !v.is_empty())
                .map(|v| v.as_text().to_string())
        })
        .collect()
}

pub fn resolve(field: &FieldDescriptor, values: &FormValues) -> Resolution {
    let Some(ancestors) = ancestor_values(field, values) else {
        return Resolution::Skip;
    };
    match field.remote_source() {
        Some(source) => Resolution::Fetch {
            source: source.to_string(),
            ancestors,
        },
        None => Resolution::Enabled,
    }
}

/// `{id, name}` records to `{value: id as string, label: name}`
pub fn normalize(raw: Vec<RawOption>) -> Vec<SelectOption> {
    raw.into_iter().map(SelectOption::from).collect()
}
