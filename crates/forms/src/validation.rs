use crate::collaborators::Translate;
use crate::selection::SelectionState;
use crate::value::FieldValue;
use chrono::NaiveDate;
use contracts::shared::forms::{FieldDescriptor, FieldKind, SelectOption};

fn message(t: &dyn Translate, key: &str, field: &FieldDescriptor) -> String {
    t.translate(key).replace("{field}", &t.translate(&field.label))
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

/// First problem with a field's value, as a translated message
pub(crate) fn check_field(
    field: &FieldDescriptor,
    value: &FieldValue,
    state: SelectionState,
    options: &[SelectOption],
    t: &dyn Translate,
) -> Option<String> {
    if value.is_empty() {
        return field
            .required
            .then(|| message(t, "validation.required", field));
    }

    let text = value.as_text().trim();
    match field.kind {
        FieldKind::Email if !looks_like_email(text) => {
            Some(message(t, "validation.email", field))
        }
        FieldKind::Date if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() => {
            Some(message(t, "validation.date", field))
        }
        FieldKind::Select
            if state == SelectionState::Ready && !options.iter().any(|o| o.value == text) =>
        {
            Some(message(t, "validation.option", field))
        }
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Date
        | FieldKind::Select
        | FieldKind::ImagePicker
        | FieldKind::DeviceFile => None,
    }
}
