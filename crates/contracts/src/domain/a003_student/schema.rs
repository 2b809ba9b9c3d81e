use crate::domain::common::location::{association_field, city_field, district_field, mosque_field};
use crate::shared::forms::{FieldDescriptor, SelectOption};

pub fn form_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "fields.name").required(),
        FieldDescriptor::email("email", "fields.email"),
        FieldDescriptor::date("birth_date", "fields.birth_date").required(),
        FieldDescriptor::select_static(
            "gender",
            "fields.gender",
            vec![
                SelectOption::new("male", "options.male"),
                SelectOption::new("female", "options.female"),
            ],
        )
        .required(),
        city_field().required(),
        district_field().required(),
        association_field(),
        mosque_field(),
    ]
}
