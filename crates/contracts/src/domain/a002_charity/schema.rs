use crate::domain::common::location::{city_field, district_field};
use crate::shared::forms::FieldDescriptor;

pub fn form_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "fields.name").required(),
        FieldDescriptor::email("email", "fields.email").required(),
        city_field().required(),
        district_field().required(),
        FieldDescriptor::image("logo", "fields.logo"),
    ]
}
