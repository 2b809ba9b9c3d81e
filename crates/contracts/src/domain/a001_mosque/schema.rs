use crate::domain::common::location::{association_field, city_field, district_field};
use crate::shared::forms::FieldDescriptor;

pub fn form_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "fields.name").required(),
        city_field().required(),
        district_field().required(),
        association_field(),
        FieldDescriptor::image("image", "fields.image"),
    ]
}
