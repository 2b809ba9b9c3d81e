use crate::shared::forms::{FieldDescriptor, SelectOption};

pub fn form_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("title", "fields.title").required(),
        FieldDescriptor::select_static(
            "category",
            "fields.category",
            vec![
                SelectOption::new("curriculum", "options.curriculum"),
                SelectOption::new("report", "options.report"),
                SelectOption::new("other", "options.other"),
            ],
        ),
        FieldDescriptor::device_file("attachment", "fields.attachment").required(),
    ]
}
