//! Generic create/edit modal driven by an entity's field schema

pub mod fields;
pub mod file_input;
pub mod view;
pub mod view_model;

pub use view::EntityFormModal;
pub use view_model::EntityFormVm;
