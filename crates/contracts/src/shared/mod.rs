pub mod api;
pub mod forms;
