pub mod api_utils;
pub mod entity_form;
pub mod i18n;
pub mod modal_frame;
pub mod toast;
