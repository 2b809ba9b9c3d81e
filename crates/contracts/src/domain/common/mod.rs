//! Common types shared by all admin entities

pub mod entity_kind;
pub mod location;
pub mod record_helpers;

// Re-exports
pub use entity_kind::EntityKind;
