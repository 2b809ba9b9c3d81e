//! Cascading dependent-selection form engine
//!
//! A form is opened from a [`FieldSchema`] (validated descriptor list). The
//! [`FormEngine`] owns values, option caches, per-field selection states and
//! validation errors; it never performs I/O itself. Whenever a field needs
//! options it hands out a [`FetchTicket`], and the [`FormController`] runs
//! tickets against an [`OptionFetcher`] and commits the results back.
//!
//! Changing a field clears every field that depends on it, directly or
//! transitively. A fetch result only lands if it belongs to the most recently
//! issued request for its field.

mod collaborators;
mod controller;
mod engine;
mod error;
mod payload;
mod resolver;
mod schema;
mod selection;
mod validation;
mod value;

pub use collaborators::{
    FileUploader, Notify, NotifyKind, OptionFetcher, SubmitFailure, Submitter, Translate,
};
pub use controller::{Collaborators, FormController};
pub use engine::{FetchOutcome, FormEngine, FormMode, FormSnapshot};
pub use error::{FormError, SchemaError};
pub use payload::{Payload, PayloadPart, METHOD_OVERRIDE_FIELD, METHOD_OVERRIDE_UPDATE};
pub use resolver::{ancestor_values, normalize, resolve, Resolution};
pub use schema::FieldSchema;
pub use selection::{FetchTicket, SelectionState};
pub use value::{values_from_record, FieldValue, FileRef, FileValue, FormValues};
