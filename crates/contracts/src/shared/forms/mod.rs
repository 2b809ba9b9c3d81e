//! Declarative form vocabulary shared by the form engine and the UI
//!
//! A form is described by an ordered list of [`FieldDescriptor`]s. Descriptors
//! carry no behaviour: the `forms` crate validates them into a schema and runs
//! the dependent-selection state machine on top of it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::forms::FieldDescriptor;
//!
//! let fields = vec![
//!     FieldDescriptor::select_remote("city_id", "fields.city", "cities").required(),
//!     FieldDescriptor::select_remote("district_id", "fields.district", "districts")
//!         .depends_on(&["city_id"])
//!         .required(),
//! ];
//! ```

mod descriptor;
mod field_kind;
mod option;
mod record;

pub use descriptor::{FieldDescriptor, OptionSource};
pub use field_kind::FieldKind;
pub use option::{ExternalId, RawOption, SelectOption};
pub use record::{FormRecord, InitialValue, StoredFile};
