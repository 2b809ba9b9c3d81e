//! City -> district -> association -> mosque cascade used by several entities

use crate::shared::forms::FieldDescriptor;

pub const CITY_ID: &str = "city_id";
pub const DISTRICT_ID: &str = "district_id";
pub const ASSOCIATION_ID: &str = "association_id";
pub const MOSQUE_ID: &str = "mosque_id";

/// Option source keys understood by the frontend fetcher
pub mod sources {
    pub const CITIES: &str = "cities";
    pub const DISTRICTS: &str = "districts";
    pub const ASSOCIATIONS: &str = "associations";
    pub const MOSQUES: &str = "mosques";
}

pub fn city_field() -> FieldDescriptor {
    FieldDescriptor::select_remote(CITY_ID, "fields.city", sources::CITIES)
}

pub fn district_field() -> FieldDescriptor {
    FieldDescriptor::select_remote(DISTRICT_ID, "fields.district", sources::DISTRICTS)
        .depends_on(&[CITY_ID])
}

pub fn association_field() -> FieldDescriptor {
    FieldDescriptor::select_remote(ASSOCIATION_ID, "fields.association", sources::ASSOCIATIONS)
        .depends_on(&[CITY_ID, DISTRICT_ID])
}

pub fn mosque_field() -> FieldDescriptor {
    FieldDescriptor::select_remote(MOSQUE_ID, "fields.mosque", sources::MOSQUES)
        .depends_on(&[DISTRICT_ID])
}
