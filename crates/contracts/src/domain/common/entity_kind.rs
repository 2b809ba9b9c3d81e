use crate::domain::{a001_mosque, a002_charity, a003_student, a004_file};
use crate::shared::forms::FieldDescriptor;

/// Admin entities edited through the generic form modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Mosque,
    Charity,
    Student,
    File,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mosque => "mosque",
            Self::Charity => "charity",
            Self::Student => "student",
            Self::File => "file",
        }
    }

    /// Collection path on the remote API
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Mosque => a001_mosque::ENDPOINT,
            Self::Charity => a002_charity::ENDPOINT,
            Self::Student => a003_student::ENDPOINT,
            Self::File => a004_file::ENDPOINT,
        }
    }

    /// Translation key of the entity name
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::Mosque => "entities.mosque",
            Self::Charity => "entities.charity",
            Self::Student => "entities.student",
            Self::File => "entities.file",
        }
    }

    pub fn form_fields(&self) -> Vec<FieldDescriptor> {
        match self {
            Self::Mosque => a001_mosque::schema::form_fields(),
            Self::Charity => a002_charity::schema::form_fields(),
            Self::Student => a003_student::schema::form_fields(),
            Self::File => a004_file::schema::form_fields(),
        }
    }

    pub fn all() -> [EntityKind; 4] {
        [Self::Mosque, Self::Charity, Self::Student, Self::File]
    }
}
