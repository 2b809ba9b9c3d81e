use std::collections::BTreeMap;
use thiserror::Error;

/// Structural problems in a list of field descriptors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("field `{field}` depends on unknown field `{dependency}`")]
    UnknownDependency { field: String, dependency: String },

    #[error("dependency cycle involving field `{0}`")]
    DependencyCycle(String),

    #[error("field `{0}` combines static options with a dependency")]
    StaticOptionsWithDependency(String),

    #[error("field `{0}` declares options but is not a select")]
    OptionsOnNonSelect(String),
}

/// Errors scoped to a single open form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("validation failed for {} field(s)", errors.len())]
    ValidationFailed { errors: BTreeMap<String, String> },

    #[error("loading options for `{field}` failed: {message}")]
    OptionFetchFailed { field: String, message: String },

    #[error("submission failed: {message}")]
    SubmissionFailed {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("field `{0}` is disabled until its dependencies are set")]
    FieldDisabled(String),

    #[error("options of `{0}` are still loading")]
    OptionsLoading(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{0}` does not hold files")]
    NotAFileField(String),
}

impl FormError {
    /// Stable code of the error category
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed { .. } => "VALIDATION_FAILED",
            Self::OptionFetchFailed { .. } => "OPTION_FETCH_FAILED",
            Self::SubmissionFailed { .. } => "SUBMISSION_FAILED",
            Self::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            Self::FieldDisabled(_) => "FIELD_DISABLED",
            Self::OptionsLoading(_) => "OPTIONS_LOADING",
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::NotAFileField(_) => "NOT_A_FILE_FIELD",
        }
    }
}
