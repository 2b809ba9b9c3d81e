//! Contracts of the external collaborators the form engine talks to

use crate::payload::Payload;
use crate::value::FileRef;
use async_trait::async_trait;
use contracts::shared::forms::{RawOption, StoredFile};
use std::collections::BTreeMap;

/// Translation lookup; unknown keys should come back unchanged
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

/// User-visible feedback sink (toasts)
pub trait Notify {
    fn notify(&self, message: &str, kind: NotifyKind);
}

/// Supplies options of remote fields
#[async_trait(?Send)]
pub trait OptionFetcher {
    /// `ancestors` holds the `depends_on` values in declaration order
    async fn fetch_options(&self, source: &str, ancestors: &[String])
        -> Result<Vec<RawOption>, String>;
}

#[async_trait(?Send)]
pub trait FileUploader {
    async fn upload(&self, file: &FileRef) -> Result<StoredFile, String>;
}

/// Rejected submission, optionally naming offending fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitFailure {
    pub message: String,
    pub field_errors: BTreeMap<String, String>,
}

impl SubmitFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }
}

#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self, payload: Payload, is_edit: bool) -> Result<(), SubmitFailure>;
}
