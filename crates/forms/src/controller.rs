//! Async driver binding a [`FormEngine`] to its collaborators
//!
//! Single-threaded: the engine sits in a `RefCell` and no borrow is held
//! across an `.await`, so fetches and submissions may interleave freely.

use crate::collaborators::{FileUploader, Notify, NotifyKind, OptionFetcher, Submitter, Translate};
use crate::engine::{FetchOutcome, FormEngine, FormMode, FormSnapshot};
use crate::error::FormError;
use crate::schema::FieldSchema;
use crate::selection::FetchTicket;
use crate::value::{FieldValue, FileRef, FormValues};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// External services a form talks to
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Rc<dyn OptionFetcher>,
    pub uploader: Rc<dyn FileUploader>,
    pub submitter: Rc<dyn Submitter>,
    pub translator: Rc<dyn Translate>,
    pub notifier: Rc<dyn Notify>,
}

pub struct FormController {
    engine: RefCell<FormEngine>,
    collaborators: Collaborators,
}

impl FormController {
    /// Opens the form; the returned tickets must be passed to [`Self::run_fetch`]
    pub fn open(
        schema: Arc<FieldSchema>,
        initial: FormValues,
        mode: FormMode,
        collaborators: Collaborators,
    ) -> (Self, Vec<FetchTicket>) {
        let (engine, tickets) = FormEngine::open(schema, initial, mode);
        let controller = Self {
            engine: RefCell::new(engine),
            collaborators,
        };
        (controller, tickets)
    }

    pub fn reset(&self, initial: FormValues, mode: FormMode) -> Vec<FetchTicket> {
        self.engine.borrow_mut().reset(initial, mode)
    }

    pub fn set_value(&self, name: &str, value: FieldValue) -> Result<Vec<FetchTicket>, FormError> {
        self.engine.borrow_mut().set_value(name, value)
    }

    pub fn set_file(
        &self,
        name: &str,
        file: Option<FileRef>,
        resolved_id: Option<String>,
        resolved_url: Option<String>,
    ) -> Result<Vec<FetchTicket>, FormError> {
        self.engine
            .borrow_mut()
            .set_file(name, file, resolved_id, resolved_url)
    }

    /// Calls the option fetcher for `ticket` and commits the result
    pub async fn run_fetch(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self
            .collaborators
            .fetcher
            .fetch_options(&ticket.source, &ticket.ancestors)
            .await;
        let outcome = self.engine.borrow_mut().commit_fetch(&ticket, result);
        if let FetchOutcome::Failed(FormError::OptionFetchFailed { field, .. }) = &outcome {
            let label = self
                .engine
                .borrow()
                .schema()
                .get(field)
                .map(|f| f.label.clone())
                .unwrap_or_default();
            self.notify_key_for("notifications.options_failed", &label, NotifyKind::Error);
        }
        outcome
    }

    /// Uploads `file` and stores the returned identifier on the field
    ///
    /// On failure the previous value is left untouched.
    pub async fn upload_file(&self, name: &str, file: FileRef) -> Result<Vec<FetchTicket>, FormError> {
        {
            let engine = self.engine.borrow();
            let field = engine
                .schema()
                .get(name)
                .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
            if !field.kind.is_file() {
                return Err(FormError::NotAFileField(name.to_string()));
            }
        }
        match self.collaborators.uploader.upload(&file).await {
            Ok(stored) => self.set_file(name, None, Some(stored.id), Some(stored.url)),
            Err(message) => {
                log::warn!("upload for `{}` failed: {}", name, message);
                self.notify_key("notifications.upload_failed", NotifyKind::Error);
                Ok(Vec::new())
            }
        }
    }

    /// Validates, submits, and reports the outcome through the notifier
    pub async fn submit(&self) -> Result<(), FormError> {
        let (payload, is_edit) = {
            let mut engine = self.engine.borrow_mut();
            let payload = match engine.begin_submit(self.collaborators.translator.as_ref()) {
                Ok(payload) => payload,
                Err(err) => {
                    drop(engine);
                    if let FormError::ValidationFailed { .. } = err {
                        self.notify_key("notifications.validation_failed", NotifyKind::Error);
                    }
                    return Err(err);
                }
            };
            (payload, engine.mode().is_edit())
        };

        log::debug!("submitting {} part(s), edit = {}", payload.len(), is_edit);
        let result = self.collaborators.submitter.submit(payload, is_edit).await;
        let finished = self.engine.borrow_mut().finish_submit(result);
        match &finished {
            Ok(()) => self.notify_key("notifications.saved", NotifyKind::Success),
            Err(FormError::SubmissionFailed { message, .. }) => {
                log::warn!("submission failed: {}", message);
                let text = if message.is_empty() {
                    self.collaborators
                        .translator
                        .translate("notifications.save_failed")
                } else {
                    message.clone()
                };
                self.collaborators.notifier.notify(&text, NotifyKind::Error);
            }
            Err(_) => {}
        }
        finished
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.engine.borrow().snapshot()
    }

    pub fn is_submitting(&self) -> bool {
        self.engine.borrow().is_submitting()
    }

    pub fn schema(&self) -> Arc<FieldSchema> {
        Arc::clone(self.engine.borrow().schema())
    }

    fn notify_key(&self, key: &str, kind: NotifyKind) {
        let text = self.collaborators.translator.translate(key);
        self.collaborators.notifier.notify(&text, kind);
    }

    fn notify_key_for(&self, key: &str, label_key: &str, kind: NotifyKind) {
        let translator = &self.collaborators.translator;
        let text = translator
            .translate(key)
            .replace("{field}", &translator.translate(label_key));
        self.collaborators.notifier.notify(&text, kind);
    }
}
