use super::file_input::read_file;
use crate::domain::common::{records, RestOptionFetcher, RestSubmitter, RestUploader};
use crate::shared::i18n::I18nContext;
use crate::shared::toast::ToastService;
use contracts::domain::common::EntityKind;
use contracts::shared::forms::{FieldDescriptor, FieldKind, SelectOption};
use forms::{
    values_from_record, Collaborators, FetchOutcome, FetchTicket, FieldSchema, FieldValue,
    FileValue, FormController, FormError, FormMode, FormSnapshot, FormValues, Notify, NotifyKind,
    SchemaError, SelectionState, Translate,
};
use leptos::prelude::*;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;

/// ViewModel of the generic entity form
///
/// The controller is not `Send`, so it lives in local storage and every
/// async step re-reads it; after the modal unmounts those reads fail and
/// the step is dropped.
#[derive(Clone, Copy)]
pub struct EntityFormVm {
    pub kind: EntityKind,
    pub record_id: StoredValue<Option<String>>,
    pub fields: StoredValue<Vec<FieldDescriptor>>,
    pub snapshot: RwSignal<FormSnapshot>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    i18n: I18nContext,
    toasts: ToastService,
    controller: StoredValue<Rc<FormController>, LocalStorage>,
}

impl EntityFormVm {
    /// Opens a create form, or an edit form for `record_id` once it is loaded
    pub fn new(
        kind: EntityKind,
        record_id: Option<String>,
        i18n: I18nContext,
        toasts: ToastService,
    ) -> Result<Self, SchemaError> {
        let schema = Arc::new(FieldSchema::new(kind.form_fields())?);
        let collaborators = Collaborators {
            fetcher: Rc::new(RestOptionFetcher),
            uploader: Rc::new(RestUploader),
            submitter: Rc::new(RestSubmitter::new(kind.endpoint(), record_id.clone())),
            translator: Rc::new(i18n),
            notifier: Rc::new(toasts),
        };
        let (controller, tickets) = FormController::open(
            Arc::clone(&schema),
            FormValues::new(),
            FormMode::Create,
            collaborators,
        );

        let vm = Self {
            kind,
            record_id: StoredValue::new(record_id.clone()),
            fields: StoredValue::new(schema.fields().to_vec()),
            snapshot: RwSignal::new(controller.snapshot()),
            loading: RwSignal::new(record_id.is_some()),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            i18n,
            toasts,
            controller: StoredValue::new_local(Rc::new(controller)),
        };

        match record_id {
            // The reset after loading issues its own fetches
            Some(id) => vm.load_record(id),
            None => vm.spawn_fetches(tickets),
        }
        Ok(vm)
    }

    pub fn is_edit(&self) -> bool {
        self.record_id.with_value(Option::is_some)
    }

    pub fn title(&self) -> String {
        let action = if self.is_edit() { "form.edit" } else { "form.create" };
        format!("{} {}", self.i18n.t(action), self.i18n.t(self.kind.title_key()))
    }

    fn controller(&self) -> Option<Rc<FormController>> {
        self.controller.try_get_value()
    }

    /// Copies the controller state into the signals
    fn sync(&self) {
        let snapshot = self.controller.try_with_value(|c| c.snapshot());
        if let Some(snapshot) = snapshot {
            let _ = self.saving.try_set(snapshot.submitting);
            let _ = self.snapshot.try_set(snapshot);
        }
    }

    fn spawn_fetches(&self, tickets: Vec<FetchTicket>) {
        for ticket in tickets {
            let vm = *self;
            spawn_local(async move {
                let Some(controller) = vm.controller() else {
                    return;
                };
                if let FetchOutcome::Failed(err) = controller.run_fetch(ticket).await {
                    log::warn!("{}: {}", err.code(), err);
                }
                vm.sync();
            });
        }
    }

    fn load_record(&self, id: String) {
        let vm = *self;
        spawn_local(async move {
            match records::fetch_initial_values(vm.kind, &id).await {
                Ok(initial) => {
                    let tickets = vm
                        .controller
                        .try_with_value(|c| c.reset(values_from_record(initial), FormMode::Edit));
                    let _ = vm.loading.try_set(false);
                    if let Some(tickets) = tickets {
                        vm.sync();
                        vm.spawn_fetches(tickets);
                    }
                }
                Err(e) => {
                    log::error!("loading {} {} failed: {}", vm.kind.as_str(), id, e);
                    let _ = vm.loading.try_set(false);
                    let _ = vm.error.try_set(Some(e.user_message()));
                    vm.toasts.notify(
                        &vm.i18n.translate("notifications.load_failed"),
                        NotifyKind::Error,
                    );
                }
            }
        });
    }

    fn apply(&self, name: &str, result: Option<Result<Vec<FetchTicket>, FormError>>) {
        match result {
            Some(Ok(tickets)) => {
                self.sync();
                self.spawn_fetches(tickets);
            }
            Some(Err(e)) => log::error!("updating `{}` failed: {}", name, e),
            None => {}
        }
    }

    pub fn set_text(&self, name: &str, value: String) {
        let result = self
            .controller
            .try_with_value(|c| c.set_value(name, FieldValue::text(value)));
        self.apply(name, result);
    }

    /// Reads a picked file; images are uploaded right away, device files
    /// travel with the submission
    pub fn choose_file(&self, name: &str, file: web_sys::File) {
        let Some(kind) = self.field(name).map(|f| f.kind) else {
            log::error!("unknown file field `{}`", name);
            return;
        };
        let vm = *self;
        let name = name.to_string();
        spawn_local(async move {
            let file = match read_file(file).await {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("{}", e);
                    vm.toasts.notify(
                        &vm.i18n.translate("notifications.upload_failed"),
                        NotifyKind::Error,
                    );
                    return;
                }
            };
            let Some(controller) = vm.controller() else {
                return;
            };
            let result = match kind {
                FieldKind::ImagePicker => controller.upload_file(&name, file).await,
                _ => controller.set_file(&name, Some(file), None, None),
            };
            vm.apply(&name, Some(result));
        });
    }

    pub fn clear_file(&self, name: &str) {
        let result = self
            .controller
            .try_with_value(|c| c.set_file(name, None, None, None));
        self.apply(name, result);
    }

    /// Save stays unavailable until edit-mode options are reconciled
    pub fn can_save(&self) -> bool {
        !self.saving.get() && !self.loading.get() && !self.snapshot.with(|s| s.awaiting_options())
    }

    /// Validates and submits; `on_saved` runs after a successful save
    pub fn save(&self, on_saved: Callback<()>) {
        if !self.can_save_untracked() {
            return;
        }
        let Some(controller) = self.controller() else {
            return;
        };
        let vm = *self;
        vm.error.set(None);
        vm.saving.set(true);
        spawn_local(async move {
            let result = controller.submit().await;
            vm.sync();
            match result {
                Ok(()) => on_saved.run(()),
                Err(FormError::SubmissionFailed { message, .. }) => {
                    let _ = vm.error.try_set(Some(message).filter(|m| !m.is_empty()));
                }
                Err(e) => log::debug!("save rejected: {}", e.code()),
            }
        });
    }

    fn can_save_untracked(&self) -> bool {
        !self.saving.get_untracked()
            && !self.loading.get_untracked()
            && !self.snapshot.with_untracked(|s| s.awaiting_options())
    }

    pub fn field(&self, name: &str) -> Option<FieldDescriptor> {
        self.fields
            .with_value(|fields| fields.iter().find(|f| f.name == name).cloned())
    }

    pub fn value_text(&self, name: &str) -> String {
        self.snapshot
            .with(|s| s.value(name).as_text().to_string())
    }

    pub fn file_value(&self, name: &str) -> Option<FileValue> {
        self.snapshot.with(|s| s.value(name).as_file().cloned())
    }

    pub fn options(&self, name: &str) -> Vec<SelectOption> {
        self.snapshot.with(|s| s.options(name).to_vec())
    }

    pub fn state(&self, name: &str) -> SelectionState {
        self.snapshot.with(|s| s.state(name))
    }

    pub fn field_error(&self, name: &str) -> Option<String> {
        self.snapshot.with(|s| s.error(name).map(str::to_string))
    }

    /// Input is locked while loading, saving, or while an ancestor is unset
    pub fn is_locked(&self, name: &str) -> bool {
        self.loading.get() || self.saving.get() || !self.state(name).is_enabled()
    }
}
