//! Form engine: value store + dependent selection state machine
//!
//! The engine is synchronous and owns all form state. Anything asynchronous
//! goes through [`FetchTicket`]s: the engine hands out a ticket whenever a
//! field needs options and the caller reports the result back with
//! [`FormEngine::commit_fetch`]. A ticket only commits if it is still the
//! latest one for its field and its ancestor values still match the form,
//! so late responses for superseded selections are dropped.

use crate::collaborators::{SubmitFailure, Translate};
use crate::error::FormError;
use crate::payload::{self, Payload};
use crate::resolver::{self, Resolution};
use crate::schema::FieldSchema;
use crate::selection::{FetchTicket, SelectionSlot, SelectionState};
use crate::validation;
use crate::value::{FieldValue, FileRef, FileValue, FormValues};
use contracts::shared::forms::{RawOption, SelectOption};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

static EMPTY_VALUE: FieldValue = FieldValue::Empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit)
    }
}

/// Result of reporting a fetch back to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Options committed; `cleared_stale` is set when an edit-mode value was
    /// not among them and got cleared
    Ready { options: usize, cleared_stale: bool },
    /// Superseded by a newer fetch or by an ancestor change
    Discarded,
    Failed(FormError),
}

/// Read-only copy of the observable form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub mode: FormMode,
    pub values: FormValues,
    /// Current options of every select field (static and fetched)
    pub options: BTreeMap<String, Vec<SelectOption>>,
    pub states: BTreeMap<String, SelectionState>,
    pub errors: BTreeMap<String, String>,
    pub submitting: bool,
}

impl FormSnapshot {
    pub fn value(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY_VALUE)
    }

    pub fn options(&self, name: &str) -> &[SelectOption] {
        self.options.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn state(&self, name: &str) -> SelectionState {
        self.states.get(name).copied().unwrap_or_default()
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// True while a select holds a value whose options are still loading
    pub fn awaiting_options(&self) -> bool {
        self.states
            .iter()
            .any(|(name, state)| *state == SelectionState::Loading && !self.value(name).is_empty())
    }
}

pub struct FormEngine {
    schema: Arc<FieldSchema>,
    mode: FormMode,
    values: FormValues,
    option_cache: BTreeMap<String, Vec<SelectOption>>,
    slots: BTreeMap<String, SelectionSlot>,
    errors: BTreeMap<String, String>,
    /// Edit-mode values still to be checked against freshly fetched options
    pending_reconcile: BTreeSet<String>,
    generation: u64,
    submitting: bool,
    /// Bumped on every reset; a submission only reports back into its own epoch
    submit_epoch: u64,
    submitted_epoch: Option<u64>,
}

impl FormEngine {
    /// Opens a form and returns the fetches needed to populate it
    pub fn open(
        schema: Arc<FieldSchema>,
        initial: FormValues,
        mode: FormMode,
    ) -> (Self, Vec<FetchTicket>) {
        let mut engine = Self {
            schema,
            mode,
            values: FormValues::new(),
            option_cache: BTreeMap::new(),
            slots: BTreeMap::new(),
            errors: BTreeMap::new(),
            pending_reconcile: BTreeSet::new(),
            generation: 0,
            submitting: false,
            submit_epoch: 0,
            submitted_epoch: None,
        };
        let tickets = engine.reset(initial, mode);
        (engine, tickets)
    }

    /// Replaces all values, drops option caches and errors, and invalidates
    /// every in-flight fetch
    pub fn reset(&mut self, initial: FormValues, mode: FormMode) -> Vec<FetchTicket> {
        let schema = Arc::clone(&self.schema);
        self.mode = mode;
        self.values = schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), FieldValue::Empty))
            .collect();
        for (name, value) in initial {
            if schema.contains(&name) {
                self.values.insert(name, value);
            } else {
                log::debug!("form reset: ignoring value for unknown field `{}`", name);
            }
        }
        self.option_cache.clear();
        self.errors.clear();
        self.submit_epoch += 1;

        self.pending_reconcile = match mode {
            FormMode::Edit => schema
                .fields()
                .iter()
                .filter(|f| f.remote_source().is_some())
                .filter(|f| !self.value(&f.name).is_empty())
                .map(|f| f.name.clone())
                .collect(),
            FormMode::Create => BTreeSet::new(),
        };

        for field in schema.fields() {
            let generation = self.next_generation();
            self.slots
                .entry(field.name.clone())
                .or_default()
                .disable(generation);
        }

        schema
            .topological()
            .filter_map(|f| self.evaluate(&f.name))
            .collect()
    }

    /// Sets a field and clears every field that depends on it
    ///
    /// A field with an empty ancestor only accepts an empty value.
    pub fn set_value(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> Result<Vec<FetchTicket>, FormError> {
        let schema = Arc::clone(&self.schema);
        let field = schema
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !value.is_empty() && resolver::ancestor_values(field, &self.values).is_none() {
            return Err(FormError::FieldDisabled(name.to_string()));
        }
        if self.values.get(name) == Some(&value) {
            return Ok(Vec::new());
        }
        self.values.insert(name.to_string(), value);
        self.pending_reconcile.remove(name);
        self.errors.remove(name);
        Ok(self.cascade(name))
    }

    /// Stores a chosen file and/or what an uploader already resolved for it
    pub fn set_file(
        &mut self,
        name: &str,
        file: Option<FileRef>,
        resolved_id: Option<String>,
        resolved_url: Option<String>,
    ) -> Result<Vec<FetchTicket>, FormError> {
        let field = self
            .schema
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !field.kind.is_file() {
            return Err(FormError::NotAFileField(name.to_string()));
        }
        let value = FileValue {
            file,
            resolved_id,
            resolved_url,
        };
        let value = if value.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::File(value)
        };
        self.set_value(name, value)
    }

    /// Reports the result of a fetch issued through `ticket`
    pub fn commit_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<RawOption>, String>,
    ) -> FetchOutcome {
        let schema = Arc::clone(&self.schema);
        let Some(field) = schema.get(&ticket.field) else {
            return FetchOutcome::Discarded;
        };
        let latest = self.slots.get(&ticket.field).map(|s| s.generation);
        if latest != Some(ticket.generation)
            || resolver::ancestor_values(field, &self.values).as_ref() != Some(&ticket.ancestors)
        {
            log::debug!(
                "discarding superseded options for `{}` ({:?})",
                ticket.field,
                ticket.ancestors
            );
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(raw) => {
                let options = resolver::normalize(raw);
                let count = options.len();
                let current = self.value(&ticket.field).clone();
                let stale = self.pending_reconcile.remove(&ticket.field)
                    && !current.is_empty()
                    && !options.iter().any(|o| o.value == current.as_text());

                self.option_cache.insert(ticket.field.clone(), options);
                self.slot_mut(&ticket.field).state = SelectionState::Ready;
                log::debug!("options for `{}` ready ({} items)", ticket.field, count);

                if stale {
                    log::debug!(
                        "clearing stale reference `{}` in `{}`",
                        current.as_text(),
                        ticket.field
                    );
                    self.clear_value(&ticket.field);
                }
                FetchOutcome::Ready {
                    options: count,
                    cleared_stale: stale,
                }
            }
            Err(message) => {
                log::warn!("options for `{}` failed: {}", ticket.field, message);
                self.option_cache.remove(&ticket.field);
                self.pending_reconcile.remove(&ticket.field);
                self.slot_mut(&ticket.field).state = SelectionState::Error;
                self.clear_value(&ticket.field);
                FetchOutcome::Failed(FormError::OptionFetchFailed {
                    field: ticket.field.clone(),
                    message,
                })
            }
        }
    }

    /// Checks every field; `errors` is replaced with the result
    pub fn validate(&mut self, t: &dyn Translate) -> Result<(), FormError> {
        let schema = Arc::clone(&self.schema);
        let errors: BTreeMap<String, String> = schema
            .fields()
            .iter()
            .filter_map(|field| {
                validation::check_field(
                    field,
                    self.value(&field.name),
                    self.state(&field.name),
                    self.options(&field.name),
                    t,
                )
                .map(|message| (field.name.clone(), message))
            })
            .collect();
        self.errors = errors;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::ValidationFailed {
                errors: self.errors.clone(),
            })
        }
    }

    /// Validates and builds the payload; marks the form as submitting
    pub fn begin_submit(&mut self, t: &dyn Translate) -> Result<Payload, FormError> {
        if self.submitting {
            return Err(FormError::SubmissionInProgress);
        }
        if let Some(field) = self.schema.fields().iter().find(|f| {
            self.state(&f.name) == SelectionState::Loading && !self.value(&f.name).is_empty()
        }) {
            return Err(FormError::OptionsLoading(field.name.clone()));
        }
        self.validate(t)?;
        let payload = payload::build(&self.schema, &self.values, self.mode);
        self.submitting = true;
        self.submitted_epoch = Some(self.submit_epoch);
        Ok(payload)
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmitFailure>) -> Result<(), FormError> {
        self.submitting = false;
        let same_epoch = self.submitted_epoch.take() == Some(self.submit_epoch);
        match result {
            Ok(()) => Ok(()),
            Err(failure) => {
                if same_epoch {
                    for (field, message) in &failure.field_errors {
                        if self.schema.contains(field) {
                            self.errors.insert(field.clone(), message.clone());
                        }
                    }
                } else {
                    log::debug!("form was reset during submission; dropping its field errors");
                }
                Err(FormError::SubmissionFailed {
                    message: failure.message,
                    field_errors: failure.field_errors,
                })
            }
        }
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY_VALUE)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Static options, or the cached result of the latest fetch
    pub fn options(&self, name: &str) -> &[SelectOption] {
        if let Some(options) = self.schema.get(name).and_then(|f| f.static_options()) {
            return options;
        }
        self.option_cache
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn state(&self, name: &str) -> SelectionState {
        self.slots.get(name).map(|s| s.state).unwrap_or_default()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let options = self
            .schema
            .fields()
            .iter()
            .filter(|f| f.kind.is_select())
            .map(|f| (f.name.clone(), self.options(&f.name).to_vec()))
            .collect();
        let states = self
            .slots
            .iter()
            .map(|(name, slot)| (name.clone(), slot.state))
            .collect();
        FormSnapshot {
            mode: self.mode,
            values: self.values.clone(),
            options,
            states,
            errors: self.errors.clone(),
            submitting: self.submitting,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn slot_mut(&mut self, name: &str) -> &mut SelectionSlot {
        self.slots.entry(name.to_string()).or_default()
    }

    fn clear_value(&mut self, name: &str) {
        if self.value(name).is_empty() {
            return;
        }
        self.values.insert(name.to_string(), FieldValue::Empty);
        // descendants of a cleared field all lose an ancestor, so nothing is fetched
        let issued = self.cascade(name);
        debug_assert!(issued.is_empty());
    }

    /// Clears and disables every descendant of `name`, then re-evaluates them
    fn cascade(&mut self, name: &str) -> Vec<FetchTicket> {
        let schema = Arc::clone(&self.schema);
        let descendants: Vec<&str> = schema.descendants(name).map(|f| f.name.as_str()).collect();
        for &child in &descendants {
            self.values.insert(child.to_string(), FieldValue::Empty);
            self.option_cache.remove(child);
            self.pending_reconcile.remove(child);
            let generation = self.next_generation();
            self.slot_mut(child).disable(generation);
        }
        descendants
            .into_iter()
            .filter_map(|child| self.evaluate(child))
            .collect()
    }

    /// Runs the resolver for one field and moves it to its next state
    fn evaluate(&mut self, name: &str) -> Option<FetchTicket> {
        let schema = Arc::clone(&self.schema);
        let field = schema.get(name)?;
        match resolver::resolve(field, &self.values) {
            Resolution::Skip => {
                let generation = self.next_generation();
                self.slot_mut(name).disable(generation);
                self.option_cache.remove(name);
                self.pending_reconcile.remove(name);
                if !self.value(name).is_empty() {
                    self.values.insert(name.to_string(), FieldValue::Empty);
                }
                None
            }
            Resolution::Enabled => {
                self.slot_mut(name).state = SelectionState::Ready;
                None
            }
            Resolution::Fetch { source, ancestors } => {
                let generation = self.next_generation();
                let slot = self.slot_mut(name);
                slot.state = SelectionState::Loading;
                slot.generation = generation;
                self.option_cache.remove(name);
                log::debug!("fetching `{}` options for `{}` with {:?}", source, name, ancestors);
                Some(FetchTicket {
                    field: name.to_string(),
                    source,
                    ancestors,
                    generation,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::forms::FieldDescriptor;

    fn t(key: &str) -> String {
        key.to_string()
    }

    fn location_schema() -> Arc<FieldSchema> {
        Arc::new(
            FieldSchema::new(vec![
                FieldDescriptor::select_remote("city_id", "fields.city", "cities").required(),
                FieldDescriptor::select_remote("district_id", "fields.district", "districts")
                    .depends_on(&["city_id"])
                    .required(),
                FieldDescriptor::select_remote("association_id", "fields.association", "associations")
                    .depends_on(&["city_id", "district_id"]),
            ])
            .unwrap(),
        )
    }

    fn raw(items: &[(i64, &str)]) -> Vec<RawOption> {
        items.iter().map(|&(id, name)| RawOption::new(id, name)).collect()
    }

    fn text(v: &str) -> FieldValue {
        FieldValue::text(v)
    }

    fn ticket_for<'a>(tickets: &'a [FetchTicket], field: &str) -> &'a FetchTicket {
        tickets.iter().find(|t| t.field == field).unwrap()
    }

    /// Opens a create form with cities loaded and city/district selected
    fn selected_chain() -> FormEngine {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "C1"), (2, "C2")])));
        let tickets = engine.set_value("city_id", text("1")).unwrap();
        engine.commit_fetch(&tickets[0], Ok(raw(&[(10, "D1")])));
        let tickets = engine.set_value("district_id", text("10")).unwrap();
        engine.commit_fetch(&tickets[0], Ok(raw(&[(100, "A1")])));
        engine.set_value("association_id", text("100")).unwrap();
        engine
    }

    #[test]
    fn test_open_create_form() {
        let (engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].field, "city_id");
        assert!(tickets[0].ancestors.is_empty());
        assert_eq!(engine.state("city_id"), SelectionState::Loading);
        assert_eq!(engine.state("district_id"), SelectionState::Disabled);
        assert_eq!(engine.state("association_id"), SelectionState::Disabled);
    }

    #[test]
    fn test_end_to_end_location_cascade() {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "C1"), (2, "C2")])));

        let tickets = engine.set_value("city_id", text("1")).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].source, "districts");
        assert_eq!(tickets[0].ancestors, vec!["1".to_string()]);
        assert_eq!(engine.state("district_id"), SelectionState::Loading);

        let outcome = engine.commit_fetch(&tickets[0], Ok(raw(&[(10, "D1")])));
        assert_eq!(outcome, FetchOutcome::Ready { options: 1, cleared_stale: false });
        assert_eq!(engine.options("district_id"), &[SelectOption::new("10", "D1")]);
        assert_eq!(engine.state("district_id"), SelectionState::Ready);

        let tickets = engine.set_value("district_id", text("10")).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].field, "association_id");
        assert_eq!(tickets[0].ancestors, vec!["1".to_string(), "10".to_string()]);

        let tickets = engine.set_value("city_id", text("2")).unwrap();
        assert_eq!(engine.value("district_id").as_text(), "");
        assert_eq!(engine.value("association_id").as_text(), "");
        assert_eq!(engine.state("association_id"), SelectionState::Disabled);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].field, "district_id");
        assert_eq!(tickets[0].ancestors, vec!["2".to_string()]);
    }

    #[test]
    fn test_cascading_clear_reaches_every_level() {
        let mut engine = selected_chain();
        assert_eq!(engine.state("association_id"), SelectionState::Ready);

        engine.set_value("city_id", text("2")).unwrap();
        assert!(engine.value("district_id").is_empty());
        assert!(engine.value("association_id").is_empty());
        assert!(engine.options("association_id").is_empty());
        assert_eq!(engine.state("association_id"), SelectionState::Disabled);
        assert_eq!(engine.state("district_id"), SelectionState::Loading);

        engine.set_value("city_id", FieldValue::Empty).unwrap();
        assert_eq!(engine.state("district_id"), SelectionState::Disabled);
        assert!(engine.options("district_id").is_empty());
    }

    #[test]
    fn test_unchanged_value_does_not_refetch() {
        let mut engine = selected_chain();
        let tickets = engine.set_value("city_id", text("1")).unwrap();
        assert!(tickets.is_empty());
        assert_eq!(engine.value("district_id").as_text(), "10");
    }

    #[test]
    fn test_last_write_wins_by_initiation_order() {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "X"), (2, "Y"), (3, "Z")])));

        let for_x = engine.set_value("city_id", text("1")).unwrap().remove(0);
        let for_y = engine.set_value("city_id", text("2")).unwrap().remove(0);
        let for_z = engine.set_value("city_id", text("3")).unwrap().remove(0);

        assert_eq!(
            engine.commit_fetch(&for_z, Ok(raw(&[(30, "Z-district")]))),
            FetchOutcome::Ready { options: 1, cleared_stale: false }
        );
        assert_eq!(engine.commit_fetch(&for_x, Ok(raw(&[(10, "X-district")]))), FetchOutcome::Discarded);
        assert_eq!(engine.commit_fetch(&for_y, Err("timeout".into())), FetchOutcome::Discarded);

        assert_eq!(engine.options("district_id"), &[SelectOption::new("30", "Z-district")]);
        assert_eq!(engine.state("district_id"), SelectionState::Ready);
    }

    #[test]
    fn test_result_discarded_when_ancestor_returns_to_previous_value() {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "C1"), (2, "C2")])));
        let first = engine.set_value("city_id", text("1")).unwrap().remove(0);
        engine.set_value("city_id", text("2")).unwrap();
        let latest = engine.set_value("city_id", text("1")).unwrap().remove(0);

        // same ancestors as `latest`, but an older generation
        assert_eq!(engine.commit_fetch(&first, Ok(raw(&[(10, "old")]))), FetchOutcome::Discarded);
        assert_eq!(engine.state("district_id"), SelectionState::Loading);
        engine.commit_fetch(&latest, Ok(raw(&[(11, "new")])));
        assert_eq!(engine.options("district_id"), &[SelectOption::new("11", "new")]);
    }

    #[test]
    fn test_empty_list_is_ready() {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "C1")])));
        let tickets = engine.set_value("city_id", text("1")).unwrap();
        let outcome = engine.commit_fetch(&tickets[0], Ok(Vec::new()));

        assert_eq!(outcome, FetchOutcome::Ready { options: 0, cleared_stale: false });
        assert_eq!(engine.state("district_id"), SelectionState::Ready);
        assert!(engine.state("district_id").is_enabled());
        assert!(engine.options("district_id").is_empty());
    }

    #[test]
    fn test_fetch_failure_disables_field_until_ancestor_changes() {
        let mut engine = selected_chain();
        let tickets = engine.set_value("city_id", text("2")).unwrap();
        let outcome = engine.commit_fetch(&tickets[0], Err("HTTP 500".into()));

        match outcome {
            FetchOutcome::Failed(err) => {
                assert_eq!(err.code(), "OPTION_FETCH_FAILED");
                assert_eq!(
                    err,
                    FormError::OptionFetchFailed {
                        field: "district_id".into(),
                        message: "HTTP 500".into()
                    }
                );
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(engine.state("district_id"), SelectionState::Error);
        assert!(!engine.state("district_id").is_enabled());
        assert!(engine.options("district_id").is_empty());
        // the rest of the form is untouched
        assert_eq!(engine.value("city_id").as_text(), "2");
        assert_eq!(engine.state("city_id"), SelectionState::Ready);

        let tickets = engine.set_value("city_id", text("1")).unwrap();
        assert_eq!(engine.state("district_id"), SelectionState::Loading);
        assert_eq!(tickets[0].ancestors, vec!["1".to_string()]);
    }

    #[test]
    fn test_edit_mode_clears_stale_reference() {
        let mut initial = FormValues::new();
        initial.insert("city_id".into(), text("1"));
        initial.insert("district_id".into(), text("5"));
        initial.insert("association_id".into(), text("50"));
        let (mut engine, tickets) = FormEngine::open(location_schema(), initial, FormMode::Edit);
        assert_eq!(tickets.len(), 3);
        assert_eq!(engine.value("district_id").as_text(), "5");

        engine.commit_fetch(ticket_for(&tickets, "city_id"), Ok(raw(&[(1, "C1")])));
        assert_eq!(engine.value("city_id").as_text(), "1");

        let outcome = engine.commit_fetch(
            ticket_for(&tickets, "district_id"),
            Ok(raw(&[(6, "D6"), (7, "D7")])),
        );
        assert_eq!(outcome, FetchOutcome::Ready { options: 2, cleared_stale: true });
        assert_eq!(engine.value("district_id").as_text(), "");
        assert_eq!(engine.value("association_id").as_text(), "");
        assert_eq!(engine.state("association_id"), SelectionState::Disabled);

        // the association fetch was issued for district 5 and is now obsolete
        assert_eq!(
            engine.commit_fetch(ticket_for(&tickets, "association_id"), Ok(raw(&[(50, "A50")]))),
            FetchOutcome::Discarded
        );
    }

    #[test]
    fn test_edit_mode_keeps_valid_reference() {
        let mut initial = FormValues::new();
        initial.insert("city_id".into(), text("1"));
        initial.insert("district_id".into(), text("5"));
        let (mut engine, tickets) = FormEngine::open(location_schema(), initial, FormMode::Edit);
        let outcome = engine.commit_fetch(
            ticket_for(&tickets, "district_id"),
            Ok(raw(&[(5, "D5")])),
        );
        assert_eq!(outcome, FetchOutcome::Ready { options: 1, cleared_stale: false });
        assert_eq!(engine.value("district_id").as_text(), "5");
        // association: city and district set, so it is loading
        assert_eq!(engine.state("association_id"), SelectionState::Loading);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut initial = FormValues::new();
        initial.insert("city_id".into(), text("1"));
        initial.insert("district_id".into(), text("10"));

        let mut engine = selected_chain();
        engine.validate(&t).ok();
        let first_tickets = engine.reset(initial.clone(), FormMode::Edit);
        let first = engine.snapshot();
        let second_tickets = engine.reset(initial, FormMode::Edit);
        let second = engine.snapshot();

        assert_eq!(first, second);
        assert!(first.errors.is_empty());
        assert!(first.options.values().all(Vec::is_empty));
        let strip = |ts: Vec<FetchTicket>| -> Vec<(String, Vec<String>)> {
            ts.into_iter().map(|t| (t.field, t.ancestors)).collect()
        };
        assert_eq!(strip(first_tickets), strip(second_tickets));
    }

    #[test]
    fn test_reset_invalidates_in_flight_fetches() {
        let (mut engine, tickets) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        engine.reset(FormValues::new(), FormMode::Create);
        assert_eq!(engine.commit_fetch(&tickets[0], Ok(raw(&[(1, "C1")]))), FetchOutcome::Discarded);
    }

    #[test]
    fn test_required_fields_reported_together() {
        let schema = Arc::new(
            FieldSchema::new(vec![
                FieldDescriptor::text("name", "fields.name").required(),
                FieldDescriptor::email("email", "fields.email").required(),
                FieldDescriptor::date("birth_date", "fields.birth_date").required(),
                FieldDescriptor::text("notes", "fields.notes"),
            ])
            .unwrap(),
        );
        let (mut engine, tickets) = FormEngine::open(schema, FormValues::new(), FormMode::Create);
        assert!(tickets.is_empty());

        let err = engine.begin_submit(&t).unwrap_err();
        match err {
            FormError::ValidationFailed { errors } => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains_key("name"));
                assert!(errors.contains_key("email"));
                assert!(errors.contains_key("birth_date"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(engine.errors().len(), 3);
        assert!(!engine.is_submitting());

        engine.set_value("name", text("Omar")).unwrap();
        assert_eq!(engine.errors().len(), 2);
    }

    #[test]
    fn test_submission_is_exclusive() {
        let mut engine = selected_chain();
        let payload = engine.begin_submit(&t).unwrap();
        assert_eq!(payload.text("city_id"), Some("1"));
        assert_eq!(payload.text("district_id"), Some("10"));
        assert_eq!(payload.text("association_id"), Some("100"));
        assert!(engine.is_submitting());

        assert_eq!(engine.begin_submit(&t).unwrap_err(), FormError::SubmissionInProgress);

        engine.finish_submit(Ok(())).unwrap();
        assert!(engine.begin_submit(&t).is_ok());
    }

    #[test]
    fn test_failed_submission_applies_field_errors() {
        let mut engine = selected_chain();
        engine.begin_submit(&t).unwrap();
        let mut failure = SubmitFailure::new("The given data was invalid.");
        failure.field_errors.insert("district_id".into(), "taken".into());
        failure.field_errors.insert("unknown".into(), "ignored".into());

        let err = engine.finish_submit(Err(failure)).unwrap_err();
        assert_eq!(err.code(), "SUBMISSION_FAILED");
        assert_eq!(engine.errors().get("district_id").map(String::as_str), Some("taken"));
        assert!(!engine.errors().contains_key("unknown"));
        // form stays populated for a retry
        assert_eq!(engine.value("district_id").as_text(), "10");
        assert!(!engine.is_submitting());
    }

    #[test]
    fn test_disabled_field_rejects_value() {
        let (mut engine, _) = FormEngine::open(location_schema(), FormValues::new(), FormMode::Create);
        assert_eq!(
            engine.set_value("district_id", text("10")),
            Err(FormError::FieldDisabled("district_id".into()))
        );
        assert!(engine.value("district_id").is_empty());
        assert_eq!(engine.state("district_id"), SelectionState::Disabled);
        // clearing stays allowed
        assert!(engine.set_value("district_id", FieldValue::Empty).is_ok());

        match engine.begin_submit(&t).unwrap_err() {
            FormError::ValidationFailed { errors } => {
                assert!(errors.contains_key("city_id"));
                assert!(errors.contains_key("district_id"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_edit_submit_waits_for_pending_options() {
        let mut initial = FormValues::new();
        initial.insert("city_id".into(), text("1"));
        initial.insert("district_id".into(), text("5"));
        let (mut engine, tickets) = FormEngine::open(location_schema(), initial, FormMode::Edit);
        assert!(engine.snapshot().awaiting_options());
        assert_eq!(
            engine.begin_submit(&t).unwrap_err(),
            FormError::OptionsLoading("city_id".into())
        );
        assert!(!engine.is_submitting());

        engine.commit_fetch(ticket_for(&tickets, "city_id"), Ok(raw(&[(1, "C1")])));
        engine.commit_fetch(ticket_for(&tickets, "district_id"), Ok(raw(&[(6, "D6")])));
        engine.commit_fetch(ticket_for(&tickets, "association_id"), Ok(raw(&[])));
        assert!(!engine.snapshot().awaiting_options());

        // the stale district was cleared before anything could be sent
        match engine.begin_submit(&t).unwrap_err() {
            FormError::ValidationFailed { errors } => assert!(errors.contains_key("district_id")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_reset_during_submission_drops_field_errors() {
        let mut engine = selected_chain();
        engine.begin_submit(&t).unwrap();
        engine.reset(FormValues::new(), FormMode::Create);

        let mut failure = SubmitFailure::new("The given data was invalid.");
        failure.field_errors.insert("district_id".into(), "taken".into());
        let err = engine.finish_submit(Err(failure)).unwrap_err();
        assert_eq!(err.code(), "SUBMISSION_FAILED");
        assert!(engine.errors().is_empty());
        assert!(!engine.is_submitting());
    }

    #[test]
    fn test_file_fields() {
        let schema = Arc::new(
            FieldSchema::new(vec![
                FieldDescriptor::text("title", "fields.title").required(),
                FieldDescriptor::device_file("attachment", "fields.attachment").required(),
            ])
            .unwrap(),
        );
        let mut initial = FormValues::new();
        initial.insert("title".into(), text("Curriculum"));
        let (mut engine, _) = FormEngine::open(schema, initial, FormMode::Edit);

        assert_eq!(
            engine.set_file("title", None, None, None).unwrap_err(),
            FormError::NotAFileField("title".into())
        );
        assert!(matches!(
            engine.set_value("missing", text("x")),
            Err(FormError::UnknownField(_))
        ));

        // keep-existing-file: an identifier alone satisfies `required`
        engine
            .set_file("attachment", None, Some("31".into()), Some("https://cdn.example/31".into()))
            .unwrap();
        let payload = engine.begin_submit(&t).unwrap();
        assert_eq!(payload.text("attachment"), Some("31"));
        assert_eq!(payload.text("_method"), Some("PUT"));
    }

    #[test]
    fn test_static_select_is_ready_without_fetch() {
        let schema = Arc::new(
            FieldSchema::new(vec![FieldDescriptor::select_static(
                "gender",
                "fields.gender",
                vec![SelectOption::new("male", "options.male")],
            )])
            .unwrap(),
        );
        let (engine, tickets) = FormEngine::open(schema, FormValues::new(), FormMode::Create);
        assert!(tickets.is_empty());
        assert_eq!(engine.state("gender"), SelectionState::Ready);
        assert_eq!(engine.options("gender").len(), 1);
        assert_eq!(engine.snapshot().options("gender").len(), 1);
    }
}
