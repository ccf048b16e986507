//! Create/edit form state for one entity at a time.
//!
//! Phases run `Closed → Editing → Submitting → {Closed | Editing}`. Anything
//! else is refused: submitting twice, editing while a submission is in
//! flight, or submitting a closed form all leave the binder untouched.

use std::collections::BTreeMap;

use lensclub_api_types::RecordId;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::ApiError;
use super::fields::{FieldSchema, form_to_wire_against, wire_to_form};
use super::gateway::{MutationReceipt, Resource, ResourceGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityId {
    New,
    Existing(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFormState<F: FieldSchema> {
    pub fields: BTreeMap<F, String>,
    pub entity_id: EntityId,
    /// Values as loaded from the server; empty for a new entity.
    pub loaded: BTreeMap<F, String>,
}

/// Body and target of a submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub target: EntityId,
    pub body: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved { message: Option<String> },
    /// Blocked before sending; the form stays open.
    Invalid { message: String },
    /// Sent and refused; the form stays open with the message.
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

pub struct CrudFormBinder<R: Resource> {
    phase: FormPhase,
    state: Option<EntityFormState<R::Field>>,
    error: Option<String>,
}

impl<R: Resource> Default for CrudFormBinder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> CrudFormBinder<R> {
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Closed,
            state: None,
            error: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&EntityFormState<R::Field>> {
        self.state.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn value(&self, field: R::Field) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|state| state.fields.get(&field))
            .map(String::as_str)
    }

    /// Opens an empty create form. Returns `false` while submitting.
    pub fn open_new(&mut self) -> bool {
        let mut fields = wire_to_form::<R::Field>(&Map::new());
        for (field, value) in R::defaults() {
            fields.insert(field, value);
        }
        self.open(EntityFormState {
            fields,
            entity_id: EntityId::New,
            loaded: BTreeMap::new(),
        })
    }

    /// Opens an edit form for `item`. Returns `Ok(false)` while submitting.
    pub fn load(&mut self, item: &R::Item) -> Result<bool, ApiError> {
        let wire = match serde_json::to_value(item).map_err(ApiError::decode)? {
            Value::Object(map) => map,
            other => {
                return Err(ApiError::decode(format!(
                    "{} record is not an object: {other}",
                    R::PATH
                )));
            }
        };
        let fields = wire_to_form::<R::Field>(&wire);
        Ok(self.open(EntityFormState {
            loaded: fields.clone(),
            fields,
            entity_id: EntityId::Existing(R::id_of(item)),
        }))
    }

    /// Edits one field; refused unless the form is in `Editing`.
    pub fn set_field(&mut self, field: R::Field, value: impl Into<String>) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }
        match self.state.as_mut() {
            Some(state) => {
                state.fields.insert(field, value.into());
                true
            }
            None => false,
        }
    }

    /// Discards the open form and returns to the list.
    pub fn reset(&mut self) {
        if self.phase == FormPhase::Submitting {
            return;
        }
        self.phase = FormPhase::Closed;
        self.state = None;
        self.error = None;
    }

    /// Validates and moves to `Submitting`.
    ///
    /// `Ok(None)` means nothing to do (closed, or already submitting).
    /// Validation failures keep the form in `Editing` with the message set.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitRequest>, ApiError> {
        if self.phase != FormPhase::Editing {
            return Ok(None);
        }
        let Some(state) = self.state.as_ref() else {
            return Ok(None);
        };

        match form_to_wire_against(&state.fields, &state.loaded) {
            Ok(body) => {
                let target = state.entity_id.clone();
                self.phase = FormPhase::Submitting;
                self.error = None;
                Ok(Some(SubmitRequest { target, body }))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(ApiError::Validation(err))
            }
        }
    }

    /// Settles a submission started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<MutationReceipt<R::Item>, ApiError>,
    ) -> SubmitOutcome {
        if self.phase != FormPhase::Submitting {
            warn!(resource = R::PATH, "submission settled for a form that was not submitting");
        }
        match outcome {
            Ok(receipt) => {
                debug!(resource = R::PATH, "form saved");
                self.phase = FormPhase::Closed;
                self.state = None;
                self.error = None;
                SubmitOutcome::Saved {
                    message: receipt.message,
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(resource = R::PATH, error = %err, "form submission rejected");
                self.phase = FormPhase::Editing;
                self.error = Some(message.clone());
                SubmitOutcome::Rejected { message }
            }
        }
    }

    /// Runs a whole submission against `gateway`. `None` when the form
    /// was not in a submittable phase.
    pub async fn submit<G>(&mut self, gateway: &G) -> Option<SubmitOutcome>
    where
        G: ResourceGateway<R> + ?Sized,
    {
        let request = match self.begin_submit() {
            Ok(Some(request)) => request,
            Ok(None) => return None,
            Err(err) => {
                return Some(SubmitOutcome::Invalid {
                    message: err.to_string(),
                });
            }
        };

        let outcome = match &request.target {
            EntityId::New => gateway.create(request.body).await,
            EntityId::Existing(id) => gateway.update(id, request.body).await,
        };
        Some(self.finish_submit(outcome))
    }

    fn open(&mut self, state: EntityFormState<R::Field>) -> bool {
        if self.phase == FormPhase::Submitting {
            debug!(resource = R::PATH, "cannot open a form while submitting");
            return false;
        }
        if self.phase == FormPhase::Editing {
            debug!(resource = R::PATH, "discarding unsaved form");
        }
        self.state = Some(state);
        self.phase = FormPhase::Editing;
        self.error = None;
        true
    }
}
