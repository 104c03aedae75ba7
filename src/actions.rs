//! The five dialogue actions behind the webhook.
//!
//! The dialogue manager triggers actions by wire name; `ActionRegistry`
//! is a closed dispatch table over those names. Handlers consult the
//! reference stores and emit responses through a `Dispatcher`; they
//! never touch wire types themselves.

use thiserror::Error;

use crate::matcher::{self, MatchResult};
use crate::menu::{self, MenuChoice};
use crate::reference::ReferenceData;
use crate::responder::MessageTemplates;
use crate::text::normalize;

// ---------------------------------------------------------------------------
// Wire names
// ---------------------------------------------------------------------------

pub const ACTION_CHOOSE_OPTION: &str = "action_elegir_opcion";
pub const ACTION_CONSULT_SYMPTOM: &str = "action_consultar_sintoma";
pub const ACTION_CONSULT_MEDICATION: &str = "action_consultar_por_nombre";
pub const ACTION_LIST_SYMPTOMS: &str = "action_listar_sintomas";
pub const ACTION_LIST_MEDICATIONS: &str = "action_listar_medicamentos";

/// Entity names the NLU layer attaches to consult messages.
pub const ENTITY_SYMPTOM: &str = "sintoma";
pub const ENTITY_MEDICATION: &str = "medicamento";

/// Response templates defined on the dialogue-manager side; the menu
/// action references them by name instead of rendering text.
pub const UTTER_ASK_SYMPTOM: &str = "utter_solicitar_sintoma";
pub const UTTER_ASK_MEDICATION: &str = "utter_pedir_medicamento";
pub const UTTER_MENU: &str = "utter_menu";

// ---------------------------------------------------------------------------
// Incoming message
// ---------------------------------------------------------------------------

/// One extracted entity from the latest user message.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub value: String,
}

/// The slice of dialogue state an action consumes.
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub text: String,
    pub entities: Vec<Entity>,
}

/// Value of the first entity with the given name, wire order.
pub fn find_entity<'a>(entities: &'a [Entity], name: &str) -> Option<&'a str> {
    entities
        .iter()
        .find(|entity| entity.name == name)
        .map(|entity| entity.value.as_str())
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// One outbound bot response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    /// Literal text rendered by this server.
    Text(String),
    /// Name of a dialogue-manager response template.
    Template(&'static str),
}

/// Outbound channel an action emits responses into. Emission has no
/// return value and no delivery confirmation.
pub trait Dispatcher {
    fn emit(&mut self, utterance: Utterance);
}

/// Dispatcher that buffers utterances in emission order; the webhook
/// endpoint drains it into the response body.
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    utterances: Vec<Utterance>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_utterances(self) -> Vec<Utterance> {
        self.utterances
    }
}

impl Dispatcher for CollectingDispatcher {
    fn emit(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("No registered action named {0}")]
    UnknownAction(String),

    #[error("Matcher produced key {0} missing from the store")]
    StoreDiverged(String),
}

/// Owns the reference stores and dispatches actions by wire name.
pub struct ActionRegistry {
    reference: ReferenceData,
}

impl ActionRegistry {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Names accepted by `handle`, registration order.
    pub fn action_names(&self) -> [&'static str; 5] {
        [
            ACTION_CHOOSE_OPTION,
            ACTION_CONSULT_SYMPTOM,
            ACTION_CONSULT_MEDICATION,
            ACTION_LIST_SYMPTOMS,
            ACTION_LIST_MEDICATIONS,
        ]
    }

    /// Run one action against the latest message, emitting responses
    /// through `out`.
    pub fn handle(
        &self,
        action: &str,
        message: &IncomingMessage,
        out: &mut dyn Dispatcher,
    ) -> Result<(), ActionError> {
        match action {
            ACTION_CHOOSE_OPTION => {
                self.choose_option(message, out);
                Ok(())
            }
            ACTION_CONSULT_SYMPTOM => self.consult_symptom(message, out),
            ACTION_CONSULT_MEDICATION => self.consult_medication(message, out),
            ACTION_LIST_SYMPTOMS => {
                out.emit(Utterance::Text(MessageTemplates::symptom_list(
                    &self.reference.symptoms,
                )));
                Ok(())
            }
            ACTION_LIST_MEDICATIONS => {
                out.emit(Utterance::Text(MessageTemplates::medication_list(
                    &self.reference.medications,
                )));
                Ok(())
            }
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }

    fn choose_option(&self, message: &IncomingMessage, out: &mut dyn Dispatcher) {
        let choice = menu::route(&message.text);
        tracing::info!(?choice, "menu selection routed");
        let template = match choice {
            MenuChoice::BySymptom => UTTER_ASK_SYMPTOM,
            MenuChoice::ByMedication => UTTER_ASK_MEDICATION,
            MenuChoice::ShowMenu => UTTER_MENU,
        };
        out.emit(Utterance::Template(template));
    }

    fn consult_symptom(
        &self,
        message: &IncomingMessage,
        out: &mut dyn Dispatcher,
    ) -> Result<(), ActionError> {
        let raw = find_entity(&message.entities, ENTITY_SYMPTOM).unwrap_or(&message.text);
        let query = normalize(raw);

        let store = &self.reference.symptoms;
        let result = matcher::resolve(&query, store);
        tracing::info!(%query, ?result, "symptom query resolved");

        match result {
            MatchResult::ExactHit(key) | MatchResult::FallbackHit(key) => {
                let record = store
                    .get(key)
                    .ok_or_else(|| ActionError::StoreDiverged(key.to_string()))?;
                out.emit(Utterance::Text(MessageTemplates::symptom_record(key, record)));
            }
            MatchResult::Suggestions(candidates) => {
                out.emit(Utterance::Text(MessageTemplates::symptom_suggestions(&candidates)));
            }
            MatchResult::NoMatch => {
                out.emit(Utterance::Text(MessageTemplates::symptom_not_recognized()));
            }
        }
        Ok(())
    }

    fn consult_medication(
        &self,
        message: &IncomingMessage,
        out: &mut dyn Dispatcher,
    ) -> Result<(), ActionError> {
        let raw = find_entity(&message.entities, ENTITY_MEDICATION).unwrap_or(&message.text);
        let query = normalize(raw);

        let store = &self.reference.medications;
        let result = matcher::resolve(&query, store);
        tracing::info!(%query, ?result, "medication query resolved");

        match result {
            MatchResult::ExactHit(key) | MatchResult::FallbackHit(key) => {
                let record = store
                    .get(key)
                    .ok_or_else(|| ActionError::StoreDiverged(key.to_string()))?;
                out.emit(Utterance::Text(MessageTemplates::medication_record(key, record)));
            }
            MatchResult::Suggestions(candidates) => {
                // The prompt echoes the query as typed, not normalized.
                out.emit(Utterance::Text(MessageTemplates::medication_suggestions(
                    raw,
                    &candidates,
                )));
            }
            MatchResult::NoMatch => {
                out.emit(Utterance::Text(MessageTemplates::medication_not_recognized()));
            }
        }
        Ok(())
    }
}
