//! Response resolution.
//!
//! [`Responder`] is the seam between the widget and whatever answers it.
//! Today that is [`MockResponder`], which ignores everything but the raw
//! message and looks it up in a [`ResponseDictionary`]:
//!
//! 1. exact, byte-identical trigger;
//! 2. first trigger (declaration order) contained in the message, ignoring case;
//! 3. the fallback disclaimer.

pub mod dictionary;

use std::sync::LazyLock;

use thiserror::Error;

pub use dictionary::{DictionaryEntry, DictionaryError, FALLBACK_RESPONSE, ResponseDictionary};

use crate::query::StructuredQuery;

static BUILTIN: LazyLock<ResponseResolver> = LazyLock::new(ResponseResolver::default);

/// Errors a responder may report.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("Responder unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can answer a structured query.
pub trait Responder {
    fn respond(&self, query: &StructuredQuery) -> Result<String, ResponderError>;
}

/// Dictionary lookup over raw messages.
#[derive(Debug, Clone, Default)]
pub struct ResponseResolver {
    dictionary: ResponseDictionary,
}

impl ResponseResolver {
    pub fn new(dictionary: ResponseDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &ResponseDictionary {
        &self.dictionary
    }

    /// Resolve a raw message to reply text. Never fails.
    pub fn resolve(&self, message: &str) -> String {
        if let Some(response) = self.dictionary.exact(message) {
            log::debug!("exact trigger match for {message:?}");
            return response.to_string();
        }

        if let Some(entry) = self.dictionary.first_contained(message) {
            log::debug!("trigger {:?} found in {message:?}", entry.trigger);
            return entry.response.clone();
        }

        log::debug!("no trigger found in {message:?}, using fallback");
        self.dictionary.fallback().to_string()
    }
}

/// Resolve against the built-in dictionary.
pub fn resolve(message: &str) -> String {
    BUILTIN.resolve(message)
}

/// Offline stand-in for a real backend.
///
/// Only `query.user_message` is consulted; the contextual message and the
/// session sections are ignored.
#[derive(Debug, Clone, Default)]
pub struct MockResponder {
    resolver: ResponseResolver,
}

impl MockResponder {
    pub fn new(resolver: ResponseResolver) -> Self {
        Self { resolver }
    }

    pub fn with_dictionary(dictionary: ResponseDictionary) -> Self {
        Self::new(ResponseResolver::new(dictionary))
    }

    pub fn resolver(&self) -> &ResponseResolver {
        &self.resolver
    }
}

impl Responder for MockResponder {
    fn respond(&self, query: &StructuredQuery) -> Result<String, ResponderError> {
        Ok(self.resolver.resolve(&query.user_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSelection;
    use crate::query::build;
    use crate::session::SessionContext;

    fn response_for(trigger: &str) -> String {
        ResponseDictionary::builtin()
            .exact(trigger)
            .unwrap()
            .to_string()
    }

    #[test]
    fn every_trigger_resolves_to_its_own_value() {
        let dictionary = ResponseDictionary::builtin();
        for entry in dictionary.entries() {
            assert_eq!(resolve(&entry.trigger), entry.response);
        }
    }

    #[test]
    fn substring_match_ignores_case() {
        assert_eq!(resolve("I have a bad headache"), response_for("Headache"));
        assert_eq!(resolve("FEVER since monday"), response_for("Fever"));
    }

    #[test]
    fn first_declared_trigger_wins() {
        // "Fever" is declared before "Headache".
        assert_eq!(
            resolve("headache and fever all night"),
            response_for("Fever")
        );
        // "Body Pain" is declared before "Fatigue" and "Nausea".
        assert_eq!(
            resolve("nausea, fatigue and body pain"),
            response_for("Body Pain")
        );
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        let dictionary = ResponseDictionary::new(
            vec![
                DictionaryEntry {
                    trigger: "pain".into(),
                    response: "generic pain".into(),
                },
                DictionaryEntry {
                    trigger: "Back pain".into(),
                    response: "back pain".into(),
                },
            ],
            None,
        )
        .unwrap();
        let resolver = ResponseResolver::new(dictionary);
        assert_eq!(resolver.resolve("Back pain"), "back pain");
        assert_eq!(resolver.resolve("back pain"), "generic pain");
    }

    #[test]
    fn unknown_message_gets_fallback() {
        assert_eq!(resolve("xyz"), FALLBACK_RESPONSE);
        assert_eq!(resolve(""), FALLBACK_RESPONSE);
    }

    #[test]
    fn resolve_is_idempotent() {
        let first = resolve("my stomach pain is back");
        for _ in 0..3 {
            assert_eq!(resolve("my stomach pain is back"), first);
        }
    }

    #[test]
    fn mock_responder_uses_raw_message_only() {
        let mut session = SessionContext::default();
        session.set_country("India");
        session.patient_history.add_allergy("fever-reducer dye");
        let query = build("xyz", &session, &FilterSelection::default(), None).unwrap();

        // The contextual message mentions "fever", the raw message does not.
        assert!(query.contextual_message.to_lowercase().contains("fever"));
        let reply = MockResponder::default().respond(&query).unwrap();
        assert_eq!(reply, FALLBACK_RESPONSE);
    }

    #[test]
    fn mock_responder_is_usable_as_trait_object() {
        let responder: Box<dyn Responder> = Box::new(MockResponder::default());
        let query = build(
            "Sore throat again",
            &SessionContext::default(),
            &FilterSelection::default(),
            None,
        )
        .unwrap();
        assert_eq!(
            responder.respond(&query).unwrap(),
            response_for("Sore Throat")
        );
    }
}
