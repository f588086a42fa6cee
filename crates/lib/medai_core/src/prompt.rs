//! Backend request body and reasoning prompt.
//!
//! A real backend receives `{ message, context }` and wraps it into a chat
//! prompt with fixed safety rules. Both shapes are rendered here so the
//! front-ends can show exactly what would be sent; no transport exists.

use serde::{Deserialize, Serialize};

use crate::query::{QueryHistory, StructuredQuery};

const NOT_PROVIDED: &str = "Not provided";

/// Context section of a backend chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendContext {
    pub country: String,
    pub age: Option<u8>,
    pub sex: Option<String>,
    pub history: Option<String>,
}

/// Body of a backend chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRequest {
    pub message: String,
    pub context: BackendContext,
}

impl BackendRequest {
    /// Project a structured query onto the backend request shape.
    ///
    /// The message is the contextualized one, so the backend sees the same
    /// safety framing as the widget built.
    pub fn from_query(query: &StructuredQuery) -> Self {
        Self {
            message: query.contextual_message.clone(),
            context: BackendContext {
                country: query.country.clone(),
                age: query.profile.age,
                sex: query.profile.sex.map(|s| s.to_string()),
                history: query.patient_history.as_ref().map(summarize_history),
            },
        }
    }

    /// Render the chat prompt a reasoning model would receive.
    pub fn render_prompt(&self) -> String {
        let age = self
            .context
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| NOT_PROVIDED.to_string());
        let sex = self.context.sex.as_deref().unwrap_or(NOT_PROVIDED);
        let history = self.context.history.as_deref().unwrap_or("None reported");

        format!(
            "You are MedAI, an educational healthcare AI assistant.\n\
             \n\
             Context:\n\
             Country: {country}\n\
             Age: {age}\n\
             Sex: {sex}\n\
             Patient history: {history}\n\
             \n\
             User question:\n\
             {message}\n\
             \n\
             Rules:\n\
             - Do not diagnose\n\
             - Do not prescribe\n\
             - Provide educational and safety-focused information only\n",
            country = self.context.country,
            message = self.message,
        )
    }
}

fn summarize_history(history: &QueryHistory) -> String {
    let mut parts = Vec::new();
    if let Some(allergies) = &history.allergies {
        parts.push(format!("allergies: {}", allergies.join(", ")));
    }
    if let Some(conditions) = &history.chronic_conditions {
        parts.push(format!("chronic conditions: {}", conditions.join(", ")));
    }
    if history.pregnancy_status == Some(true) {
        parts.push("pregnant".to_string());
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSelection;
    use crate::query::build;
    use crate::session::{SessionContext, Sex};

    #[test]
    fn request_carries_profile_and_history() {
        let mut session = SessionContext::default();
        session.set_country("India");
        session.profile.set_age(Some(62));
        session.profile.sex = Some(Sex::Male);
        session.patient_history.add_allergy("aspirin");
        session.patient_history.toggle_chronic_condition("Diabetes");

        let query = build("Is this safe for me?", &session, &FilterSelection::default(), None)
            .unwrap();
        let request = BackendRequest::from_query(&query);

        assert_eq!(request.message, query.contextual_message);
        assert_eq!(request.context.country, "India");
        assert_eq!(request.context.age, Some(62));
        assert_eq!(request.context.sex.as_deref(), Some("Male"));
        assert_eq!(
            request.context.history.as_deref(),
            Some("allergies: aspirin; chronic conditions: Diabetes")
        );
    }

    #[test]
    fn prompt_lists_context_and_rules() {
        let query = build(
            "What helps a sore throat?",
            &SessionContext::default(),
            &FilterSelection::default(),
            None,
        )
        .unwrap();
        let prompt = BackendRequest::from_query(&query).render_prompt();

        assert!(prompt.starts_with("You are MedAI, an educational healthcare AI assistant."));
        assert!(prompt.contains("Country: Global\n"));
        assert!(prompt.contains("Age: Not provided\n"));
        assert!(prompt.contains("Sex: Not provided\n"));
        assert!(prompt.contains("Patient history: None reported\n"));
        assert!(prompt.contains("User question:\nWhat helps a sore throat?\n"));
        assert!(prompt.contains("- Do not diagnose\n- Do not prescribe\n"));
    }

    #[test]
    fn request_serializes_to_backend_shape() {
        let query = build(
            "hi",
            &SessionContext::default(),
            &FilterSelection::default(),
            None,
        )
        .unwrap();
        let value = serde_json::to_value(BackendRequest::from_query(&query)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "hi",
                "context": {"country": "Global", "age": null, "sex": null, "history": null}
            })
        );
    }
}
