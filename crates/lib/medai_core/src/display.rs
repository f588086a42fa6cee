//! Text the widget shows on the user's side of the conversation.

use crate::query::StructuredQuery;
use crate::session::Mode;

/// Echo of the user's message.
///
/// In advanced mode the active country and filters are appended as
/// ` [Country: X | Brand: Y | Category: a, b | Context: c]`.
pub fn display_message(raw_message: &str, query: &StructuredQuery) -> String {
    if query.mode != Mode::Advanced {
        return raw_message.to_string();
    }

    let mut tags = Vec::new();
    if let Some(country) = crate::session::regional(&query.country) {
        tags.push(format!("Country: {country}"));
    }
    if let Some(brand) = query.medicine_brand() {
        tags.push(format!("Brand: {brand}"));
    }
    if !query.categories().is_empty() {
        tags.push(format!("Category: {}", query.categories().join(", ")));
    }
    if !query.contexts().is_empty() {
        tags.push(format!("Context: {}", query.contexts().join(", ")));
    }

    if tags.is_empty() {
        raw_message.to_string()
    } else {
        format!("{raw_message} [{}]", tags.join(" | "))
    }
}

/// Message sent on the user's behalf when a common-problem button is used.
///
/// The reply for such a message is resolved from `problem` itself.
pub fn problem_message(problem: &str) -> String {
    format!(
        "I'm experiencing {}. Can you help?",
        problem.trim().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterKind, FilterSelection};
    use crate::query::build;
    use crate::session::SessionContext;

    #[test]
    fn simple_mode_echoes_message() {
        let mut session = SessionContext::default();
        session.set_country("India");
        let mut filters = FilterSelection::default();
        filters.select(FilterKind::Category, "Pain Relief");
        let query = build("I have fever", &session, &filters, Some("Tylenol")).unwrap();
        assert_eq!(display_message("I have fever", &query), "I have fever");
    }

    #[test]
    fn advanced_mode_appends_tags() {
        let mut session = SessionContext {
            mode: Mode::Advanced,
            ..Default::default()
        };
        session.set_country("India");
        let mut filters = FilterSelection::default();
        filters.select(FilterKind::Category, "Pain Relief");
        filters.select(FilterKind::Category, "Antipyretic");
        filters.select(FilterKind::Context, "Adult");
        let query = build("I have fever", &session, &filters, Some("Tylenol")).unwrap();

        assert_eq!(
            display_message("I have fever", &query),
            "I have fever [Country: India | Brand: Tylenol | Category: Antipyretic, Pain Relief \
             | Context: Adult]"
        );
    }

    #[test]
    fn advanced_mode_without_tags_echoes_message() {
        let session = SessionContext {
            mode: Mode::Advanced,
            ..Default::default()
        };
        let query = build("hello", &session, &FilterSelection::default(), None).unwrap();
        assert_eq!(display_message("hello", &query), "hello");
    }

    #[test]
    fn problem_message_lowercases_problem() {
        assert_eq!(
            problem_message("Stomach Pain"),
            "I'm experiencing stomach pain. Can you help?"
        );
    }
}
