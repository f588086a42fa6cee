use medai_core::equivalents::{EquivalentQuery, mock_equivalent_response};
use medai_core::filters::FilterSelection;
use medai_core::prompt::BackendRequest;
use medai_core::query::StructuredQuery;
use medai_core::session::SessionContext;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuiltQuery {
    structured: StructuredQuery,
    query_string: String,
}

#[derive(Serialize)]
struct EquivalentReply {
    request: EquivalentQuery,
    response: String,
}

/// Returns the version of the medai_wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    medai_core::version().to_string()
}

/// Build a structured query from the widget's session and filter state.
///
/// `session_json` and `filters_json` may be empty, meaning defaults.
/// Returns `{"structured": ..., "queryString": ...}`.
#[wasm_bindgen]
pub fn build_query(
    message: &str,
    session_json: &str,
    filters_json: &str,
    medicine_brand: Option<String>,
) -> Result<String, JsError> {
    build_query_json(message, session_json, filters_json, medicine_brand.as_deref())
        .map_err(|e| JsError::new(&e))
}

/// Resolve a raw message against the built-in reply dictionary.
#[wasm_bindgen]
pub fn resolve(message: &str) -> String {
    medai_core::resolve(message)
}

/// Returns `{"request": ..., "response": ...}` for a medicine-equivalent lookup.
#[wasm_bindgen]
pub fn find_equivalent(
    from_country: &str,
    to_country: &str,
    medicine_name: &str,
) -> Result<String, JsError> {
    find_equivalent_json(from_country, to_country, medicine_name).map_err(|e| JsError::new(&e))
}

/// Text for the user's bubble, annotated with filters in advanced mode.
#[wasm_bindgen]
pub fn display_message(message: &str, structured_json: &str) -> Result<String, JsError> {
    display_message_text(message, structured_json).map_err(|e| JsError::new(&e))
}

/// Message sent when a common-problem shortcut is clicked.
#[wasm_bindgen]
pub fn problem_message(problem: &str) -> String {
    medai_core::display::problem_message(problem)
}

/// Reasoning prompt a backend would build for this query.
#[wasm_bindgen]
pub fn render_prompt(structured_json: &str) -> Result<String, JsError> {
    render_prompt_text(structured_json).map_err(|e| JsError::new(&e))
}

fn parse_or_default<T: DeserializeOwned + Default>(json: &str, what: &str) -> Result<T, String> {
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(|e| format!("Invalid {what} JSON: {e}"))
}

fn parse_query(json: &str) -> Result<StructuredQuery, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid query JSON: {e}"))
}

fn build_query_json(
    message: &str,
    session_json: &str,
    filters_json: &str,
    medicine_brand: Option<&str>,
) -> Result<String, String> {
    let session: SessionContext = parse_or_default(session_json, "session")?;
    let filters: FilterSelection = parse_or_default(filters_json, "filters")?;
    let structured = medai_core::build(message, &session, &filters, medicine_brand)
        .map_err(|e| e.to_string())?;
    let built = BuiltQuery {
        query_string: structured.query_string(),
        structured,
    };
    serde_json::to_string(&built).map_err(|e| e.to_string())
}

fn find_equivalent_json(
    from_country: &str,
    to_country: &str,
    medicine_name: &str,
) -> Result<String, String> {
    let request =
        EquivalentQuery::new(from_country, to_country, medicine_name).map_err(|e| e.to_string())?;
    let reply = EquivalentReply {
        response: mock_equivalent_response(&request),
        request,
    };
    serde_json::to_string(&reply).map_err(|e| e.to_string())
}

fn display_message_text(message: &str, structured_json: &str) -> Result<String, String> {
    let query = parse_query(structured_json)?;
    Ok(medai_core::display::display_message(message, &query))
}

fn render_prompt_text(structured_json: &str) -> Result<String, String> {
    let query = parse_query(structured_json)?;
    Ok(BackendRequest::from_query(&query).render_prompt())
}
