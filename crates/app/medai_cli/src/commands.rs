//! Subcommand handlers.

use std::io::{self, Write};
use std::path::PathBuf;

use medai_core::config::WidgetConfig;
use medai_core::display::{display_message, problem_message};
use medai_core::equivalents::{EquivalentQuery, mock_equivalent_response};
use medai_core::pacing::Pacing;
use medai_core::prompt::BackendRequest;
use medai_core::query::{StructuredQuery, build};
use medai_core::responder::{MockResponder, Responder, ResponseResolver};
use serde::Serialize;

use crate::Result;
use crate::chat::ChatSession;
use crate::cli::{SessionArgs, load_dictionary};

/// JSON printed by `ask --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskOutput<'a> {
    structured: &'a StructuredQuery,
    query_string: String,
    response: String,
}

/// JSON printed by `equivalent --json`.
#[derive(Serialize)]
struct EquivalentOutput<'a> {
    request: &'a EquivalentQuery,
    response: String,
}

pub fn ask(
    config: &WidgetConfig,
    message: &str,
    args: &SessionArgs,
    json: bool,
    query_string: bool,
) -> Result<()> {
    let (session, filters) = args.to_context(config);
    let responder = MockResponder::with_dictionary(args.dictionary(config)?);
    let query = build(message, &session, &filters, args.brand.as_deref())?;
    let response = responder.respond(&query)?;

    let mut out = io::stdout().lock();
    if json {
        let output = AskOutput {
            structured: &query,
            query_string: query.query_string(),
            response,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if query_string {
        writeln!(out, "Query: {}", query.query_string())?;
    }
    writeln!(out, "You: {}", display_message(message, &query))?;
    writeln!(out, "MedAI: {response}")?;
    Ok(())
}

pub fn chat(config: &WidgetConfig, args: &SessionArgs, no_delay: bool) -> Result<()> {
    let (session, filters) = args.to_context(config);
    let responder = MockResponder::with_dictionary(args.dictionary(config)?);
    let pacing = if no_delay {
        Pacing::disabled()
    } else {
        config.pacing
    };

    let mut chat = ChatSession::new(session, filters, args.brand.clone(), responder, pacing);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    chat.run(stdin, &mut stdout)
}

pub fn problem(config: &WidgetConfig, name: &str, dictionary: Option<&PathBuf>) -> Result<()> {
    let resolver = ResponseResolver::new(load_dictionary(dictionary, config)?);
    let mut out = io::stdout().lock();
    writeln!(out, "You: {}", problem_message(name))?;
    writeln!(out, "MedAI: {}", resolver.resolve(name.trim()))?;
    Ok(())
}

pub fn equivalent(from: &str, to: &str, medicine: &str, json: bool) -> Result<()> {
    let request = EquivalentQuery::new(from, to, medicine)?;
    let response = mock_equivalent_response(&request);

    let mut out = io::stdout().lock();
    if json {
        let output = EquivalentOutput {
            request: &request,
            response,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{response}")?;
    }
    Ok(())
}

pub fn prompt(config: &WidgetConfig, message: &str, args: &SessionArgs) -> Result<()> {
    let (session, filters) = args.to_context(config);
    let query = build(message, &session, &filters, args.brand.as_deref())?;
    let request = BackendRequest::from_query(&query);
    write!(io::stdout().lock(), "{}", request.render_prompt())?;
    Ok(())
}
