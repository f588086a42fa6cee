//! # medai_core
//!
//! Core logic for the MedAI educational chat widget.
//!
//! The UI layer owns a [`session::SessionContext`] and a
//! [`filters::FilterSelection`], hands snapshots of both to
//! [`query::build`] and renders whatever a [`responder::Responder`] returns.
//! Nothing here performs I/O apart from loading custom dictionaries.

pub mod config;
pub mod display;
pub mod equivalents;
pub mod filters;
pub mod pacing;
pub mod prompt;
pub mod query;
pub mod responder;
pub mod session;

pub use query::{QueryError, StructuredQuery, build};
pub use responder::{MockResponder, Responder, ResponseResolver, resolve};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
