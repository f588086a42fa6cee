//! Structured query construction.
//!
//! [`build`] turns a raw message plus read-only session and filter snapshots
//! into a [`StructuredQuery`]: the request a reasoning backend would receive.
//! The same inputs always produce an equal value.

pub mod context;
pub mod encoding;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filters::{FilterKind, FilterSelection};
use crate::session::{Mode, PatientHistory, SessionContext, Sex};

/// Query construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Validation error: message is empty")]
    EmptyMessage,
}

/// Profile section of a structured query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProfile {
    pub age: Option<u8>,
    pub sex: Option<Sex>,
    pub country: String,
}

/// Patient-history section; absent fields are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHistory {
    pub allergies: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,
    pub pregnancy_status: Option<bool>,
}

impl QueryHistory {
    /// `None` when the history holds nothing medically relevant.
    fn from_history(history: &PatientHistory) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        let conditions = history.effective_conditions();
        Some(Self {
            allergies: (!history.allergies.is_empty()).then(|| history.allergies.clone()),
            chronic_conditions: (!conditions.is_empty()).then_some(conditions),
            pregnancy_status: history.pregnancy_status.then_some(true),
        })
    }
}

/// Filter section; absent fields are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    pub medicine_brand: Option<String>,
    pub drug_category: Option<Vec<String>>,
    pub context: Option<Vec<String>>,
}

impl QueryFilters {
    fn from_selection(filters: &FilterSelection, medicine_brand: Option<String>) -> Option<Self> {
        if filters.is_empty() && medicine_brand.is_none() {
            return None;
        }
        let facet = |kind: FilterKind| -> Option<Vec<String>> {
            let values = filters.values(kind);
            (!values.is_empty()).then(|| values.iter().cloned().collect())
        };
        Some(Self {
            medicine_brand,
            drug_category: facet(FilterKind::Category),
            context: facet(FilterKind::Context),
        })
    }
}

/// Immutable snapshot of one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub user_message: String,
    /// `user_message` prefixed with profile, medical and country clauses.
    pub contextual_message: String,
    pub mode: Mode,
    pub country: String,
    pub profile: QueryProfile,
    pub patient_history: Option<QueryHistory>,
    pub filters: Option<QueryFilters>,
}

impl StructuredQuery {
    pub fn medicine_brand(&self) -> Option<&str> {
        self.filters.as_ref()?.medicine_brand.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        self.filters
            .as_ref()
            .and_then(|f| f.drug_category.as_deref())
            .unwrap_or_default()
    }

    pub fn contexts(&self) -> &[String] {
        self.filters
            .as_ref()
            .and_then(|f| f.context.as_deref())
            .unwrap_or_default()
    }

    /// Flat URL-encoded form for logging and debugging.
    ///
    /// Field order: `userMessage`, `mode`, `country`, then `medicineBrand`,
    /// `category` and `context` when present.
    pub fn query_string(&self) -> String {
        let categories = self.categories().join(",");
        let contexts = self.contexts().join(",");

        let mut pairs = vec![
            ("userMessage", self.user_message.as_str()),
            ("mode", self.mode.as_str()),
            ("country", self.country.as_str()),
        ];
        if let Some(brand) = self.medicine_brand() {
            pairs.push(("medicineBrand", brand));
        }
        if !categories.is_empty() {
            pairs.push(("category", categories.as_str()));
        }
        if !contexts.is_empty() {
            pairs.push(("context", contexts.as_str()));
        }
        encoding::encode_pairs(pairs)
    }

    /// JSON body a backend would receive.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build a structured query.
///
/// The raw message is stored as given; only emptiness is judged on its
/// trimmed form. A blank `medicine_brand` counts as absent.
///
/// Callers are expected to drop blank input before sending, but `build`
/// enforces it too: a message that is empty after trimming returns
/// [`QueryError::EmptyMessage`].
pub fn build(
    raw_message: &str,
    session: &SessionContext,
    filters: &FilterSelection,
    medicine_brand: Option<&str>,
) -> Result<StructuredQuery, QueryError> {
    if raw_message.trim().is_empty() {
        return Err(QueryError::EmptyMessage);
    }

    let medicine_brand = medicine_brand
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string);

    let query = StructuredQuery {
        user_message: raw_message.to_string(),
        contextual_message: context::contextualize(raw_message, session),
        mode: session.mode,
        country: session.country.clone(),
        profile: QueryProfile {
            age: session.profile.age,
            sex: session.profile.sex,
            country: session.country.clone(),
        },
        patient_history: QueryHistory::from_history(&session.patient_history),
        filters: QueryFilters::from_selection(filters, medicine_brand),
    };

    log::debug!("built query: {}", query.query_string());
    Ok(query)
}
