//! Cross-country medicine equivalents.
//!
//! Builds the lookup request for "what is this medicine called over there"
//! and answers it offline with educational reference text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request type tag carried in the JSON body.
pub const EQUIVALENT_QUERY_TYPE: &str = "medicine_equivalent";

/// Equivalent lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EquivalentError {
    #[error("Please enter a medicine name.")]
    MissingMedicineName,
}

/// Structured medicine-equivalent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentQuery {
    #[serde(rename = "type")]
    pub query_type: String,
    pub from_country: String,
    pub to_country: String,
    pub medicine_name: String,
    pub query: String,
}

impl EquivalentQuery {
    pub fn new(
        from_country: &str,
        to_country: &str,
        medicine_name: &str,
    ) -> Result<Self, EquivalentError> {
        let medicine_name = medicine_name.trim();
        if medicine_name.is_empty() {
            return Err(EquivalentError::MissingMedicineName);
        }
        let from_country = from_country.trim();
        let to_country = to_country.trim();

        Ok(Self {
            query_type: EQUIVALENT_QUERY_TYPE.to_string(),
            from_country: from_country.to_string(),
            to_country: to_country.to_string(),
            medicine_name: medicine_name.to_string(),
            query: format!(
                "Provide educational information about medicines commonly used in {to_country} \
                 that have the same active ingredient or therapeutic purpose as {medicine_name} \
                 commonly used in {from_country}."
            ),
        })
    }
}

/// Active ingredient families with dedicated reference text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ingredient {
    Paracetamol,
    Ibuprofen,
    Other,
}

impl Ingredient {
    fn detect(medicine_name: &str) -> Self {
        let name = medicine_name.to_lowercase();
        if name.contains("paracetamol") || name.contains("acetaminophen") {
            Ingredient::Paracetamol
        } else if name.contains("ibuprofen") {
            Ingredient::Ibuprofen
        } else {
            Ingredient::Other
        }
    }
}

/// Offline educational answer for an equivalent lookup.
pub fn mock_equivalent_response(query: &EquivalentQuery) -> String {
    let name = &query.medicine_name;
    let from = &query.from_country;
    let to = &query.to_country;

    match Ingredient::detect(name) {
        Ingredient::Paracetamol => format!(
            "Educational Reference Information:\n\n\
             {name} (commonly known as Paracetamol or Acetaminophen) is widely used in {from} for \
             pain relief and fever reduction.\n\n\
             In {to}, medicines with the same active ingredient (acetaminophen) are commonly \
             available under various brand names. These medicines serve the same therapeutic \
             purpose and contain the same active ingredient.\n\n\
             Common brand names in {to} may include formulations containing \
             acetaminophen/paracetamol. The active ingredient works the same way regardless of \
             the brand name.\n\n\
             Important Educational Note: This information is for educational reference only. \
             Different countries may have varying formulations, strengths, and availability. \
             Always consult with a licensed healthcare professional in your country for \
             appropriate medical guidance."
        ),
        Ingredient::Ibuprofen => format!(
            "Educational Reference Information:\n\n\
             {name} (Ibuprofen) is commonly used in {from} as a nonsteroidal anti-inflammatory \
             drug (NSAID) for pain, inflammation, and fever.\n\n\
             In {to}, medicines containing ibuprofen as the active ingredient are available under \
             various brand names. These medicines have the same therapeutic purpose and active \
             ingredient.\n\n\
             Common formulations in {to} may include ibuprofen tablets, capsules, or liquid \
             forms. The active ingredient provides the same therapeutic effect regardless of the \
             brand.\n\n\
             Important Educational Note: This information is for educational reference only. \
             Formulations, dosages, and availability may vary by country. Consult a licensed \
             healthcare professional for appropriate medical advice."
        ),
        Ingredient::Other => format!(
            "Educational Reference Information:\n\n\
             {name} is commonly used in {from} for therapeutic purposes.\n\n\
             In {to}, medicines with the same active ingredient or therapeutic purpose as {name} \
             may be available under different brand names. These medicines serve similar \
             therapeutic functions.\n\n\
             The active ingredient or therapeutic mechanism remains the same, though brand names, \
             formulations, and availability may differ between countries.\n\n\
             Important Educational Note: This information is for educational reference only. \
             Medicine availability, formulations, and regulations vary by country. Always consult \
             with a licensed healthcare professional in your country for appropriate medical \
             guidance."
        ),
    }
}
