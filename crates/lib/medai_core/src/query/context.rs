//! Natural-language context clauses prepended to the user's message.

use crate::session::{PatientHistory, Profile, SessionContext};

/// Profile clause, when age or sex has been reported.
pub fn profile_clause(profile: &Profile) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(age) = profile.age {
        parts.push(format!("age: {age}"));
    }
    if let Some(sex) = profile.sex {
        parts.push(format!("sex: {sex}"));
    }
    if parts.is_empty() {
        return None;
    }

    Some(format!(
        "User has reported {}. This information is advisory and non-prescriptive. \
         Use this only to tailor educational safety information. ",
        parts.join(", ")
    ))
}

/// Medical-history clause, when any allergy, condition or pregnancy is recorded.
pub fn medical_clause(history: &PatientHistory) -> Option<String> {
    let mut parts = Vec::new();
    if !history.allergies.is_empty() {
        parts.push(format!("Known allergies: {}", history.allergies.join(", ")));
    }
    let conditions = history.effective_conditions();
    if !conditions.is_empty() {
        parts.push(format!("Chronic conditions: {}", conditions.join(", ")));
    }
    if history.pregnancy_status {
        parts.push("Pregnancy status: Yes".to_string());
    }
    if parts.is_empty() {
        return None;
    }

    Some(format!(
        "The user has reported the following medical context: {}. \
         Provide educational information and avoid mentioning medicines that may conflict. ",
        parts.join("; ")
    ))
}

/// Country clause, unless the session is on the global default.
pub fn country_clause(session: &SessionContext) -> Option<String> {
    session.regional_country().map(|country| {
        format!("Provide educational medical information based on medicines commonly used in {country}. ")
    })
}

/// Prefix `message` with every applicable clause.
///
/// Order is fixed: profile, medical history, country, then the message.
pub fn contextualize(message: &str, session: &SessionContext) -> String {
    [
        profile_clause(&session.profile),
        medical_clause(&session.patient_history),
        country_clause(session),
    ]
    .into_iter()
    .flatten()
    .chain(std::iter::once(message.to_string()))
    .collect()
}
