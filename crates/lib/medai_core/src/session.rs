//! Session context: mode, country, profile and patient history.
//!
//! Everything here lives only as long as the UI session that owns it. The
//! mutation helpers encode the rules the profile and patient-history forms
//! enforce, so front-ends stay thin.

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Country value meaning "no regional tailoring".
pub const DEFAULT_COUNTRY: &str = "Global";

/// Chronic-condition sentinel that excludes every other condition.
pub const NO_CHRONIC_CONDITIONS: &str = "None";

/// Smallest accepted age.
pub const MIN_AGE: u8 = 1;

/// Largest accepted age.
pub const MAX_AGE: u8 = 150;

/// `country` unless it is blank or the global default.
pub fn regional(country: &str) -> Option<&str> {
    let country = country.trim();
    (!country.is_empty() && country != DEFAULT_COUNTRY).then_some(country)
}

/// Chat mode. Advanced mode exposes the filter facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simple,
    Advanced,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Mode::Simple),
            "advanced" => Ok(Mode::Advanced),
            other => Err(format!("unknown mode '{other}' (expected simple or advanced)")),
        }
    }
}

/// Self-reported sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{other}' (expected male or female)")),
        }
    }
}

/// Parse a free-form age field.
///
/// Empty input, non-numeric input and values outside `[1, 150]` all yield
/// `None`. Invalid ages are discarded, never reported as errors.
pub fn parse_age(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    // Form integer parsing: an optional sign followed by leading digits.
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || negative {
        return None;
    }
    age_in_range(digits.parse().ok()?)
}

fn age_in_range(age: i64) -> Option<u8> {
    (i64::from(MIN_AGE)..=i64::from(MAX_AGE))
        .contains(&age)
        .then(|| u8::try_from(age).ok())
        .flatten()
}

/// Age as a UI might send it: a number, a numeric string or garbage.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAge {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let age = match Option::<RawAge>::deserialize(deserializer)? {
        None | Some(RawAge::Other(IgnoredAny)) => None,
        Some(RawAge::Integer(n)) => age_in_range(n),
        Some(RawAge::Float(f)) if f.is_finite() => age_in_range(f.trunc() as i64),
        Some(RawAge::Float(_)) => None,
        Some(RawAge::Text(s)) => parse_age(&s),
    };
    Ok(age)
}

/// Sex as a UI might send it; the widget uses `""` for "not reported".
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSex {
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_sex<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    let sex = match Option::<RawSex>::deserialize(deserializer)? {
        Some(RawSex::Text(s)) if !s.trim().is_empty() => s
            .parse::<Sex>()
            .inspect_err(|e| log::debug!("discarding sex input: {e}"))
            .ok(),
        Some(RawSex::Text(_) | RawSex::Other(IgnoredAny)) | None => None,
    };
    Ok(sex)
}

/// Advisory profile used only to tailor safety wording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_sex")]
    pub sex: Option<Sex>,
}

impl Profile {
    /// Apply a raw age field, discarding anything out of range.
    pub fn set_age_input(&mut self, input: &str) {
        self.age = parse_age(input);
        if self.age.is_none() && !input.trim().is_empty() {
            log::debug!("discarding invalid age input {input:?}");
        }
    }

    /// Set an already numeric age, discarding anything out of range.
    pub fn set_age(&mut self, age: Option<i64>) {
        self.age = age.and_then(age_in_range);
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.sex.is_none()
    }
}

/// Session-only medical context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientHistory {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub pregnancy_status: bool,
}

impl PatientHistory {
    /// Add an allergy. Blank and duplicate entries are ignored.
    ///
    /// Returns `true` when the list changed.
    pub fn add_allergy(&mut self, allergy: &str) -> bool {
        let allergy = allergy.trim();
        if allergy.is_empty() || self.allergies.iter().any(|a| a == allergy) {
            return false;
        }
        self.allergies.push(allergy.to_string());
        true
    }

    /// Remove an allergy. Returns `true` when it was present.
    pub fn remove_allergy(&mut self, allergy: &str) -> bool {
        let allergy = allergy.trim();
        let before = self.allergies.len();
        self.allergies.retain(|a| a != allergy);
        self.allergies.len() != before
    }

    /// Toggle a chronic condition chip.
    ///
    /// `"None"` is exclusive: selecting it clears every other condition, and
    /// selecting any other condition clears it.
    pub fn toggle_chronic_condition(&mut self, condition: &str) {
        let condition = condition.trim();
        if condition.is_empty() {
            return;
        }

        if condition == NO_CHRONIC_CONDITIONS {
            if self.has_no_conditions_marker() {
                self.chronic_conditions.clear();
            } else {
                self.chronic_conditions = vec![NO_CHRONIC_CONDITIONS.to_string()];
            }
            return;
        }

        self.chronic_conditions.retain(|c| c != NO_CHRONIC_CONDITIONS);

        if let Some(pos) = self.chronic_conditions.iter().position(|c| c == condition) {
            self.chronic_conditions.remove(pos);
        } else {
            self.chronic_conditions.push(condition.to_string());
        }
    }

    pub fn set_pregnancy_status(&mut self, pregnant: bool) {
        self.pregnancy_status = pregnant;
    }

    /// Conditions that carry medical meaning.
    ///
    /// Empty whenever the "None" marker is present, whatever else the list holds.
    pub fn effective_conditions(&self) -> Vec<String> {
        if self.has_no_conditions_marker() {
            return Vec::new();
        }
        self.chronic_conditions.clone()
    }

    /// True when nothing medically relevant has been recorded.
    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty()
            && self.effective_conditions().is_empty()
            && !self.pregnancy_status
    }

    fn has_no_conditions_marker(&self) -> bool {
        self.chronic_conditions
            .iter()
            .any(|c| c == NO_CHRONIC_CONDITIONS)
    }
}

/// Read-only snapshot of the widget's session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub patient_history: PatientHistory,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            country: default_country(),
            profile: Profile::default(),
            patient_history: PatientHistory::default(),
        }
    }
}

impl SessionContext {
    /// Set the country; blank input resets to [`DEFAULT_COUNTRY`].
    pub fn set_country(&mut self, country: &str) {
        let country = country.trim();
        self.country = if country.is_empty() {
            default_country()
        } else {
            country.to_string()
        };
    }

    /// Country when it asks for regional tailoring.
    pub fn regional_country(&self) -> Option<&str> {
        regional(&self.country)
    }
}
