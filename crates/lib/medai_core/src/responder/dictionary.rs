//! Canned response dictionary.
//!
//! Entries keep their declaration order; that order decides which trigger
//! wins when a message mentions several.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply used when no trigger matches.
pub const FALLBACK_RESPONSE: &str = "Thank you for your message. I understand you're seeking medical \
information. For personalized advice, please consult with a licensed healthcare professional. \
I can provide general educational information about symptoms and medications.";

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    (
        "Cold & Cough",
        "I understand you're experiencing cold and cough symptoms. Common causes include viral \
         infections, allergies, or environmental irritants. Rest, stay hydrated, and consider \
         over-the-counter remedies. If symptoms persist or worsen, please consult a healthcare \
         provider.",
    ),
    (
        "Fever",
        "Fever is your body's natural response to infection. Monitor your temperature and stay \
         hydrated. If your fever is above 103°F (39.4°C) or persists for more than 3 days, seek \
         medical attention. Rest and over-the-counter fever reducers may help.",
    ),
    (
        "Headache",
        "Headaches can have various causes including stress, dehydration, or underlying \
         conditions. Ensure you're well-hydrated and getting adequate rest. If headaches are \
         severe, frequent, or accompanied by other symptoms, consult a healthcare professional.",
    ),
    (
        "Body Pain",
        "Body pain can result from overexertion, inflammation, or underlying medical conditions. \
         Rest, gentle stretching, and over-the-counter pain relievers may help. If pain is severe \
         or persistent, please see a healthcare provider.",
    ),
    (
        "Stomach Pain",
        "Stomach pain can be caused by various factors including indigestion, food sensitivities, \
         or gastrointestinal issues. Monitor your symptoms and consider dietary changes. If pain \
         is severe, persistent, or accompanied by other symptoms, seek medical care.",
    ),
    (
        "Sore Throat",
        "A sore throat is often caused by viral infections, allergies, or irritants. Gargling with \
         warm salt water, staying hydrated, and using throat lozenges may provide relief. If \
         symptoms persist or worsen, consult a healthcare provider.",
    ),
    (
        "Fatigue",
        "Fatigue can be caused by various factors including lack of sleep, stress, or underlying \
         health conditions. Ensure adequate rest, maintain a balanced diet, and stay hydrated. If \
         fatigue is persistent or severe, consult a healthcare professional.",
    ),
    (
        "Nausea",
        "Nausea can result from various causes including digestive issues, medications, or \
         underlying conditions. Stay hydrated, eat small, bland meals, and avoid triggers. If \
         nausea is severe or persistent, seek medical attention.",
    ),
    (
        "Allergy",
        "Allergies can cause various symptoms including sneezing, itching, or respiratory issues. \
         Identify and avoid triggers when possible. Over-the-counter antihistamines may help. If \
         symptoms are severe or persistent, consult an allergist or healthcare provider.",
    ),
    (
        "Dizziness",
        "Dizziness can be caused by dehydration, low blood pressure, inner ear issues, or other \
         conditions. Ensure adequate hydration and avoid sudden movements. If dizziness is \
         severe, persistent, or accompanied by other symptoms, seek medical care.",
    ),
    (
        "I have symptoms",
        "I'm here to help. Please describe your symptoms in detail, including when they started, \
         their severity, and any other relevant information. This will help me provide better \
         guidance.",
    ),
    (
        "About a medicine",
        "I can provide general information about medications. Please share the name of the \
         medicine you'd like to know about, and I'll provide educational information. Remember, \
         I cannot replace professional medical advice.",
    ),
    (
        "Is this safe for me?",
        "To assess safety, I'd need to know about your medical history, current medications, and \
         any allergies. Please share this information, and I can provide general guidance. \
         However, always consult with a healthcare provider for personalized advice.",
    ),
];

/// Dictionary loading errors.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Dictionary has no entries")]
    Empty,

    #[error("Entry {0} has a blank trigger")]
    BlankTrigger(usize),

    #[error("Duplicate trigger: {0}")]
    DuplicateTrigger(String),
}

/// One trigger phrase and its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub trigger: String,
    pub response: String,
}

/// On-disk YAML layout.
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    fallback: Option<String>,
    entries: Vec<DictionaryEntry>,
}

/// Ordered, read-only trigger → response mapping.
#[derive(Debug, Clone)]
pub struct ResponseDictionary {
    entries: Vec<DictionaryEntry>,
    lowered: Vec<String>,
    fallback: String,
}

impl Default for ResponseDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseDictionary {
    /// The widget's stock symptom and quick-query replies.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|(trigger, response)| DictionaryEntry {
                trigger: (*trigger).to_string(),
                response: (*response).to_string(),
            })
            .collect();
        Self::from_parts(entries, FALLBACK_RESPONSE.to_string())
    }

    /// Build from explicit entries, validating triggers.
    pub fn new(
        entries: Vec<DictionaryEntry>,
        fallback: Option<String>,
    ) -> Result<Self, DictionaryError> {
        if entries.is_empty() {
            return Err(DictionaryError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.trigger.trim().is_empty() {
                return Err(DictionaryError::BlankTrigger(i));
            }
            if entries[..i].iter().any(|e| e.trigger == entry.trigger) {
                return Err(DictionaryError::DuplicateTrigger(entry.trigger.clone()));
            }
        }
        let fallback = fallback
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string());
        Ok(Self::from_parts(entries, fallback))
    }

    /// Parse a YAML document with an `entries` list and optional `fallback`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DictionaryError> {
        let file: DictionaryFile = serde_yaml::from_str(yaml)?;
        Self::new(file.entries, file.fallback)
    }

    /// Load a YAML dictionary from disk.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let yaml = fs::read_to_string(path)?;
        let dictionary = Self::from_yaml_str(&yaml)?;
        log::info!(
            "loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    fn from_parts(entries: Vec<DictionaryEntry>, fallback: String) -> Self {
        let lowered = entries.iter().map(|e| e.trigger.to_lowercase()).collect();
        Self {
            entries,
            lowered,
            fallback,
        }
    }

    /// Reply for a byte-identical trigger.
    pub fn exact(&self, message: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.trigger == message)
            .map(|e| e.response.as_str())
    }

    /// First entry, in declaration order, whose trigger occurs in `message`
    /// ignoring case.
    pub fn first_contained(&self, message: &str) -> Option<&DictionaryEntry> {
        let message = message.to_lowercase();
        self.lowered
            .iter()
            .position(|trigger| message.contains(trigger.as_str()))
            .map(|i| &self.entries[i])
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.trigger.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
