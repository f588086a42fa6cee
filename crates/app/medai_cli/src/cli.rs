use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medai_core::config::WidgetConfig;
use medai_core::filters::{FilterKind, FilterSelection};
use medai_core::responder::{DictionaryError, ResponseDictionary};
use medai_core::session::{Mode, SessionContext, Sex};

/// MedAI educational healthcare information chat.
#[derive(Parser, Debug)]
#[command(name = "medai", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message and print the reply.
    Ask {
        /// Message to send.
        message: String,

        #[command(flatten)]
        session: SessionArgs,

        /// Print the structured query, query string and reply as JSON.
        #[arg(long)]
        json: bool,

        /// Print the URL-encoded query string before the reply.
        #[arg(long)]
        query_string: bool,
    },

    /// Interactive chat on stdin; type /help for commands.
    Chat {
        #[command(flatten)]
        session: SessionArgs,

        /// Reply immediately instead of simulating typing.
        #[arg(long)]
        no_delay: bool,
    },

    /// Ask about a common problem, as the quick-problem buttons do.
    Problem {
        /// Problem name, e.g. "Fever".
        name: String,

        /// YAML dictionary replacing the built-in replies.
        #[arg(long)]
        dictionary: Option<PathBuf>,
    },

    /// Look up equivalents of a medicine in another country.
    Equivalent {
        /// Medicine name as known in the source country.
        medicine: String,

        /// Country the medicine is known in.
        #[arg(long)]
        from: String,

        /// Country to find equivalents in.
        #[arg(long)]
        to: String,

        /// Print the structured request and reply as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt a reasoning backend would receive.
    Prompt {
        /// Message to send.
        message: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Print the version.
    Version,
}

/// Session, profile, history and filter flags shared by several commands.
#[derive(Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// simple or advanced.
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Country for region-aware information.
    #[arg(long)]
    pub country: Option<String>,

    /// Age in years; values outside 1..=150 are ignored.
    #[arg(long)]
    pub age: Option<String>,

    /// male or female.
    #[arg(long)]
    pub sex: Option<Sex>,

    /// Known allergy (repeatable).
    #[arg(long = "allergy")]
    pub allergies: Vec<String>,

    /// Chronic condition (repeatable); "None" clears the others.
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Currently pregnant.
    #[arg(long)]
    pub pregnant: bool,

    /// Drug category filter (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Usage context filter (repeatable).
    #[arg(long = "context")]
    pub contexts: Vec<String>,

    /// Medicine brand name.
    #[arg(long)]
    pub brand: Option<String>,

    /// YAML dictionary replacing the built-in replies.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
}

impl SessionArgs {
    /// Session and filters as configured, then overridden by flags.
    pub fn to_context(&self, config: &WidgetConfig) -> (SessionContext, FilterSelection) {
        let mut session = config.new_session();
        if let Some(mode) = self.mode {
            session.mode = mode;
        }
        if let Some(country) = &self.country {
            session.set_country(country);
        }
        if let Some(age) = &self.age {
            session.profile.set_age_input(age);
        }
        session.profile.sex = self.sex;
        for allergy in &self.allergies {
            session.patient_history.add_allergy(allergy);
        }
        for condition in &self.conditions {
            session.patient_history.toggle_chronic_condition(condition);
        }
        session.patient_history.set_pregnancy_status(self.pregnant);

        let mut filters = FilterSelection::default();
        for category in &self.categories {
            filters.select(FilterKind::Category, category);
        }
        for context in &self.contexts {
            filters.select(FilterKind::Context, context);
        }

        (session, filters)
    }

    /// `--dictionary` wins over the configured path.
    pub fn dictionary(&self, config: &WidgetConfig) -> Result<ResponseDictionary, DictionaryError> {
        load_dictionary(self.dictionary.as_ref(), config)
    }
}

pub fn load_dictionary(
    path: Option<&PathBuf>,
    config: &WidgetConfig,
) -> Result<ResponseDictionary, DictionaryError> {
    match path {
        Some(path) => ResponseDictionary::load(path),
        None => config.load_dictionary(),
    }
}
