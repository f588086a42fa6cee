//! Interactive chat loop.
//!
//! Plain lines are sent as messages; lines starting with `/` edit the
//! session the way the widget's panels and chips do.

use std::io::{BufRead, Write};
use std::thread;

use medai_core::display::{display_message, problem_message};
use medai_core::filters::{FilterKind, FilterSelection};
use medai_core::pacing::Pacing;
use medai_core::query::{StructuredQuery, build};
use medai_core::responder::Responder;
use medai_core::session::{Mode, SessionContext, Sex};

use crate::Result;

const HELP: &str = "\
Commands:
  /mode simple|advanced        switch mode
  /country <name>              set country (Global resets)
  /age <years>                 set age (blank or invalid clears)
  /sex male|female|clear       set sex
  /allergy add|remove <name>   edit allergies
  /condition <name>            toggle a chronic condition (None clears others)
  /pregnant on|off             set pregnancy status
  /category <name>             toggle a drug category filter
  /context <name>              toggle a usage context filter
  /brand [name]                set or clear the medicine brand
  /problem <name>              ask about a common problem
  /show                        print the current session
  /reset                       start a fresh session
  /help                        show this help
  /quit                        leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Send(String),
    Mode(Mode),
    Country(String),
    Age(String),
    Sex(Option<Sex>),
    AddAllergy(String),
    RemoveAllergy(String),
    Condition(String),
    Pregnant(bool),
    Filter(FilterKind, String),
    Brand(Option<String>),
    Problem(String),
    Show,
    Reset,
    Help,
    Quit,
    Empty,
}

/// Parse one input line. Errors are user-facing messages.
pub fn parse_line(line: &str) -> std::result::Result<ChatCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ChatCommand::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ChatCommand::Send(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    let required = |what: &str| {
        if arg.is_empty() {
            Err(format!("/{name} needs {what}"))
        } else {
            Ok(arg.to_string())
        }
    };

    match name.to_ascii_lowercase().as_str() {
        "mode" => arg.parse().map(ChatCommand::Mode),
        "country" => Ok(ChatCommand::Country(arg.to_string())),
        "age" => Ok(ChatCommand::Age(arg.to_string())),
        "sex" => match arg.to_ascii_lowercase().as_str() {
            "" | "clear" => Ok(ChatCommand::Sex(None)),
            other => other.parse().map(|s| ChatCommand::Sex(Some(s))),
        },
        "allergy" => {
            let (action, allergy) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
            let allergy = allergy.trim();
            if allergy.is_empty() {
                return Err("/allergy needs add|remove and a name".to_string());
            }
            match action.to_ascii_lowercase().as_str() {
                "add" => Ok(ChatCommand::AddAllergy(allergy.to_string())),
                "remove" => Ok(ChatCommand::RemoveAllergy(allergy.to_string())),
                other => Err(format!("unknown allergy action '{other}'")),
            }
        }
        "condition" => required("a condition").map(ChatCommand::Condition),
        "pregnant" => match arg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Ok(ChatCommand::Pregnant(true)),
            "off" | "no" | "false" => Ok(ChatCommand::Pregnant(false)),
            _ => Err("/pregnant needs on or off".to_string()),
        },
        "category" => {
            required("a category").map(|c| ChatCommand::Filter(FilterKind::Category, c))
        }
        "context" => required("a context").map(|c| ChatCommand::Filter(FilterKind::Context, c)),
        "brand" => Ok(ChatCommand::Brand((!arg.is_empty()).then(|| arg.to_string()))),
        "problem" => required("a problem name").map(ChatCommand::Problem),
        "show" => Ok(ChatCommand::Show),
        "reset" => Ok(ChatCommand::Reset),
        "help" => Ok(ChatCommand::Help),
        "quit" | "exit" => Ok(ChatCommand::Quit),
        other => Err(format!("unknown command '/{other}', try /help")),
    }
}

/// Session state owned by the chat loop.
pub struct ChatSession<R: Responder> {
    initial: (SessionContext, FilterSelection, Option<String>),
    session: SessionContext,
    filters: FilterSelection,
    brand: Option<String>,
    responder: R,
    pacing: Pacing,
}

impl<R: Responder> ChatSession<R> {
    pub fn new(
        session: SessionContext,
        filters: FilterSelection,
        brand: Option<String>,
        responder: R,
        pacing: Pacing,
    ) -> Self {
        Self {
            initial: (session.clone(), filters.clone(), brand.clone()),
            session,
            filters,
            brand,
            responder,
            pacing,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Read lines until EOF or `/quit`.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, output: &mut O) -> Result<()> {
        writeln!(output, "MedAI educational chat. Type /help for commands.")?;
        for line in input.lines() {
            let line = line?;
            match parse_line(&line) {
                Ok(ChatCommand::Quit) => break,
                Ok(command) => self.handle(command, output)?,
                Err(message) => writeln!(output, "! {message}")?,
            }
        }
        Ok(())
    }

    pub fn handle<O: Write>(&mut self, command: ChatCommand, output: &mut O) -> Result<()> {
        match command {
            ChatCommand::Send(message) => self.send(&message, output)?,
            ChatCommand::Problem(problem) => {
                writeln!(output, "You: {}", problem_message(&problem))?;
                let query = build(&problem, &self.session, &self.filters, None)?;
                self.reply(&query, output)?;
            }
            ChatCommand::Mode(mode) => {
                self.session.mode = mode;
                writeln!(output, "Mode set to {mode}.")?;
            }
            ChatCommand::Country(country) => {
                self.session.set_country(&country);
                writeln!(output, "Country set to {}.", self.session.country)?;
            }
            ChatCommand::Age(age) => {
                self.session.profile.set_age_input(&age);
                match self.session.profile.age {
                    Some(age) => writeln!(output, "Age set to {age}.")?,
                    None => writeln!(output, "Age cleared.")?,
                }
            }
            ChatCommand::Sex(sex) => {
                self.session.profile.sex = sex;
                match sex {
                    Some(sex) => writeln!(output, "Sex set to {sex}.")?,
                    None => writeln!(output, "Sex cleared.")?,
                }
            }
            ChatCommand::AddAllergy(allergy) => {
                if self.session.patient_history.add_allergy(&allergy) {
                    writeln!(output, "Allergy added: {}.", allergy.trim())?;
                } else {
                    writeln!(output, "Allergy already recorded.")?;
                }
            }
            ChatCommand::RemoveAllergy(allergy) => {
                if self.session.patient_history.remove_allergy(&allergy) {
                    writeln!(output, "Allergy removed: {}.", allergy.trim())?;
                } else {
                    writeln!(output, "No such allergy.")?;
                }
            }
            ChatCommand::Condition(condition) => {
                self.session
                    .patient_history
                    .toggle_chronic_condition(&condition);
                writeln!(
                    output,
                    "Chronic conditions: {}.",
                    list_or_none(&self.session.patient_history.chronic_conditions)
                )?;
            }
            ChatCommand::Pregnant(pregnant) => {
                self.session.patient_history.set_pregnancy_status(pregnant);
                writeln!(
                    output,
                    "Pregnancy status: {}.",
                    if pregnant { "Yes" } else { "No" }
                )?;
            }
            ChatCommand::Filter(kind, value) => {
                let selected = self.filters.toggle(kind, &value);
                let state = if selected { "selected" } else { "cleared" };
                writeln!(output, "{kind} '{}' {state}.", value.trim())?;
                if self.session.mode == Mode::Simple {
                    writeln!(output, "Filters apply in advanced mode (/mode advanced).")?;
                }
            }
            ChatCommand::Brand(brand) => {
                self.brand = brand.map(|b| b.trim().to_string());
                match &self.brand {
                    Some(brand) => writeln!(output, "Brand set to {brand}.")?,
                    None => writeln!(output, "Brand cleared.")?,
                }
            }
            ChatCommand::Show => self.show(output)?,
            ChatCommand::Reset => {
                let (session, filters, brand) = self.initial.clone();
                self.session = session;
                self.filters = filters;
                self.brand = brand;
                writeln!(output, "Session reset.")?;
            }
            ChatCommand::Help => writeln!(output, "{HELP}")?,
            ChatCommand::Empty | ChatCommand::Quit => {}
        }
        Ok(())
    }

    fn send<O: Write>(&self, message: &str, output: &mut O) -> Result<()> {
        let query = build(message, &self.session, &self.filters, self.brand.as_deref())?;
        writeln!(output, "You: {}", display_message(message, &query))?;
        self.reply(&query, output)
    }

    fn reply<O: Write>(&self, query: &StructuredQuery, output: &mut O) -> Result<()> {
        if !self.pacing.is_disabled() {
            let schedule = self.pacing.schedule(&mut rand::rng());
            thread::sleep(schedule.indicator_at);
            writeln!(output, "MedAI is typing...")?;
            output.flush()?;
            thread::sleep(schedule.typing_for());
        }
        let reply = self.responder.respond(query)?;
        writeln!(output, "MedAI: {reply}")?;
        output.flush()?;
        Ok(())
    }

    fn show<O: Write>(&self, output: &mut O) -> Result<()> {
        let profile = &self.session.profile;
        let history = &self.session.patient_history;
        writeln!(output, "Mode: {}", self.session.mode)?;
        writeln!(output, "Country: {}", self.session.country)?;
        writeln!(
            output,
            "Age: {}",
            profile.age.map_or_else(|| "-".to_string(), |a| a.to_string())
        )?;
        writeln!(output, "Sex: {}", profile.sex.map_or("-", |s| s.as_str()))?;
        writeln!(output, "Allergies: {}", list_or_none(&history.allergies))?;
        writeln!(
            output,
            "Chronic conditions: {}",
            list_or_none(&history.chronic_conditions)
        )?;
        writeln!(
            output,
            "Pregnant: {}",
            if history.pregnancy_status { "Yes" } else { "No" }
        )?;
        writeln!(
            output,
            "Categories: {}",
            self.filters
                .joined(FilterKind::Category, ", ")
                .unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(
            output,
            "Contexts: {}",
            self.filters
                .joined(FilterKind::Context, ", ")
                .unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(output, "Brand: {}", self.brand.as_deref().unwrap_or("-"))?;
        Ok(())
    }
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use medai_core::responder::{FALLBACK_RESPONSE, MockResponder};

    use super::*;

    fn chat() -> ChatSession<MockResponder> {
        ChatSession::new(
            SessionContext::default(),
            FilterSelection::default(),
            None,
            MockResponder::default(),
            Pacing::disabled(),
        )
    }

    fn run(script: &str) -> (ChatSession<MockResponder>, String) {
        let mut session = chat();
        let mut output = Vec::new();
        session.run(script.as_bytes(), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn plain_lines_are_messages() {
        assert_eq!(
            parse_line("  I have fever "),
            Ok(ChatCommand::Send("I have fever".to_string()))
        );
        assert_eq!(parse_line("   "), Ok(ChatCommand::Empty));
    }

    #[test]
    fn slash_commands_parse() {
        assert_eq!(parse_line("/mode advanced"), Ok(ChatCommand::Mode(Mode::Advanced)));
        assert_eq!(parse_line("/sex clear"), Ok(ChatCommand::Sex(None)));
        assert_eq!(
            parse_line("/allergy add peanut oil"),
            Ok(ChatCommand::AddAllergy("peanut oil".to_string()))
        );
        assert_eq!(
            parse_line("/category Pain Relief"),
            Ok(ChatCommand::Filter(FilterKind::Category, "Pain Relief".to_string()))
        );
        assert_eq!(parse_line("/brand"), Ok(ChatCommand::Brand(None)));
        assert_eq!(parse_line("/EXIT"), Ok(ChatCommand::Quit));
    }

    #[test]
    fn bad_commands_report_errors() {
        assert!(parse_line("/mode expert").is_err());
        assert!(parse_line("/allergy add").is_err());
        assert!(parse_line("/allergy forget dust").is_err());
        assert!(parse_line("/pregnant maybe").is_err());
        assert!(parse_line("/condition").is_err());
        assert!(parse_line("/teleport").is_err());
    }

    #[test]
    fn conversation_resolves_replies() {
        let (_, output) = run("I have a bad headache\nxyz\n/quit\nFever\n");
        assert!(output.contains("You: I have a bad headache"));
        assert!(output.contains("MedAI: Headaches can have various causes"));
        assert!(output.contains(&format!("MedAI: {FALLBACK_RESPONSE}")));
        // Lines after /quit are never read.
        assert!(!output.contains("You: Fever"));
    }

    #[test]
    fn advanced_mode_echo_shows_filters() {
        let (_, output) =
            run("/mode advanced\n/country India\n/category Pain Relief\n/brand Crocin\nfever?\n");
        assert!(
            output.contains("You: fever? [Country: India | Brand: Crocin | Category: Pain Relief]")
        );
        assert!(output.contains("MedAI: Fever is your body's natural response"));
    }

    #[test]
    fn session_commands_update_state() {
        let (chat, output) = run(
            "/age 151\n/age 40\n/sex female\n/allergy add penicillin\n/allergy add penicillin\n\
             /condition Asthma\n/condition None\n/pregnant on\n/context Adult\n",
        );
        assert!(output.contains("Age cleared."));
        assert!(output.contains("Allergy already recorded."));
        let session = chat.session();
        assert_eq!(session.profile.age, Some(40));
        assert_eq!(session.profile.sex, Some(Sex::Female));
        assert_eq!(session.patient_history.allergies, vec!["penicillin"]);
        assert_eq!(session.patient_history.chronic_conditions, vec!["None"]);
        assert!(session.patient_history.pregnancy_status);
        assert!(chat.filters().context.contains("Adult"));
    }

    #[test]
    fn reset_restores_initial_session() {
        let (chat, output) = run("/country Kenya\n/allergy add dust\n/reset\n");
        assert!(output.contains("Session reset."));
        assert_eq!(chat.session(), &SessionContext::default());
    }

    #[test]
    fn problem_uses_problem_name_for_reply() {
        let (_, output) = run("/problem Sore Throat\n");
        assert!(output.contains("You: I'm experiencing sore throat. Can you help?"));
        assert!(output.contains("MedAI: A sore throat is often caused"));
    }

    #[test]
    fn invalid_input_is_reported_and_loop_continues() {
        let (_, output) = run("/mode expert\nNausea\n");
        assert!(output.contains("! unknown mode 'expert'"));
        assert!(output.contains("MedAI: Nausea can result"));
    }
}
