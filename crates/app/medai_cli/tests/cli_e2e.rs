//! End-to-end CLI tests using `assert_cmd`

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get the binary with a clean MedAI environment
fn medai() -> Command {
    let mut cmd =
        Command::cargo_bin("medai").unwrap_or_else(|err| panic!("Binary not found: {err}"));
    for var in [
        "MEDAI_COUNTRY",
        "MEDAI_MODE",
        "MEDAI_INDICATOR_DELAY_MS",
        "MEDAI_RESPONSE_DELAY_MIN_MS",
        "MEDAI_RESPONSE_DELAY_MAX_MS",
        "MEDAI_DICTIONARY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    medai()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version() {
    medai()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    medai().arg("invalid-command-xyz").assert().failure();
}

#[test]
fn test_ask_substring_match() {
    medai()
        .args(["ask", "I have a bad headache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: I have a bad headache"))
        .stdout(predicate::str::contains(
            "MedAI: Headaches can have various causes",
        ));
}

#[test]
fn test_ask_fallback() {
    medai()
        .args(["ask", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "please consult with a licensed healthcare professional",
        ));
}

#[test]
fn test_ask_empty_message_fails() {
    medai()
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("message is empty"));
}

#[test]
fn test_ask_advanced_display_and_query_string() {
    medai()
        .args([
            "ask",
            "I have fever",
            "--mode",
            "advanced",
            "--country",
            "India",
            "--brand",
            "Tylenol",
            "--category",
            "Pain Relief",
            "--query-string",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Query: userMessage=I%20have%20fever&mode=advanced&country=India\
             &medicineBrand=Tylenol&category=Pain%20Relief",
        ))
        .stdout(predicate::str::contains(
            "You: I have fever [Country: India | Brand: Tylenol | Category: Pain Relief]",
        ));
}

#[test]
fn test_ask_json_output() {
    let output = medai()
        .args([
            "ask",
            "Is this safe for me?",
            "--country",
            "India",
            "--age",
            "30",
            "--allergy",
            "penicillin",
            "--json",
        ])
        .output()
        .unwrap_or_else(|err| panic!("Failed to run medai: {err}"));
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|err| panic!("Invalid JSON: {err}"));
    let structured = &json["structured"];
    assert_eq!(structured["userMessage"], "Is this safe for me?");
    assert_eq!(structured["profile"]["age"], 30);
    assert_eq!(
        structured["patientHistory"]["allergies"][0],
        "penicillin"
    );
    assert!(structured["filters"].is_null());

    let contextual = structured["contextualMessage"]
        .as_str()
        .unwrap_or_else(|| panic!("contextualMessage missing"));
    let profile_at = contextual.find("age: 30").unwrap_or(usize::MAX);
    let medical_at = contextual.find("Known allergies").unwrap_or(usize::MAX);
    let country_at = contextual.find("used in India").unwrap_or(usize::MAX);
    assert!(profile_at < medical_at && medical_at < country_at);

    assert!(
        json["response"]
            .as_str()
            .is_some_and(|r| r.starts_with("To assess safety"))
    );
    assert!(
        json["queryString"]
            .as_str()
            .is_some_and(|q| q.starts_with("userMessage=Is%20this%20safe%20for%20me%3F"))
    );
}

#[test]
fn test_problem_command() {
    medai()
        .args(["problem", "Stomach Pain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You: I'm experiencing stomach pain. Can you help?",
        ))
        .stdout(predicate::str::contains("MedAI: Stomach pain can be caused"));
}

#[test]
fn test_equivalent_command() {
    medai()
        .args(["equivalent", "Paracetamol", "--from", "India", "--to", "USA"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "commonly known as Paracetamol or Acetaminophen",
        ));
}

#[test]
fn test_equivalent_requires_medicine_name() {
    medai()
        .args(["equivalent", " ", "--from", "India", "--to", "USA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a medicine name."));
}

#[test]
fn test_prompt_command() {
    medai()
        .args(["prompt", "What is ibuprofen?", "--sex", "male"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You are MedAI, an educational healthcare AI assistant.",
        ))
        .stdout(predicate::str::contains("Sex: Male"))
        .stdout(predicate::str::contains("- Do not prescribe"));
}

#[test]
fn test_chat_session() {
    medai()
        .args(["chat", "--no-delay"])
        .write_stdin("/mode advanced\n/context Adult\nsore throat\n/show\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode set to advanced."))
        .stdout(predicate::str::contains("You: sore throat [Context: Adult]"))
        .stdout(predicate::str::contains("MedAI: A sore throat is often caused"))
        .stdout(predicate::str::contains("Contexts: Adult"));
}

#[test]
fn test_custom_dictionary() {
    let temp = TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"));
    let path = temp.path().join("replies.yaml");
    fs::write(
        &path,
        "fallback: Ask a pharmacist.\nentries:\n  - trigger: Rash\n    response: Keep it clean.\n",
    )
    .unwrap_or_else(|err| panic!("Failed to write dictionary: {err}"));

    medai()
        .args(["ask", "a rash on my arm", "--dictionary"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("MedAI: Keep it clean."));

    medai()
        .args(["ask", "headache"])
        .env("MEDAI_DICTIONARY", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("MedAI: Ask a pharmacist."));
}

#[test]
fn test_missing_dictionary_fails() {
    medai()
        .args(["ask", "hello", "--dictionary", "/nonexistent/replies.yaml"])
        .assert()
        .failure();
}
