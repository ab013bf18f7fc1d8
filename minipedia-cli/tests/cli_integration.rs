//! Integration tests for the command-line interface

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn minipedia() -> Command {
    Command::cargo_bin("minipedia").unwrap()
}

#[test]
fn test_tree_prints_outline() {
    let file = write_temp(concat!(
        "intro text\n",
        "\u{FFFD}\u{FFFD}2\u{FFFD}\u{FFFD}History\nbody here\n",
        "\u{FFFD}\u{FFFD}3\u{FFFD}\u{FFFD}Early years\nmore body",
    ));
    minipedia()
        .arg("tree")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(intro) [10 chars]"))
        .stdout(predicate::str::contains("History [9 chars]"))
        .stdout(predicate::str::contains("  Early years [9 chars]"));
}

#[test]
fn test_tree_json_output() {
    let file = write_temp("intro\n\u{FFFD}\u{FFFD}2\u{FFFD}\u{FFFD}History\nbody");
    minipedia()
        .arg("tree")
        .arg(file.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\":null"))
        .stdout(predicate::str::contains("\"title\":\"History\""));
}

#[test]
fn test_tree_missing_file_fails() {
    minipedia()
        .args(["tree", "/no/such/extract.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/extract.txt"));
}

#[test]
fn test_chunks_paginates_input() {
    let file = write_temp("One two three four five six seven eight nine ten eleven twelve");
    minipedia()
        .arg("chunks")
        .arg(file.path())
        .args(["--ascii-limit", "40", "--unicode-limit", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: One two three four ... (reply for more)"))
        .stdout(predicate::str::contains("...eleven twelve (end of section)"));
}

#[test]
fn test_chunks_single_message_input() {
    let file = write_temp("Short enough.");
    minipedia()
        .arg("chunks")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1: Short enough. (end of section)"));
}

#[test]
fn test_chunks_rejects_unusable_limit() {
    let file = write_temp("some text to paginate");
    minipedia()
        .arg("chunks")
        .arg(file.path())
        .args(["--ascii-limit", "5", "--unicode-limit", "5"])
        .assert()
        .failure();
}

#[test]
fn test_demo_full_conversation() {
    minipedia()
        .args(["demo", "--fixtures", "fixtures/demo.json"])
        .write_stdin("timbuktu\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What would you like to search Wikipedia for?"))
        .stdout(predicate::str::contains("1. Timbuktu\n2. Timbuktu Region\n3. Tomb of Askia"))
        .stdout(predicate::str::contains("1. Timbuktu\n2. History\n3. Geography"))
        .stdout(predicate::str::contains("(Full content sent by SMS.)"))
        .stdout(predicate::str::contains("SMS< [+15551234567]"));
}

#[test]
fn test_demo_more_flow_reaches_end() {
    minipedia()
        .args(["demo", "--fixtures", "fixtures/demo.json"])
        .write_stdin("timbuktu\n1\n2\n/more\n/more\n/more\n/more\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(reply for more)"))
        .stdout(predicate::str::contains("(end of section)"));
}

#[test]
fn test_demo_close_hangs_up() {
    minipedia()
        .args(["demo", "--fixtures", "fixtures/demo.json"])
        .write_stdin("timbuktu\n/close\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(session closed)"));
}

#[test]
fn test_demo_config_disables_sms() {
    let config = write_temp("{\"send_sms_content\": false}");
    let mut cmd = minipedia();
    cmd.args(["demo", "--fixtures", "fixtures/demo.json", "--config"])
        .arg(config.path())
        .write_stdin("timbuktu\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Full content sent by SMS.)"))
        .stdout(predicate::str::contains("SMS<").not());
}

#[test]
fn test_demo_missing_fixtures_fails() {
    minipedia()
        .args(["demo", "--fixtures", "/no/such/fixtures.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
