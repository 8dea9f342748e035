//! Unit tests for command formatting

use agi_session::Command;
use agi_session::command::{
    DEFAULT_DIGIT_TIMEOUT_MS, DEFAULT_ESCAPE_DIGITS, DEFAULT_VERBOSE_LEVEL,
};

#[test]
fn test_exec_encodes_every_argument() {
    let cmd = Command::exec("Dial", ["SIP/100", "30"]);
    assert_eq!(cmd.to_wire(), "EXEC Dial \"SIP/100\" 30\n");
}

#[test]
fn test_exec_without_arguments() {
    let cmd = Command::exec("Answer", Vec::<String>::new());
    assert_eq!(cmd.to_wire(), "EXEC Answer\n");
}

#[test]
fn test_verbose_defaults_level() {
    assert_eq!(DEFAULT_VERBOSE_LEVEL, 1);
    assert_eq!(
        Command::verbose("hello world", None).to_wire(),
        "VERBOSE \"hello world\" 1\n"
    );
    assert_eq!(Command::verbose("hi", Some(4)).to_wire(), "VERBOSE hi 4\n");
}

#[test]
fn test_get_variable() {
    assert_eq!(
        Command::get_variable("CALLERID").to_wire(),
        "GET VARIABLE CALLERID\n"
    );
    assert_eq!(
        Command::get_variable("CALLERID(num)").to_wire(),
        "GET VARIABLE \"CALLERID(num)\"\n"
    );
}

#[test]
fn test_get_full_variable() {
    assert_eq!(
        Command::get_full_variable("${EXTEN}@${CONTEXT}").to_wire(),
        "GET FULL VARIABLE \"${EXTEN}@${CONTEXT}\"\n"
    );
}

#[test]
fn test_stream_file_defaults_escape_digits() {
    assert_eq!(DEFAULT_ESCAPE_DIGITS, "1234567890#*");
    assert_eq!(
        Command::stream_file("welcome", None).to_wire(),
        "STREAM FILE welcome \"1234567890#*\"\n"
    );
    assert_eq!(
        Command::stream_file("custom/menu", Some("12")).to_wire(),
        "STREAM FILE \"custom/menu\" 12\n"
    );
}

#[test]
fn test_wait_for_digit_defaults_timeout() {
    assert_eq!(DEFAULT_DIGIT_TIMEOUT_MS, 5000);
    assert_eq!(
        Command::wait_for_digit(None).to_wire(),
        "WAIT FOR DIGIT 5000\n"
    );
    assert_eq!(
        Command::wait_for_digit(Some(-1)).to_wire(),
        "WAIT FOR DIGIT -1\n"
    );
}

#[test]
fn test_hangup() {
    assert_eq!(Command::Hangup.to_wire(), "HANGUP\n");
    assert_eq!(Command::Hangup.to_string(), "HANGUP");
}
