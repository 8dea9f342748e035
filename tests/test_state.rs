//! Unit tests for the session state machine and response parsing

use agi_session::codec::{Frame, Phase};
use agi_session::session::{Dispatch, SessionState, parse_handshake};
use agi_session::{AgiError, Response};

#[test]
fn test_handshake_mapping_and_phase() {
    let mut state = SessionState::new();
    assert_eq!(state.phase(), Phase::AwaitingHandshake);

    let dispatch = state.handle_frame(Frame::Handshake("foo: bar\nbaz:qux\n\n".to_string()));
    let Dispatch::Variables(vars) = dispatch else {
        panic!("expected variables, got {dispatch:?}");
    };

    assert_eq!(vars.len(), 2);
    assert_eq!(vars.get("foo"), Some("bar"));
    assert_eq!(vars.get("baz"), Some("qux"));
    assert_eq!(state.phase(), Phase::AwaitingResponse);
}

#[test]
fn test_handshake_value_keeps_later_colons() {
    let vars = parse_handshake("agi_request: agi://host:4573/script\n\n");
    assert_eq!(vars.get("agi_request"), Some("agi://host:4573/script"));
}

#[test]
fn test_handshake_missing_colon_gives_empty_value() {
    let vars = parse_handshake("lonely\n\n");
    assert_eq!(vars.get("lonely"), Some(""));
}

#[test]
fn test_handshake_last_write_wins() {
    let vars = parse_handshake("a: 1\nb: 2\na: 3\n\n");
    assert_eq!(vars.get("a"), Some("3"));
    assert_eq!(vars.len(), 2);
}

#[test]
fn test_handshake_trims_value_only() {
    let vars = parse_handshake("agi_type:   SIP  \n\n");
    assert_eq!(vars.get("agi_type"), Some("SIP"));
}

#[test]
fn test_empty_handshake() {
    let mut state = SessionState::new();
    let dispatch = state.handle_frame(Frame::Handshake("\n\n".to_string()));
    assert_eq!(dispatch, Dispatch::Variables(Default::default()));
    assert_eq!(state.phase(), Phase::AwaitingResponse);
}

#[test]
fn test_second_handshake_is_ignored() {
    let mut state = SessionState::new();
    state.handle_frame(Frame::Handshake("a: 1\n\n".to_string()));
    let dispatch = state.handle_frame(Frame::Handshake("a: 2\n\n".to_string()));
    assert_eq!(dispatch, Dispatch::Ignored);
    assert_eq!(state.phase(), Phase::AwaitingResponse);
}

#[test]
fn test_response_line() {
    let mut state = SessionState::new();
    state.handle_frame(Frame::Handshake("\n\n".to_string()));

    let dispatch = state.handle_frame(Frame::Line("200 result=42".to_string()));
    assert_eq!(dispatch, Dispatch::Response(Response::new(200, "42")));
}

#[test]
fn test_garbage_line_is_hangup() {
    let mut state = SessionState::new();
    state.handle_frame(Frame::Handshake("\n\n".to_string()));

    let dispatch = state.handle_frame(Frame::Line("random garbage".to_string()));
    assert_eq!(dispatch, Dispatch::Hangup("random garbage".to_string()));
}

#[test]
fn test_hangup_line_from_peer() {
    let mut state = SessionState::new();
    let dispatch = state.handle_frame(Frame::Line("HANGUP".to_string()));
    assert_eq!(dispatch, Dispatch::Hangup("HANGUP".to_string()));
}

#[test]
fn test_empty_line_is_ignored() {
    let mut state = SessionState::new();
    assert_eq!(
        state.handle_frame(Frame::Line(String::new())),
        Dispatch::Ignored
    );
}

#[test]
fn test_response_parse() {
    let response = Response::parse("200 result=42").unwrap();
    assert_eq!(response.code, 200);
    assert_eq!(response.result, "42");
    assert!(response.is_success());
    assert_eq!(response.result_code(), Some(42));
}

#[test]
fn test_response_parse_keeps_payload_verbatim() {
    let response: Response = "200 result=1 (timeout) endpos=1234".parse().unwrap();
    assert_eq!(response.result, "1 (timeout) endpos=1234");
    assert_eq!(response.result_code(), Some(1));

    let response = Response::parse("200 result=").unwrap();
    assert_eq!(response.result, "");
    assert_eq!(response.result_code(), None);
}

#[test]
fn test_response_parse_drops_carriage_return() {
    let response = Response::parse("200 result=1\r").unwrap();
    assert_eq!(response.result, "1");
    assert_eq!(response.result_code(), Some(1));

    let response = Response::parse("200 result=\r").unwrap();
    assert_eq!(response.result, "");
}

#[test]
fn test_crlf_line_from_peer_is_a_response() {
    let mut state = SessionState::new();
    state.handle_frame(Frame::Handshake("agi_request: a\n\n".into()));
    assert_eq!(
        state.handle_frame(Frame::Line("200 result=0 endpos=42\r".into())),
        Dispatch::Response(Response::new(200, "0 endpos=42"))
    );
}

#[test]
fn test_response_parse_error_codes() {
    let response = Response::parse("510 result=-1").unwrap();
    assert_eq!(response.code, 510);
    assert!(!response.is_success());
    assert_eq!(response.result_code(), Some(-1));
}

#[test]
fn test_response_parse_rejects_bad_lines() {
    for line in [
        "random garbage",
        "20 result=1",
        "2000 result=1",
        "200 result 1",
        "200result=1",
        "abc result=1",
        "520-Invalid command syntax.",
        "é0 result=1",
    ] {
        let err = Response::parse(line).unwrap_err();
        assert!(
            matches!(err, AgiError::InvalidResponse(ref l) if l == line),
            "{line:?} gave {err:?}"
        );
    }
}

#[test]
fn test_response_display_is_wire_form() {
    assert_eq!(Response::new(200, "0").to_string(), "200 result=0");
    assert_eq!(Response::new(5, "x").to_string(), "005 result=x");
}

#[test]
fn test_variables_conversions() {
    use std::collections::HashMap;

    use agi_session::Variables;

    let vars: Variables = [
        ("agi_request".to_string(), "hello.agi".to_string()),
        ("agi_channel".to_string(), "SIP/100-1".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(vars.request(), Some("hello.agi"));
    assert_eq!(vars, parse_handshake("agi_request: hello.agi\nagi_channel: SIP/100-1\n\n"));

    let map: HashMap<String, String> = vars.clone().into_inner();
    assert_eq!(map.get("agi_channel").map(String::as_str), Some("SIP/100-1"));
    assert_eq!(Variables::from(map), vars);
}

#[test]
fn test_terminal_errors() {
    assert!(AgiError::hangup("HANGUP").is_terminal());
    assert!(AgiError::stream_closed("eof").is_terminal());
    assert!(AgiError::session_ended("dropped").is_terminal());

    assert!(!AgiError::invalid_response("junk").is_terminal());
    assert!(!AgiError::transport("broken pipe").is_terminal());
    assert!(!AgiError::buffer_overflow(16).is_terminal());
}
