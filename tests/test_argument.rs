//! Unit tests for argument encoding

use agi_session::{quote_argument, unquote_argument};

#[test]
fn test_simple_words_pass_through() {
    for word in ["a", "SIP", "agi_network", "12345", "_", "Dial_2"] {
        assert_eq!(quote_argument(word), word);
    }
}

#[test]
fn test_non_words_are_quoted() {
    assert_eq!(quote_argument("hello world"), "\"hello world\"");
    assert_eq!(quote_argument("SIP/100"), "\"SIP/100\"");
    assert_eq!(quote_argument("1234567890#*"), "\"1234567890#*\"");
    assert_eq!(quote_argument("${CALLERID(num)}"), "\"${CALLERID(num)}\"");
}

#[test]
fn test_empty_argument_is_quoted() {
    assert_eq!(quote_argument(""), "\"\"");
}

#[test]
fn test_quotes_and_backslashes_are_escaped() {
    assert_eq!(quote_argument(r#"say "hi""#), r#""say \"hi\"""#);
    assert_eq!(quote_argument(r"C:\sounds"), r#""C:\\sounds""#);
    assert_eq!(quote_argument(r#"\""#), r#""\\\"""#);
}

#[test]
fn test_non_ascii_is_quoted() {
    assert_eq!(quote_argument("héllo"), "\"héllo\"");
}

#[test]
fn test_unquote_recovers_input() {
    let samples = [
        "",
        "plain",
        "two words",
        r#"she said "hi""#,
        r"back\slash",
        r#"\"\\""#,
        "trailing backslash \\",
        "tab\tand newline\n",
        "ünïcödé ✓",
    ];

    for input in samples {
        let encoded = quote_argument(input);
        let decoded = unquote_argument(&encoded)
            .unwrap_or_else(|| panic!("failed to unquote {encoded:?}"));
        assert_eq!(decoded, input, "round trip of {input:?}");
    }
}

#[test]
fn test_each_special_char_gets_exactly_one_escape() {
    let input = r#"a"b\c"#;
    let encoded = quote_argument(input);
    let inner = &encoded[1..encoded.len() - 1];
    assert_eq!(inner, r#"a\"b\\c"#);
    assert_eq!(inner.matches('\\').count(), 3);
}

#[test]
fn test_unquote_rejects_malformed_tokens() {
    assert!(unquote_argument("\"unterminated").is_none());
    assert!(unquote_argument("two words").is_none());
    assert!(unquote_argument(r#""stray " quote""#).is_none());
    assert!(unquote_argument(r#""dangling\""#).is_none());
    assert!(unquote_argument(r#""bad \x escape""#).is_none());
    assert!(unquote_argument("\"").is_none());
}
