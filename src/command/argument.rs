//! Argument encoding for command lines

use std::borrow::Cow;

/// Whether `arg` is a non-empty run of ASCII letters, digits and underscores
fn is_simple_word(arg: &str) -> bool {
    !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Encode one argument for inclusion in a command line
///
/// Simple words are passed through untouched. Anything else is wrapped in double
/// quotes, with every `"` and `\` prefixed by a backslash.
///
/// # Examples
/// ```
/// use agi_session::command::quote_argument;
///
/// assert_eq!(quote_argument("SIP_1"), "SIP_1");
/// assert_eq!(quote_argument("hello world"), "\"hello world\"");
/// assert_eq!(quote_argument(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
#[must_use]
pub fn quote_argument(arg: &str) -> Cow<'_, str> {
    if is_simple_word(arg) {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Reverse [`quote_argument`]
///
/// Returns `None` if `token` is neither a simple word nor a well-formed quoted
/// string (unterminated quotes, a stray inner `"`, or a dangling escape).
#[must_use]
pub fn unquote_argument(token: &str) -> Option<Cow<'_, str>> {
    if is_simple_word(token) {
        return Some(Cow::Borrowed(token));
    }

    let inner = token.strip_prefix('"')?.strip_suffix('"')?;
    let mut raw = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => raw.push(escaped),
                _ => return None,
            },
            '"' => return None,
            _ => raw.push(ch),
        }
    }
    Some(Cow::Owned(raw))
}
