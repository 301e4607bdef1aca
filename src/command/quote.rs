// src/command/quote.rs

//! Human-readable rendering of a command line.
//!
//! Only used for logging. The process itself is always spawned from the
//! raw token list, never from this string.

const SPECIAL_CHARS: &str = " ()[]{}&^%$#@!+=,;";

/// Wrap `token` in double quotes if it contains a shell-special character.
/// Empty tokens are returned unchanged.
pub fn quote_token(token: &str) -> String {
    if !token.is_empty() && token.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        format!("\"{token}\"")
    } else {
        token.to_string()
    }
}

/// Join a token list for display.
pub fn display_command<S: AsRef<str>>(argv: &[S]) -> String {
    argv.iter()
        .map(|t| quote_token(t.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
