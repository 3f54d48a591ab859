//! Parser for CLDR exemplar character set strings.
//!
//! The grammar is `[` ( literal | `\uHHHH` | `{cluster}` | a`-`z )* `]` with
//! spaces ignored. A `{...}` cluster is one opaque multi-character token and
//! can never be a range endpoint. Malformed input aborts the whole
//! compilation: a silently truncated exemplar set would drop script evidence
//! from the generated tables.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExemplarError {
    #[error("exemplar set must be wrapped in `[...]`: `{0}`")]
    NotBracketed(String),
    #[error("`\\` at end of exemplar set")]
    DanglingEscape,
    #[error("`\\u{0}` does not denote a Unicode scalar value")]
    BadHexEscape(String),
    #[error("unterminated `{{`")]
    UnterminatedCluster,
    #[error("empty `{{}}` cluster")]
    EmptyCluster,
    #[error("invalid range from `{0}` to `{1}`: endpoints must be single characters")]
    InvalidRange(String, String),
    #[error("`-` range is missing an endpoint")]
    DanglingRange,
    #[error("U+{0:04X} in expanded range is not a valid scalar value")]
    InvalidScalar(u32),
}

/// Parse one exemplar set into a flat ordered token sequence. Every token is
/// a single character except for `{...}` clusters, which stay whole.
pub fn parse(raw: &str) -> Result<Vec<String>, ExemplarError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ExemplarError::NotBracketed(raw.to_owned()))?;

    let mut tokens: Vec<String> = Vec::new();
    let mut pending_range = false;
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            ' ' => continue,
            '-' => {
                pending_range = true;
                continue;
            }
            '\\' => match chars.next() {
                None => return Err(ExemplarError::DanglingEscape),
                Some(u @ ('u' | 'U')) => {
                    let mut hex = String::new();
                    while chars.peek().is_some_and(|ch| ch.is_ascii_hexdigit()) {
                        hex.push(chars.next().expect("peeked"));
                    }
                    if hex.is_empty() {
                        // `\u` with no digits escapes the letter itself.
                        u.to_string()
                    } else {
                        let decoded = u32::from_str_radix(&hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| ExemplarError::BadHexEscape(hex.clone()))?;
                        decoded.to_string()
                    }
                }
                Some(escaped) => escaped.to_string(),
            },
            '{' => {
                let mut cluster = String::new();
                loop {
                    match chars.next() {
                        None => return Err(ExemplarError::UnterminatedCluster),
                        Some('}') => break,
                        Some(part) => cluster.push(part),
                    }
                }
                if cluster.is_empty() {
                    return Err(ExemplarError::EmptyCluster);
                }
                cluster
            }
            other => other.to_string(),
        };

        tokens.push(token);
        if pending_range {
            expand_range(&mut tokens)?;
            pending_range = false;
        }
    }

    if pending_range {
        return Err(ExemplarError::DanglingRange);
    }
    Ok(tokens)
}

/// Replace the two topmost tokens by the inclusive codepoint range between
/// them. An inverted range covers nothing, matching the upstream tooling.
fn expand_range(tokens: &mut Vec<String>) -> Result<(), ExemplarError> {
    let end = tokens.pop().ok_or(ExemplarError::DanglingRange)?;
    let start = tokens.pop().ok_or(ExemplarError::DanglingRange)?;
    let (Some(start_char), Some(end_char)) = (single_char(&start), single_char(&end)) else {
        return Err(ExemplarError::InvalidRange(start, end));
    };
    for codepoint in start_char as u32..=end_char as u32 {
        let c = char::from_u32(codepoint).ok_or(ExemplarError::InvalidScalar(codepoint))?;
        tokens.push(c.to_string());
    }
    Ok(())
}

fn single_char(token: &str) -> Option<char> {
    let mut it = token.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
