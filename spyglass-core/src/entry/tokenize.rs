use once_cell::sync::Lazy;
use regex::Regex;

use crate::entry::error::DecodeError;
use crate::entry::types::RawFields;

// Common Log Format variant:
//   client identifier user [DD/Mon/YYYY:HH:MM:SS ±ZZZZ] "request" status size
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+) (\S+) (\S+) \[([^\]]+)\] "([^"]*)" (\S+) (\S+)$"#)
        .expect("access log line pattern is valid")
});

/// Splits one raw access-log line into its named fields.
///
/// A line that does not match the grammar produces no fields at all; the
/// caller drops it and moves on.
pub fn tokenize(line: &str) -> Result<RawFields<'_>, DecodeError> {
    let caps = LINE_RE.captures(line).ok_or_else(|| DecodeError::Tokenize {
        line: line.to_string(),
    })?;

    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    Ok(RawFields {
        client_address: field(1),
        identifier: field(2),
        user_id: field(3),
        time: field(4),
        request: field(5),
        status: field(6),
        size: field(7),
    })
}
