use chrono::{DateTime, Utc};

/// Raw field texts captured from one tokenized access-log line.
#[derive(Debug, Clone, Copy)]
pub struct RawFields<'a> {
    pub client_address: &'a str,
    pub identifier: &'a str,
    pub user_id: &'a str,
    pub request: &'a str,
    pub time: &'a str,
    pub status: &'a str,
    pub size: &'a str,
}

/// One decoded access-log line.
///
/// A record always exists once tokenization succeeds; fields that fail to
/// decode fall back to their zero value instead of discarding the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub client_address: String,
    pub identifier: String,
    pub user_id: String,

    /// Raw request line as it appeared in the log.
    pub request: String,

    /// Normalized route identifier: `-` when no request was logged, `*` for
    /// wildcard requests, the top-level path segment otherwise. Empty when
    /// extraction failed.
    pub section: String,

    pub status: u64,
    pub size: u64,

    /// `None` when the time text did not match `DD/Mon/YYYY:HH:MM:SS ±ZZZZ`.
    pub timestamp: Option<DateTime<Utc>>,
}
