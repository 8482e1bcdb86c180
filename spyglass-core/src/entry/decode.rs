use chrono::{DateTime, Utc};

use crate::entry::section::extract_section;
use crate::entry::types::{RawFields, Record};

/// Fixed timestamp layout used by the access log, e.g. `17/May/2054:18:54:34 +0000`.
const TIME_LAYOUT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Decodes tokenized fields into a typed record.
///
/// Decoding is best-effort per field: a timestamp, status, size, or section
/// that fails to parse degrades to its zero value with a warning, and the
/// record still carries whatever did parse.
pub fn decode(fields: RawFields<'_>) -> Record {
    let timestamp = match DateTime::parse_from_str(fields.time, TIME_LAYOUT) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(error = %e, time = %fields.time, "could not parse time");
            None
        }
    };

    let status = match fields.status.parse::<u64>() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, status = %fields.status, "could not parse status");
            0
        }
    };

    let size = match fields.size.parse::<u64>() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, size = %fields.size, "could not parse size");
            0
        }
    };

    let section = match extract_section(fields.request) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "could not parse section");
            String::new()
        }
    };

    let record = Record {
        client_address: fields.client_address.to_string(),
        identifier: fields.identifier.to_string(),
        user_id: fields.user_id.to_string(),
        request: fields.request.to_string(),
        section,
        status,
        size,
        timestamp,
    };

    tracing::info!(
        client_address = %record.client_address,
        identifier = %record.identifier,
        user_id = %record.user_id,
        request = %record.request,
        section = %record.section,
        status = record.status,
        size = record.size,
        timestamp = ?record.timestamp,
        "Request received"
    );

    record
}
