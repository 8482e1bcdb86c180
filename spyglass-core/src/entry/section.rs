use crate::entry::error::DecodeError;

/// Derives the aggregation section from a raw request line.
///
/// The request line is expected to look like `METHOD PATH PROTOCOL`. The
/// section is the top-level path segment including its leading slash
/// (`/a/b/c` → `/a`), with a trailing slash stripped (`/a/` → `/a`).
/// Two shapes pass through untouched: `-` (no request was logged) and
/// wildcard paths such as `OPTIONS *`.
pub fn extract_section(request: &str) -> Result<String, DecodeError> {
    // No request was logged, so no section can be derived.
    if request == "-" {
        return Ok("-".to_string());
    }

    let invalid = || DecodeError::RequestFormat {
        request: request.to_string(),
    };

    // End of METHOD.
    let section_pos = request.find(' ').map(|i| i + 1).ok_or_else(invalid)?;

    // End of PATH, relative to section_pos.
    let mut end_of_section = request[section_pos..].find(' ').ok_or_else(invalid)?;

    // First slash after the leading one, relative to section_pos. Zero when
    // the rest of the line holds no slash at all.
    let subsection_pos = request[section_pos..]
        .get(1..)
        .and_then(|rest| rest.find('/'))
        .map_or(0, |i| i + 1);

    // Absorb a trailing slash into the path boundary.
    if request.as_bytes().get(section_pos + end_of_section) == Some(&b'/') {
        end_of_section += 1;
    }

    // Without a subsection the whole path is the section; otherwise only the
    // top-level segment up to the subsection boundary.
    let end = if end_of_section < subsection_pos {
        end_of_section
    } else {
        subsection_pos
    };

    Ok(request[section_pos..section_pos + end].to_string())
}
