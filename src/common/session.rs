//! Session identifiers.

use uuid::Uuid;

/// Prefix of every generated session id
pub const SESSION_PREFIX: &str = "session-";

/// Number of hex characters after the prefix
const SESSION_HEX_LEN: usize = 12;

/// Generate a fresh random session id, e.g. `session-3f2a9c01b7de`
pub fn generate_session_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", SESSION_PREFIX, &hex[..SESSION_HEX_LEN])
}

/// Check whether an id has the shape produced by [`generate_session_id`]
pub fn is_generated_session_id(id: &str) -> bool {
    id.strip_prefix(SESSION_PREFIX).is_some_and(|hex| {
        hex.len() == SESSION_HEX_LEN
            && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    })
}

/// Shell statement exporting the session id for later hook invocations
pub fn export_line(session_id: &str) -> String {
    format!("export SESSION_ID={}", shell_quote(session_id))
}

/// Quote a value for POSIX shells, leaving plain tokens bare
fn shell_quote(value: &str) -> String {
    let is_plain = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    if is_plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
