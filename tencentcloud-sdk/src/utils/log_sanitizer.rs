//! Log sanitization utilities
//!
//! Request and response bodies are logged at `debug` on every call. These helpers
//! keep large payloads (certificates, template contents, long lists) and secrets
//! out of the log stream.

use serde_json::Value;

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_PREFIX: usize = 4;

/// Request fields whose values are masked before a body is logged.
const SENSITIVE_FIELDS: &[&str] = &["ProofImage"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a body for safe logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus a note with the total size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential, keeping only a short prefix.
///
/// `AKIDexample123` becomes `AKID**********`.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(VISIBLE_SECRET_PREFIX).collect();
    let hidden = secret.chars().count().saturating_sub(VISIBLE_SECRET_PREFIX);
    format!("{visible}{}", "*".repeat(hidden))
}

/// Mask the values of sensitive fields anywhere in a JSON body.
///
/// Bodies that are not JSON, or carry no sensitive field, come back unchanged.
pub fn redact_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            if redact_value(&mut value) {
                value.to_string()
            } else {
                body.to_string()
            }
        }
        _ => body.to_string(),
    }
}

fn redact_value(value: &mut Value) -> bool {
    match value {
        Value::Object(fields) => fields.iter_mut().fold(false, |changed, (key, v)| {
            if SENSITIVE_FIELDS.contains(&key.as_str()) {
                match v {
                    Value::String(s) => {
                        *s = mask_secret(s);
                        true
                    }
                    _ => changed,
                }
            } else {
                redact_value(v) | changed
            }
        }),
        Value::Array(items) => items.iter_mut().fold(false, |changed, v| redact_value(v) | changed),
        _ => false,
    }
}
