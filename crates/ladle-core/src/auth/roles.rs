//! Role normalization.
//!
//! The API serializes authorities in several shapes depending on which
//! backend version produced the payload: bare role names, objects with an
//! `authority` field, or objects with a `role` field. Everything is folded
//! into the canonical `ROLE_*` string form here.

use serde_json::Value;

/// Canonical role prefix.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Role required to create recipes.
pub const PROFESSIONAL_ROLE: &str = "ROLE_PROFESSIONAL";

/// Normalizes heterogeneous role representations into canonical `ROLE_*` strings.
///
/// Total over any input: unrecognized shapes contribute nothing, no element
/// can fail. Order is preserved and duplicates are kept — upstream emits the
/// same authority twice in some payloads and the set semantics live in
/// membership checks, not here.
pub fn normalize_roles(raw: &[Value]) -> Vec<String> {
    raw.iter()
        .map(|value| match value {
            Value::String(name) => with_prefix(name),
            Value::Object(fields) => {
                if let Some(authority) = fields.get("authority").and_then(Value::as_str) {
                    authority.to_string()
                } else if let Some(role) = fields.get("role").and_then(Value::as_str) {
                    // Role-bearing objects carry the bare entity name, often
                    // lowercase; canonical form is uppercase.
                    with_prefix(&role.to_uppercase())
                } else {
                    String::new()
                }
            }
            _ => String::new(),
        })
        .filter(|role| !role.is_empty())
        .collect()
}

fn with_prefix(name: &str) -> String {
    if name.starts_with(ROLE_PREFIX) {
        name.to_string()
    } else {
        format!("{ROLE_PREFIX}{name}")
    }
}
