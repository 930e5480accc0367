//! ID prefix constants.
//!
//! Stored ids are `{prefix}-{8 hex chars}`, generated by the database layer.

/// Prefix for follow edges.
pub const PREFIX_FOLLOW: &str = "flw";

/// Prefix for edge audit entries.
pub const PREFIX_AUDIT: &str = "aud";

/// Prefix for catalog items created through the local catalog.
pub const PREFIX_ITEM: &str = "itm";

/// Every prefix the database layer may be asked to generate.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_FOLLOW, PREFIX_AUDIT, PREFIX_ITEM];

/// Check whether `id` has the shape `{prefix}-{8 hex chars}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
