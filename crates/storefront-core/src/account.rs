//! Effective-account normalization.
//!
//! Buyers browsing on behalf of an account pass its id through to every
//! backend call. The storefront host hands us the raw value, which may be
//! empty or the all-zero placeholder the platform uses for "no account".

/// The all-zero id the storefront host substitutes when no account is set.
pub const PLACEHOLDER_ACCOUNT_ID: &str = "000000000000000";

/// Resolves a raw effective-account id into the value sent to the backend.
///
/// Returns `None` for a missing or blank id, or [`PLACEHOLDER_ACCOUNT_ID`];
/// every other value passes through unchanged.
#[must_use]
pub fn resolve_effective_account_id(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(id) if !id.trim().is_empty() && id != PLACEHOLDER_ACCOUNT_ID => Some(id.to_owned()),
        _ => None,
    }
}
