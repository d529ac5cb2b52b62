//! Commit fingerprint extraction from branch and directory names.
//!
//! Preview directories and CI ref slugs may carry a short commit hash after a
//! marker token, e.g. `1-branch-ontest-de1234de`. The fingerprint is whatever
//! follows the last marker occurrence.

/// Marker token that precedes the commit fingerprint in names.
pub const MARKER: &str = "ontest-";

/// Returns the substring of `value` following the last occurrence of `marker`.
///
/// Returns an empty string when the marker does not occur or when nothing
/// follows it. Never fails.
///
/// ```
/// use ontest_deploy::fingerprint::{extract, MARKER};
///
/// assert_eq!(extract("1-branch-ontest-de1234de", MARKER), "de1234de");
/// assert_eq!(extract("feature-no-marker", MARKER), "");
/// assert_eq!(extract("trailing-ontest-", MARKER), "");
/// ```
pub fn extract<'a>(value: &'a str, marker: &str) -> &'a str {
    match value.rfind(marker) {
        Some(pos) => &value[pos + marker.len()..],
        None => "",
    }
}
