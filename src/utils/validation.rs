//! Centralized validation and helper functions.

/// Maximum number of records allowed in a single sequence file (DOS protection)
pub const MAX_RECORDS: usize = 100_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use seqrepo::utils::validation::{check_record_limit, MAX_RECORDS};
///
/// assert!(check_record_limit(0).is_none());
/// assert!(check_record_limit(MAX_RECORDS).is_some());
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}
