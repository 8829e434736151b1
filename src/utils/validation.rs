//! Centralized validation and helper functions.

/// Maximum number of records allowed in a single catalog data set (DOS protection)
pub const MAX_CATALOG_RECORDS: usize = 100_000;

/// Validate that a string is a 6-digit hex color, with or without a leading `#`.
///
/// # Examples
///
/// ```
/// use wada_match::utils::validation::is_valid_hex;
///
/// assert!(is_valid_hex("#D9C7A3"));
/// assert!(is_valid_hex("d9c7a3"));
/// assert!(!is_valid_hex("#12345")); // 5 digits
/// assert!(!is_valid_hex("##D9C7A3"));
/// ```
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    let digits = s.strip_prefix('#').unwrap_or(s);
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize a hex color to canonical `#RRGGBB` (uppercase).
/// Returns None if the input is not a valid hex color.
#[must_use]
pub fn normalize_hex(s: &str) -> Option<String> {
    if is_valid_hex(s) {
        let digits = s.strip_prefix('#').unwrap_or(s);
        Some(format!("#{}", digits.to_ascii_uppercase()))
    } else {
        None
    }
}

/// Compare two hex colors ignoring case and the optional `#`.
#[must_use]
pub fn same_hex(a: &str, b: &str) -> bool {
    match (normalize_hex(a), normalize_hex(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Check a data set's record count against the maximum allowed.
///
/// Returns an error message if the count exceeds the limit, None if acceptable.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count > MAX_CATALOG_RECORDS {
        Some(format!(
            "Too many records: {count} exceeds maximum of {MAX_CATALOG_RECORDS}"
        ))
    } else {
        None
    }
}
