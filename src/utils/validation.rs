//! Limits applied to sketches before they are searched.

/// Maximum number of hashes accepted in a single sketch
pub const MAX_HASHES: usize = 50_000_000;

/// Check that a sketch of `count` hashes is within limits.
///
/// Returns an error message if the sketch is too large, None if safe to load.
#[must_use]
pub fn check_hash_limit(count: usize) -> Option<String> {
    if count > MAX_HASHES {
        Some(format!(
            "Too many hashes: {count} exceeds maximum of {MAX_HASHES}"
        ))
    } else {
        None
    }
}

/// Check that `count` hashes at scale factor `scaled` give a base-pair
/// estimate representable as `u64`.
///
/// A sketch whose `max_hash` is tiny has a huge scale factor, and every
/// estimate derived from it multiplies by that factor.
///
/// # Examples
///
/// ```
/// use containment_search::utils::validation::check_scaled_limit;
///
/// assert!(check_scaled_limit(5_000, 1_000).is_none());
/// assert!(check_scaled_limit(1, u64::MAX).is_none());
/// assert!(check_scaled_limit(2, u64::MAX).is_some());
/// ```
#[must_use]
pub fn check_scaled_limit(count: usize, scaled: u64) -> Option<String> {
    match (count as u64).checked_mul(scaled) {
        Some(_) => None,
        None => Some(format!(
            "scaled={scaled} is too large for a sketch of {count} hashes"
        )),
    }
}
