//! Ordered-fallback resolution for optional inputs.

/// Return `primary` when present, otherwise `secondary`.
///
/// Used for recommended-vs-explicit parameter bounds.
pub fn first_present<T>(primary: Option<T>, secondary: Option<T>) -> Option<T> {
    primary.or(secondary)
}

/// Resolve a per-request override against a service default.
///
/// A missing or zero override falls back to the default, so a client sending
/// `0` gets the configured horizon rather than a degenerate one.
pub fn positive_or(requested: Option<u32>, default: u32) -> u32 {
    requested.filter(|v| *v > 0).unwrap_or(default)
}

/// Millisecond variant of [`positive_or`] for heartbeat thresholds.
pub fn positive_ms_or(requested: Option<i64>, default: i64) -> i64 {
    requested.filter(|v| *v > 0).unwrap_or(default)
}
