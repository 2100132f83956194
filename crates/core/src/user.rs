//! User account rules.

/// Canonical form of an email address used for storage and lookup.
///
/// Surrounding whitespace is dropped and the address is lower-cased, so
/// `" Asha@Example.com "` and `"asha@example.com"` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
