//! # Utilities Module
//!
//! This module contains helper functions and utilities used
//! across the backend service.

use sha2::{Digest, Sha256};

/// Format a monetary value as a human-readable string.
///
/// Converts from cents to readable format with a thousands separator.
///
/// ## Arguments
///
/// * `amount` - Amount in cents
///
/// ## Returns
///
/// Formatted string like "1,234.56"
///
/// ## Examples
///
/// ```rust
/// assert_eq!(format_money(100), "1.00");
/// assert_eq!(format_money(123_456_789), "1,234,567.89");
/// ```
pub fn format_money(amount: i64) -> String {
    let negative = amount < 0;
    let cents = amount.unsigned_abs();
    let whole = cents / 100;
    let frac = cents % 100;

    // Add commas
    let whole_str = whole.to_string();
    let mut result = String::new();
    for (i, c) in whole_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let reversed: String = result.chars().rev().collect();

    if negative {
        format!("-{}.{:02}", reversed, frac)
    } else {
        format!("{}.{:02}", reversed, frac)
    }
}

/// Round a float to 1 decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round a float to 2 decimal places.
#[allow(dead_code)]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hash a password with the application salt.
///
/// SHA-256 over `salt:password`, hex encoded. The same salt must be
/// used for hashing at registration and verification at login.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(100), "1.00");
        assert_eq!(format_money(0), "0.00");
        assert_eq!(format_money(50), "0.50");
        assert_eq!(format_money(123_456_789), "1,234,567.89");
        assert_eq!(format_money(-2500), "-25.00");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(2.449), 2.4);
        assert_eq!(round1(2.45), 2.5);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_hash_password() {
        let a = hash_password("secret", "salt-1");
        let b = hash_password("secret", "salt-1");
        let c = hash_password("secret", "salt-2");

        // Deterministic for same salt, different across salts
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
