//! Public shipping ID generation.
//!
//! Format: four random uppercase alphanumerics, a hyphen, and the current
//! millisecond timestamp in uppercase base-36. The database enforces
//! uniqueness; the caller regenerates on the (unlikely) conflict.

use chrono::Utc;
use rand::RngExt;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh shipping ID, e.g. `K3QZ-M9XB4T2`.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let prefix: String = (0..4)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    let timestamp = to_base36(Utc::now().timestamp_millis());
    format!("{prefix}-{timestamp}")
}

/// Render a non-negative number in uppercase base-36.
fn to_base36(mut n: i64) -> String {
    if n <= 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("alphabet is ASCII")
}
