//! # shiptrack-auth
//!
//! Authentication primitives for ShipTrack: JWT claims, token
//! encoding/decoding, and Argon2id password hashing. HTTP-free — cookie
//! plumbing lives in the API crate.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, JwtError, TokenPair, TokenType};
pub use password::PasswordHasher;
