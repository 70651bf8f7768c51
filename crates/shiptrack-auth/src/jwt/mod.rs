//! JWT creation and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenType};
pub use decoder::{JwtDecoder, JwtError};
pub use encoder::{JwtEncoder, TokenPair};
