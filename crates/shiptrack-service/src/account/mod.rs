//! Account registration, login, and password recovery.

pub mod service;

pub use service::{AccountService, RegisterRequest};
