//! Outbound mail delivery.

pub mod client;

pub use client::{HttpMailer, Mailer};
