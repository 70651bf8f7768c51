//! # shiptrack-api
//!
//! HTTP API layer for ShipTrack built on Axum.
//!
//! Provides all REST endpoints, the cookie-based auth middleware and
//! extractor, DTOs, CORS, and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
