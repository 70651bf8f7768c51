//! # shiptrack-service
//!
//! Business logic service layer for ShipTrack. Each service orchestrates
//! repositories and auth primitives to implement application-level use
//! cases; the shipment service owns the status state machine.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod mailer;
pub mod notification;
pub mod shipment;

pub use account::AccountService;
pub use context::CallerContext;
pub use mailer::{HttpMailer, Mailer};
pub use notification::NotificationService;
pub use shipment::ShipmentService;
