//! Notification inbox service.

pub mod service;

pub use service::NotificationService;
