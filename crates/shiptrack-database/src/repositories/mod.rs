//! Repository implementations for all ShipTrack entities.

pub mod notification;
pub mod shipment;
pub mod user;

pub use notification::NotificationRepository;
pub use shipment::ShipmentRepository;
pub use user::UserRepository;
