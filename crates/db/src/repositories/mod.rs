//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod availability_repo;
pub mod event_repo;
pub mod notification_repo;
pub mod period_repo;
pub mod trip_repo;
pub mod user_repo;

pub use availability_repo::AvailabilityRepo;
pub use event_repo::EventRepo;
pub use notification_repo::NotificationRepo;
pub use period_repo::PeriodRepo;
pub use trip_repo::TripRepo;
pub use user_repo::UserRepo;
