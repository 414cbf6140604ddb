//! Domain logic for trip availability planning.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the event services and the HTTP server alike. Every
//! computation here is pure: callers read persisted state, hand it in, and
//! persist what comes back.

pub mod aggregation;
pub mod availability;
pub mod error;
pub mod generation;
pub mod notifications;
pub mod periods;
pub mod ranking;
pub mod retry;
pub mod trip_window;
pub mod types;
