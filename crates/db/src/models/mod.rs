//! Row structs and DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching the
//! table row, plus the insert DTOs its repository accepts.

pub mod availability;
pub mod event;
pub mod notification;
pub mod period;
pub mod status;
pub mod trip;
