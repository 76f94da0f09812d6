//! Validated domain primitives shared across the scheduling crates.
//!
//! Types here guarantee their invariants at construction time, so downstream code can
//! take them by value without re-checking:
//! - [`AppointmentStatus`] is the closed set of appointment lifecycle states
//! - [`CalendarDate`] is always a real calendar day

mod date;
mod status;

pub use date::{CalendarDate, DateError};
pub use status::{AppointmentStatus, StatusError};
