//! # OMRS Core
//!
//! Deterministic scheduling logic behind the appointments calendar.
//!
//! This crate contains pure operations only:
//! - Appointment status transition rules ([`transition`])
//! - Month-grid generation for calendar views ([`calendar`])
//! - Startup configuration ([`config`])
//!
//! **No API concerns**: REST calls, persistence and rendering belong to the callers.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod transition;

pub use calendar::{
    days_in_month, first_of_month, month_days, month_weeks, shift_month, weekday_headers,
    weekday_offset, CalendarCell,
};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use transition::{
    allowed_targets, can_transition, StatusTransition, TerminalSelfTransition, TransitionPolicy,
};

pub use omrs_types::{AppointmentStatus, CalendarDate};

use chrono::Weekday;

/// Scheduling operations bound to a resolved [`CoreConfig`].
///
/// Cheap to clone and immutable, so a single instance can be shared by every caller.
#[derive(Clone, Debug, Default)]
pub struct SchedulingService {
    config: CoreConfig,
}

impl SchedulingService {
    /// Creates a new instance of SchedulingService.
    pub fn new(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Whether `from -> to` is permitted under the configured policy.
    pub fn can_transition(&self, from: AppointmentStatus, to: AppointmentStatus) -> bool {
        self.config.transition_policy().permits(from, to)
    }

    /// Statuses reachable from `from` under the configured policy.
    pub fn allowed_targets(&self, from: AppointmentStatus) -> Vec<AppointmentStatus> {
        self.config.transition_policy().allowed_targets(from)
    }

    /// Checks a transition, returning [`CoreError::TransitionBlocked`] when it is not permitted.
    pub fn check_transition(&self, from: AppointmentStatus, to: AppointmentStatus) -> CoreResult<()> {
        self.config.transition_policy().check(from, to)
    }

    /// Month-grid cells for the month containing `reference`, using the configured week start.
    pub fn month_days(&self, reference: CalendarDate) -> CoreResult<Vec<CalendarCell>> {
        month_days(reference, self.config.first_day_of_week())
    }

    /// Month-grid rows for the month containing `reference`.
    pub fn month_weeks(&self, reference: CalendarDate) -> CoreResult<Vec<Vec<CalendarCell>>> {
        month_weeks(reference, self.config.first_day_of_week())
    }

    /// Column header order for the configured week start.
    pub fn weekday_headers(&self) -> [Weekday; 7] {
        weekday_headers(self.config.first_day_of_week())
    }
}
