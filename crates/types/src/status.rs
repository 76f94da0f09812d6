use std::str::FromStr;

/// Errors that can occur when interpreting an appointment status value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// The input did not name one of the five appointment statuses
    #[error("unknown appointment status: {0:?}")]
    Unknown(String),
}

/// Lifecycle stage of a scheduled appointment.
///
/// The serialised form matches the strings used by the OpenMRS appointments REST
/// resource (`Scheduled`, `CheckedIn`, `Completed`, `Cancelled`, `Missed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AppointmentStatus {
    /// Booked and awaiting the patient.
    Scheduled,
    /// The patient has arrived.
    CheckedIn,
    /// The visit took place.
    Completed,
    /// The appointment was called off.
    Cancelled,
    /// The patient did not attend.
    Missed,
}

impl AppointmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Missed,
    ];

    /// Returns `true` for Completed, Cancelled and Missed.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::Missed
        )
    }

    /// Returns the canonical wire string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::CheckedIn => "CheckedIn",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Missed => "Missed",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = StatusError;

    /// Parses a status name.
    ///
    /// Matching ignores case and separators, so `CheckedIn`, `checked-in` and
    /// `CHECKED_IN` are all accepted. Anything else is rejected rather than mapped to
    /// a fallback status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalised.as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "checkedin" => Ok(AppointmentStatus::CheckedIn),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "missed" => Ok(AppointmentStatus::Missed),
            _ => Err(StatusError::Unknown(s.to_owned())),
        }
    }
}
