use omrs_types::{AppointmentStatus, DateError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Date(#[from] DateError),
    #[error("date arithmetic out of range: {0}")]
    DateOutOfRange(String),

    #[error("appointment status transition {from} -> {to} is not permitted")]
    TransitionBlocked {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
