use thiserror::Error;

#[derive(Debug, Error)]
pub enum VestingError {
    #[error("invalid vesting schedule: {0}")]
    InvalidSchedule(String),

    #[error("vesting registry lock poisoned")]
    Poisoned,
}
