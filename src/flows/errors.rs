use thiserror::Error;

use crate::service::ServiceError;

/// User-input problems. Each one is surfaced as a notification and leaves
/// the flow on its current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No account type selected")]
    NoUserType,
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid {expected}-digit PNR number (got {actual} characters)")]
    InvalidPnr { expected: usize, actual: usize },
    #[error("Please select pickup and drop points")]
    MissingPoints,
    #[error("OTP must be {expected} digits")]
    IncompleteOtp { expected: usize },
}

/// Rejected edits on the OTP cells; state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpInputError {
    #[error("Cell {index} is out of range for a {length}-digit code")]
    OutOfRange { index: usize, length: usize },
    #[error("Only one character per cell is accepted")]
    TooLong,
    #[error("'{0}' is not a digit")]
    NotADigit(char),
    #[error("OTP entry is disabled while verification is pending")]
    Disabled,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("OTP input rejected: {0}")]
    OtpInput(#[from] OtpInputError),
    #[error("Cannot {action} while on the {step} step")]
    InvalidAction { action: &'static str, step: String },
    #[error("View was torn down before the operation finished")]
    Cancelled,
    #[error("Job #{active} is still active")]
    JobAlreadyActive { active: u32 },
    #[error("No active job to complete")]
    NoActiveJob,
    #[error("Turn on availability to act on job requests")]
    Offline,
    #[error(transparent)]
    Service(#[from] ServiceError),
}
