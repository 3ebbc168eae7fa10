use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Job request #{0} does not exist")]
    UnknownJob(u32),
    #[error("OTP verification failed for {phone}")]
    OtpRejected { phone: String },
    #[error("Booking service unavailable: {0}")]
    Unavailable(String),
}
