// Page flows - statig state machines driven by page controllers
//
// Each page owns its machine, its data (passed to the machine as context),
// a ViewScope for simulated backend calls, and a Notifier handle.

pub mod booking;
pub mod errors;
pub mod jobs;
pub mod login;
pub mod otp;

pub use booking::{BookingStep, PassengerDashboard};
pub use errors::{FlowError, OtpInputError, ValidationError};
pub use jobs::{JobPhase, PorterDashboard, PorterView};
pub use login::{LoginPage, LoginStep};
pub use otp::{OtpInput, DEFAULT_OTP_LENGTH};

use crate::notify::Notifier;
use crate::service::ServiceError;

/// Unwrap the result of a scoped service call, surfacing backend failures as
/// a notification. Cancellation is returned silently; the page is gone.
pub(crate) fn settle<T>(
    notifier: &Notifier,
    result: Result<Result<T, ServiceError>, FlowError>,
) -> Result<T, FlowError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => {
            notifier.warn("Request Failed", error.to_string());
            Err(error.into())
        }
        Err(error) => Err(error),
    }
}
