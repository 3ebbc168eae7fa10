// Booking backend seam: trait, errors, and the simulated implementation

pub mod errors;
pub mod sample_data;
pub mod simulated;
pub mod traits;

pub use errors::ServiceError;
pub use simulated::SimulatedBookingService;
pub use traits::BookingService;

#[cfg(any(test, feature = "testing"))]
pub use traits::MockBookingService;
