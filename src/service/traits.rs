// Backend capability consumed by the page controllers. The simulated
// implementation serves sample data; a real backend implements the same trait.

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use super::ServiceError;
use crate::models::{BookingDraft, DailyStats, JobRequest, PorterAssignment, TrainInfo};

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Dispatch a one-time password to the given phone number
    async fn send_otp(&self, phone: &str) -> Result<(), ServiceError>;

    /// Check an entered code against the one dispatched to `phone`
    async fn verify_otp(&self, phone: &str, code: &str) -> Result<(), ServiceError>;

    /// Look up the train a PNR is booked on
    async fn fetch_train_info(&self, pnr: &str) -> Result<TrainInfo, ServiceError>;

    /// Request a porter for a completed booking draft
    async fn assign_porter(&self, booking: &BookingDraft) -> Result<PorterAssignment, ServiceError>;

    async fn list_job_requests(&self) -> Result<Vec<JobRequest>, ServiceError>;

    /// Claim a request for the signed-in porter
    async fn accept_job(&self, job_id: u32) -> Result<JobRequest, ServiceError>;

    async fn decline_job(&self, job_id: u32) -> Result<(), ServiceError>;

    /// Mark a job done; payment settles out of band
    async fn complete_job(&self, job_id: u32) -> Result<(), ServiceError>;

    async fn daily_stats(&self) -> Result<DailyStats, ServiceError>;
}
