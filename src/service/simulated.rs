use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

use super::{sample_data, BookingService, ServiceError};
use crate::config::{CoolieConnectConfig, LatencyConfig};
use crate::flows::booking::estimated_cost;
use crate::models::{BookingDraft, DailyStats, JobRequest, PorterAssignment, TrainInfo};

/// Booking backend stand-in: fixed delays, fixed sample data, every call succeeds
/// except lookups of unknown job ids.
#[derive(Debug)]
pub struct SimulatedBookingService {
    latency: LatencyConfig,
    unit_rate: u32,
    requests: Vec<JobRequest>,
    stats: Mutex<DailyStats>,
}

impl Default for SimulatedBookingService {
    fn default() -> Self {
        Self::new(LatencyConfig::default(), crate::config::FlowConfig::default().unit_rate)
    }
}

impl SimulatedBookingService {
    pub fn new(latency: LatencyConfig, unit_rate: u32) -> Self {
        Self {
            latency,
            unit_rate,
            requests: sample_data::job_requests(),
            stats: Mutex::new(sample_data::daily_stats()),
        }
    }

    pub fn from_config(config: &CoolieConnectConfig) -> Self {
        Self::new(config.latency.clone(), config.flows.unit_rate)
    }

    /// Replace the sample request list, e.g. with an empty feed
    pub fn with_requests(mut self, requests: Vec<JobRequest>) -> Self {
        self.requests = requests;
        self
    }

    fn find_request(&self, job_id: u32) -> Result<&JobRequest, ServiceError> {
        self.requests
            .iter()
            .find(|request| request.id == job_id)
            .ok_or(ServiceError::UnknownJob(job_id))
    }

    async fn simulate_latency(operation: &str, millis: u64) {
        debug!(operation = operation, delay_ms = millis, "Simulating backend call");
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

#[async_trait]
impl BookingService for SimulatedBookingService {
    async fn send_otp(&self, phone: &str) -> Result<(), ServiceError> {
        Self::simulate_latency("send_otp", self.latency.otp_dispatch_ms).await;
        info!(phone = %phone, "OTP dispatched");
        Ok(())
    }

    async fn verify_otp(&self, phone: &str, _code: &str) -> Result<(), ServiceError> {
        // Any code is accepted
        Self::simulate_latency("verify_otp", self.latency.otp_verify_ms).await;
        info!(phone = %phone, "OTP verified");
        Ok(())
    }

    async fn fetch_train_info(&self, pnr: &str) -> Result<TrainInfo, ServiceError> {
        Self::simulate_latency("fetch_train_info", self.latency.pnr_lookup_ms).await;
        let train = sample_data::train_info();
        info!(pnr = %pnr, train = %train.train_name, "PNR lookup complete");
        Ok(train)
    }

    async fn assign_porter(&self, booking: &BookingDraft) -> Result<PorterAssignment, ServiceError> {
        let porter = sample_data::assigned_porter();
        info!(
            pnr = %booking.pnr,
            luggage_count = booking.luggage_count,
            porter = %porter.name,
            "Porter assigned"
        );
        Ok(PorterAssignment {
            porter,
            amount_due: estimated_cost(booking.luggage_count, self.unit_rate),
        })
    }

    async fn list_job_requests(&self) -> Result<Vec<JobRequest>, ServiceError> {
        Ok(self.requests.clone())
    }

    async fn accept_job(&self, job_id: u32) -> Result<JobRequest, ServiceError> {
        self.find_request(job_id).cloned()
    }

    async fn decline_job(&self, job_id: u32) -> Result<(), ServiceError> {
        // The request stays listed; there is no server-side state to update
        self.find_request(job_id).map(|_| ())
    }

    async fn complete_job(&self, job_id: u32) -> Result<(), ServiceError> {
        let pay = self.find_request(job_id)?.estimated_pay;
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        stats.jobs_completed += 1;
        stats.total_earnings += pay;
        info!(job_id = job_id, pay = pay, "Job completed, payment pending");
        Ok(())
    }

    async fn daily_stats(&self) -> Result<DailyStats, ServiceError> {
        Ok(self.stats.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_send_otp_takes_configured_delay() {
        let service = SimulatedBookingService::default();
        let started = tokio::time::Instant::now();
        service.send_otp("+91 9876543210").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_accepts_any_code() {
        let service = SimulatedBookingService::default();
        let started = tokio::time::Instant::now();
        tokio_test::assert_ok!(service.verify_otp("+91 9876543210", "000000").await);
        tokio_test::assert_ok!(service.verify_otp("+91 9876543210", "987654").await);
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_unknown_job_is_rejected() {
        let service = SimulatedBookingService::default();
        assert_eq!(service.accept_job(42).await, Err(ServiceError::UnknownJob(42)));
        assert_eq!(service.decline_job(42).await, Err(ServiceError::UnknownJob(42)));
    }

    #[tokio::test]
    async fn test_completion_updates_stats_but_keeps_request() {
        let service = SimulatedBookingService::default();
        service.complete_job(1).await.unwrap();

        let stats = service.daily_stats().await.unwrap();
        assert_eq!(stats.jobs_completed, 9);
        assert_eq!(stats.total_earnings, 1350);
        assert_eq!(service.list_job_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_amount_due_saturates_for_huge_luggage_counts() {
        let service = SimulatedBookingService::default();
        let booking = BookingDraft {
            pnr: "1234567890".to_string(),
            train: sample_data::train_info(),
            luggage_count: 100_000_000,
            pickup: crate::models::PickupPoint::MainGate,
            drop: crate::models::DropPoint::Coach,
        };

        let assignment = service.assign_porter(&booking).await.unwrap();
        assert_eq!(assignment.amount_due, u32::MAX);
        assert_eq!(assignment.amount_due, estimated_cost(booking.luggage_count, 50));
    }
}
