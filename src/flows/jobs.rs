//! Porter job lifecycle: availability toggle, pending requests, one active job.

use statig::prelude::*;
use std::sync::Arc;
use tracing::{info, Instrument};

use super::errors::FlowError;
use super::settle;
use crate::models::{DailyStats, JobRequest};
use crate::notify::Notifier;
use crate::scope::{ScopeHandle, ViewScope};
use crate::service::BookingService;
use crate::telemetry::{create_flow_span, generate_correlation_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    SetAvailability(bool),
    Accept(JobRequest),
    Complete,
}

/// Dashboard phase derived from availability and the active job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Offline,
    OnlinePending,
    /// Also reported while offline: an active job outranks availability
    OnlineActive,
}

/// What the job section of the dashboard shows, in render priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PorterView<'a> {
    ActiveJob(&'a JobRequest),
    OfflineNotice,
    NoRequests,
    Pending(&'a [JobRequest]),
}

#[derive(Debug)]
pub struct PorterSession {
    pub online: bool,
    pub active_job: Option<JobRequest>,
}

impl Default for PorterSession {
    fn default() -> Self {
        Self {
            online: true,
            active_job: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct JobMachine;

#[state_machine(initial = "State::pending()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl JobMachine {
    #[state]
    fn pending(context: &mut PorterSession, event: &JobEvent) -> Outcome<State> {
        match event {
            JobEvent::SetAvailability(online) => {
                context.online = *online;
                info!(online = online, "Availability changed");
                Handled
            }
            JobEvent::Accept(job) if context.online => {
                info!(
                    job_id = job.id,
                    passenger = %job.passenger_name,
                    "Job accepted"
                );
                context.active_job = Some(job.clone());
                Transition(State::active())
            }
            _ => Handled,
        }
    }

    #[state]
    fn active(context: &mut PorterSession, event: &JobEvent) -> Outcome<State> {
        match event {
            // The active job survives going offline
            JobEvent::SetAvailability(online) => {
                context.online = *online;
                info!(online = online, "Availability changed during active job");
                Handled
            }
            JobEvent::Complete => {
                let completed = context.active_job.take();
                info!(job_id = ?completed.map(|job| job.id), "Job completed");
                Transition(State::pending())
            }
            JobEvent::Accept(job) => {
                tracing::warn!(job_id = job.id, "Ignoring accept while a job is active");
                Handled
            }
        }
    }
}

/// Controller for the `/coolie-dashboard` page
pub struct PorterDashboard {
    machine: StateMachine<JobMachine>,
    session: PorterSession,
    requests: Vec<JobRequest>,
    stats: DailyStats,
    service: Arc<dyn BookingService>,
    notifier: Notifier,
    scope: ViewScope,
    span: tracing::Span,
}

impl PorterDashboard {
    /// Load the request feed and today's stats; starts online.
    pub async fn open(service: Arc<dyn BookingService>, notifier: Notifier) -> Result<Self, FlowError> {
        let correlation_id = generate_correlation_id();
        let span = create_flow_span("porter_dashboard", &correlation_id);
        let requests = settle(
            &notifier,
            Ok(service.list_job_requests().instrument(span.clone()).await),
        )?;
        let stats = settle(&notifier, Ok(service.daily_stats().instrument(span.clone()).await))?;
        info!(requests = requests.len(), "Porter dashboard opened");

        Ok(Self {
            machine: JobMachine.state_machine(),
            session: PorterSession::default(),
            requests,
            stats,
            service,
            notifier,
            scope: ViewScope::new(),
            span,
        })
    }

    pub fn is_online(&self) -> bool {
        self.session.online
    }

    pub fn active_job(&self) -> Option<&JobRequest> {
        self.session.active_job.as_ref()
    }

    pub fn requests(&self) -> &[JobRequest] {
        &self.requests
    }

    pub fn stats(&self) -> &DailyStats {
        &self.stats
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn phase(&self) -> JobPhase {
        match (self.session.active_job.is_some(), self.session.online) {
            (true, _) => JobPhase::OnlineActive,
            (false, true) => JobPhase::OnlinePending,
            (false, false) => JobPhase::Offline,
        }
    }

    pub fn view(&self) -> PorterView<'_> {
        if let Some(job) = &self.session.active_job {
            return PorterView::ActiveJob(job);
        }
        if !self.session.online {
            return PorterView::OfflineNotice;
        }
        if self.requests.is_empty() {
            return PorterView::NoRequests;
        }
        PorterView::Pending(&self.requests)
    }

    pub fn set_available(&mut self, online: bool) {
        self.machine
            .handle_with_context(&JobEvent::SetAvailability(online), &mut self.session);
    }

    pub async fn accept(&mut self, job_id: u32) -> Result<&JobRequest, FlowError> {
        self.ensure_can_act()?;
        let result = self
            .scope
            .run(self.service.accept_job(job_id))
            .instrument(self.span.clone())
            .await;
        let job = settle(&self.notifier, result)?;

        let passenger = job.passenger_name.clone();
        self.machine
            .handle_with_context(&JobEvent::Accept(job), &mut self.session);
        self.notifier
            .notify("Job Accepted", format!("You accepted {passenger}'s request"));
        self.session.active_job.as_ref().ok_or(FlowError::NoActiveJob)
    }

    /// Declining only reports back; the request stays listed.
    pub async fn decline(&mut self, job_id: u32) -> Result<(), FlowError> {
        self.ensure_can_act()?;
        let result = self
            .scope
            .run(self.service.decline_job(job_id))
            .instrument(self.span.clone())
            .await;
        settle(&self.notifier, result)?;

        info!(job_id = job_id, "Job declined");
        self.notifier
            .warn("Job Declined", "The request has been declined");
        Ok(())
    }

    pub async fn complete(&mut self) -> Result<JobRequest, FlowError> {
        let job = self.session.active_job.clone().ok_or(FlowError::NoActiveJob)?;
        let result = self
            .scope
            .run(self.service.complete_job(job.id))
            .instrument(self.span.clone())
            .await;
        settle(&self.notifier, result)?;

        self.machine
            .handle_with_context(&JobEvent::Complete, &mut self.session);
        self.notifier
            .notify("Job Completed", "Payment will be processed shortly");
        self.refresh_stats().await?;
        Ok(job)
    }

    pub async fn refresh_stats(&mut self) -> Result<&DailyStats, FlowError> {
        let result = self
            .scope
            .run(self.service.daily_stats())
            .instrument(self.span.clone())
            .await;
        self.stats = settle(&self.notifier, result)?;
        Ok(&self.stats)
    }

    pub fn close(&self) {
        self.scope.teardown();
    }

    fn ensure_can_act(&self) -> Result<(), FlowError> {
        if let Some(active) = &self.session.active_job {
            return Err(FlowError::JobAlreadyActive { active: active.id });
        }
        if !self.session.online {
            return Err(FlowError::Offline);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{sample_data, MockBookingService, ServiceError};

    fn machine_with_job() -> (StateMachine<JobMachine>, PorterSession) {
        let mut machine = JobMachine.state_machine();
        let mut session = PorterSession::default();
        let job = sample_data::job_requests().remove(0);
        machine.handle_with_context(&JobEvent::Accept(job), &mut session);
        (machine, session)
    }

    #[test]
    fn test_second_accept_is_ignored_by_machine() {
        let (mut machine, mut session) = machine_with_job();
        let other = sample_data::job_requests().remove(1);
        machine.handle_with_context(&JobEvent::Accept(other), &mut session);
        assert_eq!(session.active_job.as_ref().map(|job| job.id), Some(1));
        assert!(matches!(machine.state(), State::Active { .. }));
    }

    #[test]
    fn test_offline_porter_cannot_accept() {
        let mut machine = JobMachine.state_machine();
        let mut session = PorterSession::default();
        machine.handle_with_context(&JobEvent::SetAvailability(false), &mut session);
        let job = sample_data::job_requests().remove(0);
        machine.handle_with_context(&JobEvent::Accept(job), &mut session);
        assert!(session.active_job.is_none());
        assert!(matches!(machine.state(), State::Pending { .. }));
    }

    #[test]
    fn test_going_offline_keeps_active_job() {
        let (mut machine, mut session) = machine_with_job();
        machine.handle_with_context(&JobEvent::SetAvailability(false), &mut session);
        assert!(session.active_job.is_some());
        assert!(!session.online);
    }

    #[tokio::test]
    async fn test_failed_accept_leaves_dashboard_pending() {
        let mut service = MockBookingService::new();
        service
            .expect_list_job_requests()
            .returning(|| Ok(sample_data::job_requests()));
        service
            .expect_daily_stats()
            .returning(|| Ok(sample_data::daily_stats()));
        service
            .expect_accept_job()
            .returning(|id| Err(ServiceError::UnknownJob(id)));

        let notifier = Notifier::default();
        let mut dashboard = PorterDashboard::open(Arc::new(service), notifier).await.unwrap();
        let result = dashboard.accept(9).await;

        assert!(matches!(result, Err(FlowError::Service(ServiceError::UnknownJob(9)))));
        assert_eq!(dashboard.phase(), JobPhase::OnlinePending);
        assert!(matches!(dashboard.view(), PorterView::Pending(requests) if requests.len() == 2));
    }
}
