//! Passenger booking wizard: PNR → booking details → porter confirmation.

use statig::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::{info, Instrument};

use super::errors::{FlowError, ValidationError};
use super::settle;
use crate::config::FlowConfig;
use crate::models::{BookingDraft, DropPoint, PickupPoint, PorterAssignment, TrainInfo};
use crate::notify::Notifier;
use crate::scope::{ScopeHandle, ViewScope};
use crate::service::BookingService;
use crate::telemetry::{create_flow_span, generate_correlation_id};

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    TrainFound { pnr: String, train: TrainInfo },
    IncrementLuggage,
    DecrementLuggage,
    SelectPickup(PickupPoint),
    SelectDrop(DropPoint),
    PorterAssigned(PorterAssignment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Pnr,
    Details,
    Confirmation,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStep::Pnr => "pnr",
            BookingStep::Details => "details",
            BookingStep::Confirmation => "confirmation",
        })
    }
}

#[derive(Debug)]
pub struct BookingSession {
    pub pnr: String,
    pub train: Option<TrainInfo>,
    pub luggage_count: u32,
    pub pickup: Option<PickupPoint>,
    pub drop: Option<DropPoint>,
    pub assignment: Option<PorterAssignment>,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self {
            pnr: String::new(),
            train: None,
            luggage_count: 1,
            pickup: None,
            drop: None,
            assignment: None,
        }
    }
}

impl BookingSession {
    /// The draft is only available once a train is known and both points are set
    pub fn draft(&self) -> Option<BookingDraft> {
        Some(BookingDraft {
            pnr: self.pnr.clone(),
            train: self.train.clone()?,
            luggage_count: self.luggage_count,
            pickup: self.pickup?,
            drop: self.drop?,
        })
    }
}

#[derive(Debug, Default)]
pub struct BookingMachine;

#[state_machine(initial = "State::pnr()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl BookingMachine {
    #[state]
    fn pnr(context: &mut BookingSession, event: &BookingEvent) -> Outcome<State> {
        match event {
            BookingEvent::TrainFound { pnr, train } => {
                context.pnr = pnr.clone();
                context.train = Some(train.clone());
                info!(pnr = %pnr, train = %train.train_name, "Train details loaded");
                Transition(State::details())
            }
            _ => Handled,
        }
    }

    #[state]
    fn details(context: &mut BookingSession, event: &BookingEvent) -> Outcome<State> {
        match event {
            BookingEvent::IncrementLuggage => {
                context.luggage_count = context.luggage_count.saturating_add(1);
                Handled
            }
            BookingEvent::DecrementLuggage => {
                context.luggage_count = context.luggage_count.saturating_sub(1).max(1);
                Handled
            }
            BookingEvent::SelectPickup(point) => {
                context.pickup = Some(*point);
                Handled
            }
            BookingEvent::SelectDrop(point) => {
                context.drop = Some(*point);
                Handled
            }
            BookingEvent::PorterAssigned(assignment) if context.draft().is_some() => {
                info!(
                    porter = %assignment.porter.name,
                    amount_due = assignment.amount_due,
                    "Porter booked"
                );
                context.assignment = Some(assignment.clone());
                Transition(State::confirmation())
            }
            _ => Handled,
        }
    }

    #[state]
    fn confirmation(event: &BookingEvent) -> Outcome<State> {
        tracing::debug!(event = ?event, "Booking already confirmed");
        Handled
    }
}

fn step_of(state: &State) -> BookingStep {
    match state {
        State::Pnr { .. } => BookingStep::Pnr,
        State::Details { .. } => BookingStep::Details,
        State::Confirmation { .. } => BookingStep::Confirmation,
    }
}

/// Controller for the `/passenger-dashboard` page
pub struct PassengerDashboard {
    machine: StateMachine<BookingMachine>,
    session: BookingSession,
    pnr_input: String,
    settings: FlowConfig,
    service: Arc<dyn BookingService>,
    notifier: Notifier,
    scope: ViewScope,
    span: tracing::Span,
}

impl PassengerDashboard {
    pub fn new(service: Arc<dyn BookingService>, notifier: Notifier, settings: &FlowConfig) -> Self {
        let correlation_id = generate_correlation_id();
        Self {
            machine: BookingMachine.state_machine(),
            session: BookingSession::default(),
            pnr_input: String::new(),
            settings: settings.clone(),
            service,
            notifier,
            scope: ViewScope::new(),
            span: create_flow_span("passenger_booking", &correlation_id),
        }
    }

    pub fn step(&self) -> BookingStep {
        step_of(self.machine.state())
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    pub fn train(&self) -> Option<&TrainInfo> {
        self.session.train.as_ref()
    }

    pub fn luggage_count(&self) -> u32 {
        self.session.luggage_count
    }

    pub fn assignment(&self) -> Option<&PorterAssignment> {
        self.session.assignment.as_ref()
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn set_pnr(&mut self, pnr: &str) -> Result<(), FlowError> {
        self.ensure_step(BookingStep::Pnr, "edit the PNR")?;
        self.pnr_input = pnr.to_string();
        Ok(())
    }

    /// Look up the train for the entered PNR. Only the length is checked.
    pub async fn submit_pnr(&mut self) -> Result<&TrainInfo, FlowError> {
        self.ensure_step(BookingStep::Pnr, "look up a PNR")?;
        let actual = self.pnr_input.chars().count();
        if actual != self.settings.pnr_length {
            self.notifier.warn(
                "Invalid PNR",
                format!("Please enter a valid {}-digit PNR number", self.settings.pnr_length),
            );
            return Err(ValidationError::InvalidPnr {
                expected: self.settings.pnr_length,
                actual,
            }
            .into());
        }

        let pnr = self.pnr_input.clone();
        let result = self
            .scope
            .run(self.service.fetch_train_info(&pnr))
            .instrument(self.span.clone())
            .await;
        let train = settle(&self.notifier, result)?;

        self.dispatch(BookingEvent::TrainFound { pnr, train });
        self.session
            .train
            .as_ref()
            .ok_or(FlowError::InvalidAction {
                action: "load train details",
                step: self.step().to_string(),
            })
    }

    pub fn increment_luggage(&mut self) -> Result<u32, FlowError> {
        self.ensure_step(BookingStep::Details, "change the luggage count")?;
        self.dispatch(BookingEvent::IncrementLuggage);
        Ok(self.session.luggage_count)
    }

    /// Never goes below one item.
    pub fn decrement_luggage(&mut self) -> Result<u32, FlowError> {
        self.ensure_step(BookingStep::Details, "change the luggage count")?;
        self.dispatch(BookingEvent::DecrementLuggage);
        Ok(self.session.luggage_count)
    }

    pub fn select_pickup(&mut self, point: PickupPoint) -> Result<(), FlowError> {
        self.ensure_step(BookingStep::Details, "choose a pickup point")?;
        self.dispatch(BookingEvent::SelectPickup(point));
        Ok(())
    }

    pub fn select_drop(&mut self, point: DropPoint) -> Result<(), FlowError> {
        self.ensure_step(BookingStep::Details, "choose a drop point")?;
        self.dispatch(BookingEvent::SelectDrop(point));
        Ok(())
    }

    /// Whether the book action is enabled
    pub fn can_book(&self) -> bool {
        self.step() == BookingStep::Details && self.session.draft().is_some()
    }

    pub fn estimated_cost(&self) -> u32 {
        estimated_cost(self.session.luggage_count, self.settings.unit_rate)
    }

    pub async fn book(&mut self) -> Result<&PorterAssignment, FlowError> {
        self.ensure_step(BookingStep::Details, "book a porter")?;
        let Some(draft) = self.session.draft() else {
            self.notifier
                .warn("Missing Information", "Please select pickup and drop points");
            return Err(ValidationError::MissingPoints.into());
        };

        let result = self
            .scope
            .run(self.service.assign_porter(&draft))
            .instrument(self.span.clone())
            .await;
        let assignment = settle(&self.notifier, result)?;

        self.dispatch(BookingEvent::PorterAssigned(assignment));
        self.notifier.notify(
            "Coolie Booked Successfully!",
            "Your coolie will arrive at the pickup point shortly",
        );
        self.session.assignment.as_ref().ok_or(FlowError::InvalidAction {
            action: "confirm the booking",
            step: self.step().to_string(),
        })
    }

    /// Amount the pay button shows. No transaction takes place.
    pub fn pay(&self) -> Result<u32, FlowError> {
        self.ensure_step(BookingStep::Confirmation, "pay")?;
        let amount = self.estimated_cost();
        info!(amount = amount, "Payment requested");
        Ok(amount)
    }

    pub fn close(&self) {
        self.scope.teardown();
    }

    fn dispatch(&mut self, event: BookingEvent) -> BookingStep {
        self.machine.handle_with_context(&event, &mut self.session);
        self.step()
    }

    fn ensure_step(&self, expected: BookingStep, action: &'static str) -> Result<(), FlowError> {
        let step = self.step();
        if step != expected {
            return Err(FlowError::InvalidAction {
                action,
                step: step.to_string(),
            });
        }
        Ok(())
    }
}

/// Linear pricing: every item costs the same
pub fn estimated_cost(luggage_count: u32, unit_rate: u32) -> u32 {
    luggage_count.saturating_mul(unit_rate)
}
