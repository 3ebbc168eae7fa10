//! Login wizard: account type → details → OTP → dashboard redirect.

use statig::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

use super::errors::{FlowError, ValidationError};
use super::otp::OtpInput;
use super::settle;
use crate::config::FlowConfig;
use crate::models::{SessionDraft, UserType};
use crate::notify::Notifier;
use crate::routes::Route;
use crate::scope::{ScopeHandle, ViewScope};
use crate::service::BookingService;
use crate::telemetry::{create_flow_span, generate_correlation_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    SelectType(UserType),
    /// Continue with whatever type is already chosen
    Proceed,
    SetPhoneNumber(String),
    SetPnrNumber(String),
    OtpDispatched,
    Verified,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    SelectType,
    EnterDetails,
    VerifyOtp,
    /// Terminal: the caller redirects to the dashboard
    SignedIn,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoginStep::SelectType => "select-type",
            LoginStep::EnterDetails => "enter-details",
            LoginStep::VerifyOtp => "verify-otp",
            LoginStep::SignedIn => "signed-in",
        })
    }
}

/// Data the login machine mutates
#[derive(Debug, Default)]
pub struct LoginSession {
    pub draft: SessionDraft,
    pub signed_in_as: Option<UserType>,
}

#[derive(Debug, Default)]
pub struct LoginMachine;

#[state_machine(initial = "State::select_type()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl LoginMachine {
    #[state]
    fn select_type(context: &mut LoginSession, event: &LoginEvent) -> Outcome<State> {
        match event {
            LoginEvent::SelectType(user_type) => {
                context.draft.user_type = Some(*user_type);
                info!(user_type = %user_type, "Account type selected");
                Transition(State::enter_details())
            }
            LoginEvent::Proceed if context.draft.user_type.is_some() => {
                Transition(State::enter_details())
            }
            _ => Handled,
        }
    }

    #[state]
    fn enter_details(context: &mut LoginSession, event: &LoginEvent) -> Outcome<State> {
        match event {
            LoginEvent::SetPhoneNumber(phone) => {
                context.draft.phone_number = phone.clone();
                Handled
            }
            LoginEvent::SetPnrNumber(pnr) => {
                context.draft.pnr_number = pnr.clone();
                Handled
            }
            LoginEvent::OtpDispatched => match context.draft.validate() {
                Ok(user_type) => {
                    info!(user_type = %user_type, "OTP dispatched, awaiting code");
                    Transition(State::verify_otp())
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring OTP dispatch for incomplete details");
                    Handled
                }
            },
            LoginEvent::Back => {
                context.draft.user_type = None;
                info!("Back to account type selection");
                Transition(State::select_type())
            }
            _ => Handled,
        }
    }

    #[state]
    fn verify_otp(context: &mut LoginSession, event: &LoginEvent) -> Outcome<State> {
        match event {
            LoginEvent::Verified => {
                context.signed_in_as = context.draft.user_type;
                context.draft.clear();
                info!(user_type = ?context.signed_in_as, "Login successful");
                Transition(State::signed_in())
            }
            LoginEvent::Back => Transition(State::enter_details()),
            _ => Handled,
        }
    }

    #[state]
    fn signed_in(event: &LoginEvent) -> Outcome<State> {
        tracing::debug!(event = ?event, "Ignoring event after sign-in");
        Handled
    }
}

fn step_of(state: &State) -> LoginStep {
    match state {
        State::SelectType { .. } => LoginStep::SelectType,
        State::EnterDetails { .. } => LoginStep::EnterDetails,
        State::VerifyOtp { .. } => LoginStep::VerifyOtp,
        State::SignedIn { .. } => LoginStep::SignedIn,
    }
}

/// Controller for the `/login` page
pub struct LoginPage {
    machine: StateMachine<LoginMachine>,
    session: LoginSession,
    otp: OtpInput,
    settings: FlowConfig,
    service: Arc<dyn BookingService>,
    notifier: Notifier,
    scope: ViewScope,
    span: tracing::Span,
}

impl LoginPage {
    pub fn new(service: Arc<dyn BookingService>, notifier: Notifier, settings: &FlowConfig) -> Self {
        let correlation_id = generate_correlation_id();
        Self {
            machine: LoginMachine.state_machine(),
            session: LoginSession::default(),
            otp: OtpInput::new(settings.otp_length),
            settings: settings.clone(),
            service,
            notifier,
            scope: ViewScope::new(),
            span: create_flow_span("login", &correlation_id),
        }
    }

    pub fn step(&self) -> LoginStep {
        step_of(self.machine.state())
    }

    pub fn draft(&self) -> &SessionDraft {
        &self.session.draft
    }

    pub fn otp(&self) -> &OtpInput {
        &self.otp
    }

    /// Dashboard to redirect to once signed in
    pub fn redirect(&self) -> Option<Route> {
        self.session.signed_in_as.map(Route::dashboard_for)
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Pick an account type; moves straight on to the details step.
    pub fn select_user_type(&mut self, user_type: UserType) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::SelectType, "choose an account type")?;
        self.dispatch(LoginEvent::SelectType(user_type));
        Ok(())
    }

    /// Continue from the type picker without picking again.
    pub fn proceed(&mut self) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::SelectType, "continue")?;
        if self.session.draft.user_type.is_none() {
            return Err(ValidationError::NoUserType.into());
        }
        self.dispatch(LoginEvent::Proceed);
        Ok(())
    }

    pub fn set_phone_number(&mut self, phone: &str) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::EnterDetails, "edit the phone number")?;
        self.dispatch(LoginEvent::SetPhoneNumber(phone.to_string()));
        Ok(())
    }

    pub fn set_pnr_number(&mut self, pnr: &str) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::EnterDetails, "edit the PNR")?;
        self.dispatch(LoginEvent::SetPnrNumber(pnr.to_string()));
        Ok(())
    }

    /// Validate the details, dispatch the OTP, then move to code entry.
    pub async fn send_otp(&mut self) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::EnterDetails, "send an OTP")?;
        if let Err(error) = self.session.draft.validate() {
            self.notifier
                .warn("Missing Information", "Please fill in all required fields");
            return Err(error.into());
        }

        let phone = self.session.draft.phone_number.clone();
        let result = self
            .scope
            .run(self.service.send_otp(&phone))
            .instrument(self.span.clone())
            .await;
        settle(&self.notifier, result)?;

        self.dispatch(LoginEvent::OtpDispatched);
        self.otp = OtpInput::new(self.settings.otp_length);
        self.notifier
            .notify("OTP Sent", format!("Verification code sent to {phone}"));
        Ok(())
    }

    /// Dispatch a fresh code from the verification step and empty the cells.
    pub async fn resend_otp(&mut self) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::VerifyOtp, "resend the OTP")?;
        let phone = self.session.draft.phone_number.clone();
        let result = self
            .scope
            .run(self.service.send_otp(&phone))
            .instrument(self.span.clone())
            .await;
        settle(&self.notifier, result)?;

        self.otp.clear();
        self.notifier
            .notify("OTP Sent", format!("Verification code sent to {phone}"));
        Ok(())
    }

    /// Type into one OTP cell. Completing the code verifies it and returns
    /// the dashboard route.
    pub async fn type_otp(&mut self, index: usize, value: &str) -> Result<Option<Route>, FlowError> {
        self.ensure_step(LoginStep::VerifyOtp, "enter the OTP")?;
        match self.otp.input(index, value)? {
            Some(code) => self.verify(code).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn paste_otp(&mut self, text: &str) -> Result<Option<Route>, FlowError> {
        self.ensure_step(LoginStep::VerifyOtp, "paste the OTP")?;
        match self.otp.paste(text)? {
            Some(code) => self.verify(code).await.map(Some),
            None => Ok(None),
        }
    }

    pub fn otp_backspace(&mut self, index: usize) -> Result<(), FlowError> {
        self.ensure_step(LoginStep::VerifyOtp, "edit the OTP")?;
        self.otp.backspace(index)?;
        Ok(())
    }

    /// Step back one screen. A no-op on the account type picker.
    pub fn back(&mut self) -> LoginStep {
        self.dispatch(LoginEvent::Back)
    }

    /// Tear down the page; pending simulated calls are dropped.
    pub fn close(&self) {
        self.scope.teardown();
    }

    async fn verify(&mut self, code: String) -> Result<Route, FlowError> {
        let user_type = self.session.draft.validate()?;
        let phone = self.session.draft.phone_number.clone();

        self.otp.set_disabled(true);
        let result = self
            .scope
            .run(self.service.verify_otp(&phone, &code))
            .instrument(self.span.clone())
            .await;
        self.otp.set_disabled(false);
        if !matches!(result, Ok(Ok(()))) {
            self.otp.rearm();
        }
        settle(&self.notifier, result)?;

        self.dispatch(LoginEvent::Verified);
        self.notifier
            .notify("Login Successful", format!("Welcome back, {user_type}!"));
        Ok(Route::dashboard_for(user_type))
    }

    fn dispatch(&mut self, event: LoginEvent) -> LoginStep {
        self.machine.handle_with_context(&event, &mut self.session);
        self.step()
    }

    fn ensure_step(&self, expected: LoginStep, action: &'static str) -> Result<(), FlowError> {
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
