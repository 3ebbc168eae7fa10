// CoolieConnect Library - railway porter booking flows
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod flows;
pub mod models;
pub mod notify;
pub mod routes;
pub mod scope;
pub mod service;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, init_config, CoolieConnectConfig, FlowConfig, LatencyConfig};
pub use flows::{
    BookingStep, FlowError, JobPhase, LoginPage, LoginStep, OtpInput, PassengerDashboard,
    PorterDashboard, PorterView, ValidationError,
};
pub use models::{
    BookingDraft, DailyStats, DropPoint, JobRequest, PickupPoint, PorterAssignment,
    PorterProfile, SessionDraft, TrainInfo, UserType,
};
pub use notify::{Notification, NotificationVariant, Notifier};
pub use routes::Route;
pub use scope::{ScopeHandle, ViewScope};
pub use service::{BookingService, ServiceError, SimulatedBookingService};
pub use telemetry::{create_flow_span, generate_correlation_id, init_telemetry, shutdown_telemetry};
