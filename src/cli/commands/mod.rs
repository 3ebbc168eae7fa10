use anyhow::Result;
use clap::ValueEnum;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::CoolieConnectConfig;
use crate::models::{DropPoint, PickupPoint, UserType};
use crate::notify::{drain, Notification, Notifier};
use crate::scope::ScopeHandle;
use crate::service::{BookingService, SimulatedBookingService};

pub mod book;
pub mod login;
pub mod porter;
pub mod routes;

/// Service, notifier and settings shared by every command
pub struct CommandContext {
    pub config: CoolieConnectConfig,
    pub service: Arc<dyn BookingService>,
    pub notifier: Notifier,
    notifications: broadcast::Receiver<Notification>,
}

impl CommandContext {
    pub fn new(config: &CoolieConnectConfig) -> Self {
        let notifier = Notifier::default();
        let notifications = notifier.subscribe();
        Self {
            config: config.clone(),
            service: Arc::new(SimulatedBookingService::from_config(config)),
            notifier,
            notifications,
        }
    }

    /// Print every notification published since the last call
    pub fn flush_notifications(&mut self) {
        for notification in drain(&mut self.notifications) {
            let icon = if notification.is_destructive() { "⚠️ " } else { "🔔" };
            println!("{icon} {}: {}", notification.title, notification.description);
        }
    }
}

/// Tear the page down on Ctrl-C; pending simulated calls then resolve as cancelled.
pub fn teardown_on_ctrl_c(handle: ScopeHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                    return;
                }
                println!();
                println!("⛔ Interrupted, leaving the page");
                handle.teardown();
            }
            _ = handle.torn_down() => {}
        }
    })
}

pub async fn show_getting_started() -> Result<()> {
    println!("🚉 CoolieConnect - Railway Porter Booking");
    println!();
    println!("To get started:");
    println!("  🔑 coolie-connect login --as passenger --phone '+91 9876543210' --pnr 1234567890");
    println!("  🧳 coolie-connect book --pnr 1234567890 --luggage 2 --pickup main-gate --drop coach");
    println!("  🧑‍🔧 coolie-connect porter --accept 1 --complete");
    println!("  🗺️  coolie-connect routes");
    println!();
    println!("Account types:");
    for user_type in UserType::ALL {
        println!("  {:<10} {}", user_type.as_str(), user_type.description());
    }
    println!("Pickup points: {}", option_names(PickupPoint::ALL));
    println!("Drop points:   {}", option_names(DropPoint::ALL));
    println!();
    println!("💡 All backend calls are simulated; any 6-digit OTP is accepted.");
    Ok(())
}

/// CLI spellings of a value enum's variants, comma separated
fn option_names<T: ValueEnum>(options: impl IntoIterator<Item = T>) -> String {
    options
        .into_iter()
        .filter_map(|option| option.to_possible_value())
        .map(|value| value.get_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
