use clap::{Parser, Subcommand};

use crate::models::{DropPoint, PickupPoint, UserType};

pub mod commands;

#[derive(Parser)]
#[command(name = "coolie-connect")]
#[command(about = "Book a railway porter, or work as one")]
#[command(long_about = "CoolieConnect drives the passenger and porter flows against a simulated \
                       booking service. Start with 'coolie-connect login' to sign in, 'coolie-connect book' \
                       to book a porter, or 'coolie-connect porter' to work through job requests.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with phone number and OTP, then print the dashboard route
    Login {
        /// Account type
        #[arg(long = "as", value_enum, help = "Account type: passenger or coolie")]
        user_type: UserType,
        /// Mobile number the OTP is sent to
        #[arg(long, help = "Mobile number, e.g. '+91 9876543210'")]
        phone: String,
        /// PNR number (required for passengers)
        #[arg(long, help = "PNR number of your booking (passengers only)")]
        pnr: Option<String>,
        /// Code to enter once the OTP is sent
        #[arg(long, default_value = "123456", help = "OTP to enter; any complete code is accepted")]
        otp: String,
    },
    /// Book a porter for a PNR
    Book {
        /// 10-character PNR number
        #[arg(long, help = "PNR number to look up")]
        pnr: String,
        /// Number of luggage items
        #[arg(long, default_value = "1", help = "Luggage items (minimum 1)")]
        luggage: u32,
        /// Where the porter picks you up
        #[arg(long, value_enum, help = "Pickup point")]
        pickup: PickupPoint,
        /// Where the porter drops your luggage
        #[arg(long = "drop", value_enum, help = "Drop point")]
        drop_point: DropPoint,
        /// Press the pay button on the confirmation screen
        #[arg(long, help = "Request payment after confirmation")]
        pay: bool,
    },
    /// Porter dashboard: list, accept, decline and complete job requests
    Porter {
        /// Go offline before acting
        #[arg(long, help = "Turn availability off")]
        offline: bool,
        /// Decline a request by id
        #[arg(long, help = "Job request id to decline")]
        decline: Option<u32>,
        /// Accept a request by id
        #[arg(long, help = "Job request id to accept")]
        accept: Option<u32>,
        /// Complete the accepted job
        #[arg(long, help = "Complete the active job after accepting")]
        complete: bool,
    },
    /// Print the in-app route table
    Routes,
}
