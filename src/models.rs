// Core data model shared by the login, porter and passenger flows

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flows::errors::ValidationError;

/// Account type chosen on the first login step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Books a porter for their luggage
    Passenger,
    /// Carries luggage for passengers
    #[serde(rename = "coolie")]
    #[value(name = "coolie", alias = "porter")]
    Porter,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Passenger, UserType::Porter];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Passenger => "passenger",
            UserType::Porter => "coolie",
        }
    }

    /// Card title shown by the account type picker
    pub fn title(&self) -> &'static str {
        match self {
            UserType::Passenger => "Passenger",
            UserType::Porter => "Coolie",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserType::Passenger => "Book a coolie for your luggage",
            UserType::Porter => "Earn by helping passengers",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress login details, discarded on back navigation or sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    pub user_type: Option<UserType>,
    pub phone_number: String,
    pub pnr_number: String,
}

impl SessionDraft {
    /// Check the fields required before an OTP can be dispatched.
    pub fn validate(&self) -> Result<UserType, ValidationError> {
        let user_type = self.user_type.ok_or(ValidationError::NoUserType)?;
        if self.phone_number.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if user_type == UserType::Passenger && self.pnr_number.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(user_type)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A passenger's request for a porter, as listed on the porter dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: u32,
    pub passenger_name: String,
    pub pnr: String,
    pub train_name: String,
    pub platform: String,
    pub luggage_count: u32,
    pub pickup_point: String,
    pub drop_point: String,
    pub estimated_pay: u32,
    pub distance: String,
    pub posted_minutes_ago: u32,
}

impl JobRequest {
    /// Last four characters of the PNR, the only part shown to porters
    pub fn pnr_suffix(&self) -> &str {
        let skip = self.pnr.chars().count().saturating_sub(4);
        match self.pnr.char_indices().nth(skip) {
            Some((idx, _)) => &self.pnr[idx..],
            None => &self.pnr,
        }
    }

    pub fn time_posted(&self) -> String {
        match self.posted_minutes_ago {
            0 => "just now".to_string(),
            1 => "1 min ago".to_string(),
            n => format!("{n} mins ago"),
        }
    }
}

/// Result of a PNR lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainInfo {
    pub train_number: String,
    pub train_name: String,
    pub from: String,
    pub to: String,
    pub arrival_time: String,
    pub platform: String,
    pub coach: String,
    pub seat: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PickupPoint {
    MainGate,
    Platform,
    Parking,
}

impl PickupPoint {
    pub const ALL: [PickupPoint; 3] = [PickupPoint::MainGate, PickupPoint::Platform, PickupPoint::Parking];

    pub fn label(&self, train: &TrainInfo) -> String {
        match self {
            PickupPoint::MainGate => "Main Station Gate".to_string(),
            PickupPoint::Platform => {
                let number = train.platform.chars().last().map(String::from).unwrap_or_default();
                format!("Platform {number}")
            }
            PickupPoint::Parking => "Parking Area".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DropPoint {
    Coach,
    ExitGate,
    TaxiStand,
}

impl DropPoint {
    pub const ALL: [DropPoint; 3] = [DropPoint::Coach, DropPoint::ExitGate, DropPoint::TaxiStand];

    pub fn label(&self, train: &TrainInfo) -> String {
        match self {
            DropPoint::Coach => format!("Coach {}", train.coach),
            DropPoint::ExitGate => "Exit Gate".to_string(),
            DropPoint::TaxiStand => "Taxi Stand".to_string(),
        }
    }
}

/// Everything needed to request a porter once both points are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub pnr: String,
    pub train: TrainInfo,
    pub luggage_count: u32,
    pub pickup: PickupPoint,
    pub drop: DropPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorterProfile {
    pub name: String,
    pub rating: f32,
    pub experience_years: u32,
    pub contact: String,
}

/// Confirmation record shown once a porter is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorterAssignment {
    pub porter: PorterProfile,
    pub amount_due: u32,
}

/// Porter's "Today's Summary" figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub jobs_completed: u32,
    pub total_earnings: u32,
    pub rating: f32,
    pub hours_worked: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger_draft() -> SessionDraft {
        SessionDraft {
            user_type: Some(UserType::Passenger),
            phone_number: "+91 9876543210".to_string(),
            pnr_number: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_draft_requires_phone_for_every_user_type() {
        for user_type in UserType::ALL {
            let draft = SessionDraft {
                user_type: Some(user_type),
                phone_number: String::new(),
                pnr_number: "1234567890".to_string(),
            };
            assert_eq!(draft.validate(), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn test_draft_requires_pnr_only_for_passengers() {
        let mut draft = passenger_draft();
        draft.pnr_number.clear();
        assert_eq!(draft.validate(), Err(ValidationError::MissingFields));

        draft.user_type = Some(UserType::Porter);
        assert_eq!(draft.validate(), Ok(UserType::Porter));
    }

    #[test]
    fn test_draft_only_checks_fields_are_non_empty() {
        let mut draft = passenger_draft();
        draft.phone_number = " ".to_string();
        draft.pnr_number = " ".to_string();
        assert_eq!(draft.validate(), Ok(UserType::Passenger));
    }

    #[test]
    fn test_draft_without_user_type_is_invalid() {
        let mut draft = passenger_draft();
        draft.user_type = None;
        assert_eq!(draft.validate(), Err(ValidationError::NoUserType));
    }

    #[test]
    fn test_pnr_suffix_and_time_posted() {
        let job = JobRequest {
            id: 1,
            passenger_name: "Priya Sharma".to_string(),
            pnr: "1234567890".to_string(),
            train_name: "Rajdhani Express".to_string(),
            platform: "Platform 2".to_string(),
            luggage_count: 3,
            pickup_point: "Main Station Gate".to_string(),
            drop_point: "Coach A1".to_string(),
            estimated_pay: 150,
            distance: "500m".to_string(),
            posted_minutes_ago: 2,
        };
        assert_eq!(job.pnr_suffix(), "7890");
        assert_eq!(job.time_posted(), "2 mins ago");

        let short = JobRequest { pnr: "12".to_string(), ..job };
        assert_eq!(short.pnr_suffix(), "12");
    }

    #[test]
    fn test_point_labels_follow_train() {
        let train = TrainInfo {
            train_number: "12345".to_string(),
            train_name: "Mumbai Express".to_string(),
            from: "New Delhi".to_string(),
            to: "Mumbai Central".to_string(),
            arrival_time: "14:30".to_string(),
            platform: "Platform 4".to_string(),
            coach: "S4".to_string(),
            seat: "45, 46".to_string(),
        };
        assert_eq!(PickupPoint::Platform.label(&train), "Platform 4");
        assert_eq!(DropPoint::Coach.label(&train), "Coach S4");
        assert_eq!(PickupPoint::MainGate.label(&train), "Main Station Gate");
    }

    #[test]
    fn test_user_type_serializes_product_terms() {
        assert_eq!(serde_json::to_string(&UserType::Porter).unwrap(), "\"coolie\"");
        assert_eq!(serde_json::to_string(&UserType::Passenger).unwrap(), "\"passenger\"");
    }
}
