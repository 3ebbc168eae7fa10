// Fixed records served by the simulated booking service

use crate::models::{DailyStats, JobRequest, PorterProfile, TrainInfo};

pub fn job_requests() -> Vec<JobRequest> {
    vec![
        JobRequest {
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
        },
        JobRequest {
            id: 2,
            passenger_name: "Amit Kumar".to_string(),
            pnr: "0987654321".to_string(),
            train_name: "Shatabdi Express".to_string(),
            platform: "Platform 7".to_string(),
            luggage_count: 2,
            pickup_point: "Platform 7".to_string(),
            drop_point: "Exit Gate".to_string(),
            estimated_pay: 100,
            distance: "300m".to_string(),
            posted_minutes_ago: 5,
        },
    ]
}

pub fn train_info() -> TrainInfo {
    TrainInfo {
        train_number: "12345".to_string(),
        train_name: "Mumbai Express".to_string(),
        from: "New Delhi".to_string(),
        to: "Mumbai Central".to_string(),
        arrival_time: "14:30".to_string(),
        platform: "Platform 4".to_string(),
        coach: "S4".to_string(),
        seat: "45, 46".to_string(),
    }
}

pub fn assigned_porter() -> PorterProfile {
    PorterProfile {
        name: "Ramesh Kumar".to_string(),
        rating: 4.8,
        experience_years: 5,
        contact: "+91 98765 43210".to_string(),
    }
}

pub fn daily_stats() -> DailyStats {
    DailyStats {
        jobs_completed: 8,
        total_earnings: 1200,
        rating: 4.8,
        hours_worked: 6.5,
    }
}
