// In-app navigation targets

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::UserType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    PassengerDashboard,
    CoolieDashboard,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Login,
        Route::PassengerDashboard,
        Route::CoolieDashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::PassengerDashboard => "/passenger-dashboard",
            Route::CoolieDashboard => "/coolie-dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Route::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Where a successful login lands
    pub fn dashboard_for(user_type: UserType) -> Route {
        match user_type {
            UserType::Passenger => Route::PassengerDashboard,
            UserType::Porter => Route::CoolieDashboard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::PassengerDashboard => "Passenger Dashboard",
            Route::CoolieDashboard => "Coolie Dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
