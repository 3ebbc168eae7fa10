use anyhow::Result;

use crate::models::UserType;
use crate::routes::Route;

pub async fn routes_command() -> Result<()> {
    println!("🗺️  Routes");
    for route in Route::ALL {
        println!("   {:<22} {}", route.path(), route.title());
    }
    println!();
    println!("After login:");
    for user_type in UserType::ALL {
        println!("   {:<10} → {}", user_type.as_str(), Route::dashboard_for(user_type).path());
    }
    Ok(())
}
