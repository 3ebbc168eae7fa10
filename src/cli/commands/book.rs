use anyhow::{anyhow, Result};

use super::{teardown_on_ctrl_c, CommandContext};
use crate::flows::{FlowError, PassengerDashboard};
use crate::models::{DropPoint, PickupPoint};

pub struct BookCommand {
    pub pnr: String,
    pub luggage: u32,
    pub pickup: PickupPoint,
    pub drop: DropPoint,
    pub pay: bool,
}

impl BookCommand {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        println!("🧳 Passenger Dashboard");
        println!();

        let mut page = PassengerDashboard::new(ctx.service.clone(), ctx.notifier.clone(), &ctx.config.flows);
        let watcher = teardown_on_ctrl_c(page.scope_handle());

        let outcome = self.drive(&mut page, ctx).await;
        watcher.abort();
        ctx.flush_notifications();

        match outcome {
            Ok(()) => Ok(()),
            Err(FlowError::Cancelled) => {
                println!("⛔ Booking abandoned");
                Ok(())
            }
            Err(e) => Err(anyhow!("Booking failed: {e}")),
        }
    }

    async fn drive(&self, page: &mut PassengerDashboard, ctx: &mut CommandContext) -> Result<(), FlowError> {
        page.set_pnr(&self.pnr)?;
        print!("🚆 Fetching train details for PNR {}... ", self.pnr);
        std::io::Write::flush(&mut std::io::stdout()).ok();
        let lookup = page.submit_pnr().await.cloned();
        println!("{}", if lookup.is_ok() { "✅" } else { "❌" });
        ctx.flush_notifications();
        let train = lookup?;

        println!();
        println!("🚆 {} {}", train.train_number, train.train_name);
        println!("   {} → {}", train.from, train.to);
        println!("   Arrival: {}  {}  Coach {}  Seat {}", train.arrival_time, train.platform, train.coach, train.seat);

        for _ in 1..self.luggage {
            page.increment_luggage()?;
        }
        page.select_pickup(self.pickup)?;
        page.select_drop(self.drop)?;

        println!();
        println!("📦 Luggage: {} item(s)", page.luggage_count());
        println!("📍 Pickup: {}", self.pickup.label(&train));
        println!("🎯 Drop: {}", self.drop.label(&train));
        println!("💰 Estimated cost: ₹{}", page.estimated_cost());

        let assignment = page.book().await?.clone();
        ctx.flush_notifications();

        println!();
        println!("✅ Coolie Assigned!");
        println!("   Name: {}", assignment.porter.name);
        println!("   Rating: {:.1} ⭐", assignment.porter.rating);
        println!("   Experience: {} years", assignment.porter.experience_years);
        println!("   Contact: {}", assignment.porter.contact);

        if self.pay {
            let amount = page.pay()?;
            println!();
            println!("💳 Pay ₹{amount} (no transaction is made)");
        }
        Ok(())
    }
}
