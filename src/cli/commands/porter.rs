use anyhow::{anyhow, Result};

use super::{teardown_on_ctrl_c, CommandContext};
use crate::flows::{FlowError, PorterDashboard, PorterView};
use crate::models::JobRequest;

#[derive(Default)]
pub struct PorterCommand {
    pub offline: bool,
    pub decline: Option<u32>,
    pub accept: Option<u32>,
    pub complete: bool,
}

impl PorterCommand {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        println!("🧑‍🔧 Coolie Dashboard");
        println!();

        let mut dashboard = PorterDashboard::open(ctx.service.clone(), ctx.notifier.clone())
            .await
            .map_err(|e| anyhow!("Failed to open dashboard: {e}"))?;
        let watcher = teardown_on_ctrl_c(dashboard.scope_handle());

        let outcome = self.drive(&mut dashboard, ctx).await;
        watcher.abort();
        ctx.flush_notifications();

        match outcome {
            Ok(()) => Ok(()),
            Err(FlowError::Cancelled) => Ok(()),
            Err(e) => Err(anyhow!("Dashboard action failed: {e}")),
        }
    }

    async fn drive(&self, dashboard: &mut PorterDashboard, ctx: &mut CommandContext) -> Result<(), FlowError> {
        print_stats(dashboard);

        if self.offline {
            dashboard.set_available(false);
        }
        if let Some(id) = self.decline {
            dashboard.decline(id).await?;
            ctx.flush_notifications();
        }
        if let Some(id) = self.accept {
            dashboard.accept(id).await?;
            ctx.flush_notifications();
        }
        print_view(dashboard);

        if self.complete {
            let job = dashboard.complete().await?;
            ctx.flush_notifications();
            println!();
            println!("🏁 Completed job #{} for {}", job.id, job.passenger_name);
            print_stats(dashboard);
            print_view(dashboard);
        }
        Ok(())
    }
}

fn print_stats(dashboard: &PorterDashboard) {
    let stats = dashboard.stats();
    println!("📊 Today's Summary");
    println!("   Jobs completed: {}", stats.jobs_completed);
    println!("   Total earnings: ₹{}", stats.total_earnings);
    println!("   Rating: {:.1}", stats.rating);
    println!("   Hours worked: {:.1}", stats.hours_worked);
    println!();
}

fn print_view(dashboard: &PorterDashboard) {
    match dashboard.view() {
        PorterView::ActiveJob(job) => {
            println!("🚚 Active Job");
            print_request(job);
        }
        PorterView::OfflineNotice => {
            println!("💤 You're offline. Turn on availability to receive job requests.");
        }
        PorterView::NoRequests => {
            println!("📭 No job requests right now");
            println!("   Stay online and you'll be notified when new requests arrive");
        }
        PorterView::Pending(requests) => {
            println!("📋 Job Requests ({})", requests.len());
            for request in requests {
                print_request(request);
            }
        }
    }
}

fn print_request(job: &JobRequest) {
    println!("   #{} {} (PNR: {})  ₹{}", job.id, job.passenger_name, job.pnr_suffix(), job.estimated_pay);
    println!("      {}  {}", job.train_name, job.platform);
    println!("      {} items  {}  {}", job.luggage_count, job.distance, job.time_posted());
    println!("      {} → {}", job.pickup_point, job.drop_point);
}
