use anyhow::{anyhow, Result};

use super::{teardown_on_ctrl_c, CommandContext};
use crate::flows::{FlowError, LoginPage};
use crate::models::UserType;

pub struct LoginCommand {
    pub user_type: UserType,
    pub phone: String,
    pub pnr: Option<String>,
    pub otp: String,
}

impl LoginCommand {
    pub fn new(user_type: UserType, phone: String) -> Self {
        Self {
            user_type,
            phone,
            pnr: None,
            otp: "123456".to_string(),
        }
    }

    pub fn with_pnr(mut self, pnr: Option<String>) -> Self {
        self.pnr = pnr;
        self
    }

    pub fn with_otp(mut self, otp: String) -> Self {
        self.otp = otp;
        self
    }

    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        println!("🔑 {} Login", self.user_type.title());
        println!();

        let mut page = LoginPage::new(ctx.service.clone(), ctx.notifier.clone(), &ctx.config.flows);
        let watcher = teardown_on_ctrl_c(page.scope_handle());

        let outcome = self.drive(&mut page, ctx).await;
        watcher.abort();
        ctx.flush_notifications();

        match outcome {
            Ok(route) => {
                println!();
                println!("✅ Signed in as {}", self.user_type);
                println!("➡️  Redirecting to {} ({})", route.title(), route.path());
                Ok(())
            }
            Err(FlowError::Cancelled) => {
                println!("⛔ Login abandoned");
                Ok(())
            }
            Err(e) => Err(anyhow!("Login failed: {e}")),
        }
    }

    async fn drive(&self, page: &mut LoginPage, ctx: &mut CommandContext) -> Result<crate::routes::Route, FlowError> {
        page.select_user_type(self.user_type)?;
        page.set_phone_number(&self.phone)?;
        if let Some(pnr) = &self.pnr {
            page.set_pnr_number(pnr)?;
        }

        print!("📨 Sending OTP to {}... ", self.phone);
        std::io::Write::flush(&mut std::io::stdout()).ok();
        let sent = page.send_otp().await;
        println!("{}", if sent.is_ok() { "✅" } else { "❌" });
        ctx.flush_notifications();
        sent?;

        print!("🔐 Verifying code... ");
        std::io::Write::flush(&mut std::io::stdout()).ok();
        let verified = page.paste_otp(&self.otp).await;
        println!("{}", if matches!(verified, Ok(Some(_))) { "✅" } else { "❌" });

        match verified? {
            Some(route) => Ok(route),
            None => Err(crate::flows::ValidationError::IncompleteOtp {
                expected: page.otp().len(),
            }
            .into()),
        }
    }
}
