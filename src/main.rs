use anyhow::Result;
use clap::Parser;

use coolie_connect::cli::commands::{
    book::BookCommand, login::LoginCommand, porter::PorterCommand, routes::routes_command,
    show_getting_started, CommandContext,
};
use coolie_connect::cli::{Cli, Commands};
use coolie_connect::{config, init_config, init_telemetry, shutdown_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config()?;
    init_telemetry(&config.observability)?;
    init_config()?;

    let result = tokio::runtime::Runtime::new()?.block_on(async {
        let mut ctx = CommandContext::new(config);
        match cli.command {
            // Default behavior: no subcommand - explain how to get started
            None => show_getting_started().await,
            Some(Commands::Login {
                user_type,
                phone,
                pnr,
                otp,
            }) => {
                LoginCommand::new(user_type, phone)
                    .with_pnr(pnr)
                    .with_otp(otp)
                    .execute(&mut ctx)
                    .await
            }
            Some(Commands::Book {
                pnr,
                luggage,
                pickup,
                drop_point,
                pay,
            }) => {
                BookCommand {
                    pnr,
                    luggage,
                    pickup,
                    drop: drop_point,
                    pay,
                }
                .execute(&mut ctx)
                .await
            }
            Some(Commands::Porter {
                offline,
                decline,
                accept,
                complete,
            }) => {
                PorterCommand {
                    offline,
                    decline,
                    accept,
                    complete,
                }
                .execute(&mut ctx)
                .await
            }
            Some(Commands::Routes) => routes_command().await,
        }
    });

    shutdown_telemetry();
    result
}
