use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use otp_mail_node::config::{NodeConfig, TelemetryConfig};
use otp_mail_node::i18n::Locale;
use otp_mail_node::identity::InMemoryIdentityStore;
use otp_mail_node::{telemetry, DeliveryPipeline, Outcome, SessionState};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Operator tool for the OTP mail node
#[derive(Parser)]
#[command(name = "otp-mail-node", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deliver a passcode once using the configuration from the environment
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Passcode to deliver
        #[arg(long)]
        otp: String,
        /// Locale for the subject and passcode label
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init(&TelemetryConfig::from_env());

    let cli = Cli::parse();

    let config = NodeConfig::from_env()?;
    config.validate().context("Invalid node configuration")?;

    match cli.command {
        Command::Send { to, otp, locale } => {
            info!(mode = %config.content_mode, "Sending one time passcode");

            // The recipient is given, so no identity lookup takes place
            let pipeline =
                DeliveryPipeline::with_defaults(config, Arc::new(InMemoryIdentityStore::new()))?;
            let mut state = SessionState::default()
                .with_email_address(to)
                .with_one_time_password(otp);

            match pipeline.process(&mut state, &Locale::new(&locale)).await {
                Outcome::Success => {
                    println!("sent");
                    Ok(())
                }
                Outcome::Failure(failure) => {
                    anyhow::bail!(
                        "{} ({}): {}",
                        failure.message,
                        failure.kind,
                        failure.cause.unwrap_or_default()
                    )
                }
            }
        }
    }
}
