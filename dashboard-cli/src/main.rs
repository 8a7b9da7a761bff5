mod app;
mod client;
mod dashboard;
mod poller;
mod submitter;
mod warning;

use crate::{app::Field, client::FanClient, dashboard::Settings};
use clap::{Parser, Subcommand};
use fan_dashboard_protocol::Setpoint;
use log::{info, warn};
use std::time::Duration;

#[cfg(test)]
use {assert_cmd as _, predicates as _};

/// Monitor and control a fan controller over HTTP.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Base URL of the fan controller
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// HTTP request timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout: u64,

    /// Status poll interval in milliseconds
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// How long warnings stay visible in milliseconds
    #[arg(long, default_value_t = 3000)]
    warning_duration: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive dashboard (default)
    Dashboard,

    /// Print the current status
    Status,

    /// Poll the status and log every snapshot
    Watch,

    /// Request a new fan output, in percent (clamped to 0-100)
    Set {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Switch the fan on or off
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let client = FanClient::new(&cli.url, Duration::from_millis(cli.timeout))?;
    let poll_interval = Duration::from_millis(cli.interval);

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => {
            // No logger here, anything written to the terminal would corrupt the UI
            dashboard::run(
                client,
                Settings {
                    poll_interval,
                    warning_duration: Duration::from_millis(cli.warning_duration),
                },
            )
            .await?;
        }
        Command::Status => {
            init_logging();

            let status = client.status().await?;
            for (field, value) in app::Update::Status(status).values() {
                println!("{:<20} {}", field.to_string(), value);
            }
        }
        Command::Watch => {
            init_logging();
            watch(client, poll_interval).await;
        }
        Command::Set { value } => {
            init_logging();

            let clamped = Setpoint::parse(&value)?;
            if let Some(warning) = clamped.warning() {
                warn!("{warning}");
            }

            let response = client.set_fan_output(clamped.setpoint).await?;
            if let Some(message) = &response.message {
                info!("{message}");
            }
            println!(
                "{:<20} {}",
                Field::SetFanOutput.to_string(),
                response.set_fan_output_text()
            );
        }
        Command::Toggle => {
            init_logging();

            let response = client.toggle_fan().await?;
            if let Some(message) = &response.message {
                info!("{message}");
            }
            println!("{:<20} {}", Field::FanStatus.to_string(), response.fan_status);
        }
    }

    Ok(())
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

async fn watch(client: FanClient, interval: Duration) {
    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let (_exit_tx, exit_rx) = tokio::sync::watch::channel(false);

    tokio::spawn(poller::run(client, interval, tx, exit_rx));

    while let Some(update) = rx.recv().await {
        let line = update
            .values()
            .into_iter()
            .map(|(field, value)| format!("{field}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!("{line}");
    }
}
