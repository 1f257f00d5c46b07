mod cli;
mod client;
mod console;
mod error;
mod output;
mod state;

use std::io::{self, BufWriter};

use broker_api::{RecordStatus, TransactionKind};
use clap::Parser;
use cli::{Cli, Command};
use error::DeskError;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    // Shared cancellation token + signal handlers.
    let cancel = setup_signal_handlers();

    if let Err(e) = run(cli, cancel).await {
        tracing::error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<(), DeskError> {
    let (email, password) = credentials()?;

    match cli.command {
        Command::Console => console::run_console(&cli.api_url, &email, &password, cancel).await,

        Command::Users(args) => {
            let status = parse_filter::<RecordStatus>(args.status.as_deref())?;

            let session = client::create_session(&cli.api_url, &email, &password).await?;
            session.require_admin()?;
            let users = session.api.list_users().await?;
            let filtered = state::filter_users(&users, status);

            let mut writer = BufWriter::new(io::stdout().lock());
            output::print_users(&mut writer, &filtered, args.json)?;
            Ok(())
        }

        Command::Transactions(args) => {
            let status = parse_filter::<RecordStatus>(args.status.as_deref())?;
            let kind = parse_filter::<TransactionKind>(args.kind.as_deref())?;

            let session = client::create_session(&cli.api_url, &email, &password).await?;
            session.require_admin()?;
            let txs = session.api.list_transactions().await?;
            let filtered = state::filter_transactions(&txs, status, kind);

            let mut writer = BufWriter::new(io::stdout().lock());
            output::print_transactions(&mut writer, &filtered, args.json)?;
            Ok(())
        }

        // Filing a request needs a session but not the admin capability.
        Command::Deposit(args) => {
            let session = client::create_session(&cli.api_url, &email, &password).await?;
            let ack = session.api.request_deposit(args.amount).await?;
            let message = ack
                .message
                .unwrap_or_else(|| "deposit requested".to_string());
            info!(amount = args.amount, "deposit filed");
            println!("{message}");
            Ok(())
        }

        Command::Withdraw(args) => {
            let session = client::create_session(&cli.api_url, &email, &password).await?;
            let ack = session.api.request_withdrawal(args.amount).await?;
            let message = ack
                .message
                .unwrap_or_else(|| "withdrawal requested".to_string());
            info!(amount = args.amount, "withdrawal filed");
            println!("{message}");
            Ok(())
        }
    }
}

/// Operator credentials from the environment (or a .env file).
fn credentials() -> Result<(String, String), DeskError> {
    let email =
        std::env::var("DESK_EMAIL").map_err(|_| DeskError::MissingCredential("DESK_EMAIL"))?;
    let password = std::env::var("DESK_PASSWORD")
        .map_err(|_| DeskError::MissingCredential("DESK_PASSWORD"))?;
    Ok((email, password))
}

/// Parse an optional `--status` / `--kind` argument.
fn parse_filter<T: std::str::FromStr>(value: Option<&str>) -> Result<Option<T>, DeskError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| DeskError::InvalidFilter(v.to_string()))
        })
        .transpose()
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
