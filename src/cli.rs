use clap::{Parser, Subcommand};

/// desk — back-office console for the brokerage platform API.
#[derive(Parser, Debug)]
#[command(name = "desk", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Base URL of the brokerage API server
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the approvals console TUI (requires an admin session)
    Console,

    /// Print the user collection
    Users(UsersArgs),

    /// Print the transaction collection
    Transactions(TransactionsArgs),

    /// File a deposit request for review
    Deposit(AmountArgs),

    /// File a withdrawal request for review
    Withdraw(AmountArgs),
}

/// Arguments for the `users` subcommand.
#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// Keep only records with this status (pending, approved, rejected)
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `transactions` subcommand.
#[derive(Parser, Debug)]
pub struct TransactionsArgs {
    /// Keep only records with this status (pending, approved, rejected)
    #[arg(long)]
    pub status: Option<String>,

    /// Keep only this kind (deposit, withdrawal)
    #[arg(long)]
    pub kind: Option<String>,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `deposit` and `withdraw` subcommands.
#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Amount to move, in account currency
    pub amount: f64,
}
