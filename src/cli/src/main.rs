//! Command-line tool for the ERC20 token ledger.

use anyhow::Result;
use cli::commands::{allowance, approve, balance, events, info, init, transfer, transfer_from};
use cli::config::CliConfig;
use colored::Colorize;
use ledger::types::{format_address, parse_amount};
use ledger::LedgerEvent;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the token CLI.
#[derive(Debug, StructOpt)]
#[structopt(name = "token", about = "Fixed-supply ERC20 token ledger")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the ledger file
    #[structopt(short, long, parse(from_os_str))]
    state: Option<PathBuf>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the token CLI.
///
/// Accounts are `0x`-prefixed hex addresses or labels such as `alice`.
#[derive(Debug, StructOpt)]
enum Command {
    /// Create a new ledger crediting the whole supply to the creator
    #[structopt(name = "init")]
    Init {
        /// Account receiving the total supply
        #[structopt(long)]
        creator: String,

        /// Token name
        #[structopt(long)]
        name: Option<String>,

        /// Token symbol
        #[structopt(long)]
        symbol: Option<String>,

        /// Display precision
        #[structopt(long)]
        decimals: Option<u8>,

        /// Fixed total supply
        #[structopt(long)]
        supply: Option<String>,
    },

    /// Show token metadata and supply
    #[structopt(name = "info")]
    Info,

    /// Get the balance of an account
    #[structopt(name = "balance")]
    Balance {
        /// Account to query
        account: String,
    },

    /// Get the amount a spender may move out of an owner's balance
    #[structopt(name = "allowance")]
    Allowance {
        /// Owner account
        owner: String,

        /// Spender account
        spender: String,
    },

    /// Send tokens to another account
    #[structopt(name = "transfer")]
    Transfer {
        /// Sending account
        #[structopt(long)]
        from: String,

        /// Recipient account
        #[structopt(long)]
        to: String,

        /// Amount to send
        #[structopt(long)]
        amount: String,
    },

    /// Set the allowance of a spender (replaces any previous allowance)
    #[structopt(name = "approve")]
    Approve {
        /// Owner account
        #[structopt(long)]
        owner: String,

        /// Spender account
        #[structopt(long)]
        spender: String,

        /// Allowance
        #[structopt(long)]
        amount: String,
    },

    /// Send tokens on behalf of an owner, consuming allowance
    #[structopt(name = "transfer-from")]
    TransferFrom {
        /// Account spending the allowance
        #[structopt(long)]
        spender: String,

        /// Account whose tokens are sent
        #[structopt(long)]
        owner: String,

        /// Recipient account
        #[structopt(long)]
        to: String,

        /// Amount to send
        #[structopt(long)]
        amount: String,
    },

    /// List emitted events
    #[structopt(name = "events")]
    Events {
        /// Skip this many events
        #[structopt(long, default_value = "0")]
        since: usize,

        /// Print as JSON
        #[structopt(long)]
        json: bool,
    },
}

fn print_events(events: &[LedgerEvent]) {
    for event in events {
        println!("{} {}", "Event:".green(), event);
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    // Override ledger file if specified
    if let Some(state) = opt.state {
        config.state_file = state;
    }
    info!("Using ledger file {}", config.state_file.display());

    // Run the appropriate command
    match opt.cmd {
        Command::Init { creator, name, symbol, decimals, supply } => {
            let mut token = config.token.clone();
            if let Some(name) = name {
                token.name = name;
            }
            if let Some(symbol) = symbol {
                token.symbol = symbol;
            }
            if let Some(decimals) = decimals {
                token.decimals = decimals;
            }
            if let Some(supply) = supply {
                token.total_supply = parse_amount(&supply)?;
            }

            let creator = init::run(&config, &token, &creator)?;
            println!(
                "{} {} ({}) with supply {} credited to {}",
                "Ledger initialized:".green(),
                token.name,
                token.symbol,
                token.total_supply,
                format_address(&creator)
            );
        }
        Command::Info => {
            let summary = info::run(&config)?;
            println!("{} {}", "Name:".green(), summary.metadata.name);
            println!("{} {}", "Symbol:".green(), summary.metadata.symbol);
            println!("{} {}", "Decimals:".green(), summary.metadata.decimals);
            println!("{} {}", "Total supply:".green(), summary.total_supply);
            println!("{} {}", "Accounts:".green(), summary.accounts);
            println!("{} {}", "Events:".green(), summary.events);
        }
        Command::Balance { account } => {
            let balance = balance::run(&config, &account)?;
            println!("{} {}", "Balance:".green(), balance);
        }
        Command::Allowance { owner, spender } => {
            let allowance = allowance::run(&config, &owner, &spender)?;
            println!("{} {}", "Allowance:".green(), allowance);
        }
        Command::Transfer { from, to, amount } => {
            let events = transfer::run(&config, &from, &to, &amount)?;
            print_events(&events);
        }
        Command::Approve { owner, spender, amount } => {
            let events = approve::run(&config, &owner, &spender, &amount)?;
            print_events(&events);
        }
        Command::TransferFrom { spender, owner, to, amount } => {
            let events = transfer_from::run(&config, &spender, &owner, &to, &amount)?;
            print_events(&events);
        }
        Command::Events { since, json } => {
            let listed = events::run(&config, since)?;
            if json {
                println!("{}", events::to_json(&listed)?);
            } else if listed.is_empty() {
                println!("{}", "No events".yellow());
            } else {
                print_events(&listed);
            }
        }
    }

    Ok(())
}
