//! Banco Javer CLI
//!
//! Back-office command line over the Banco Javer APIs.
//!
//! # Usage
//!
//! ```bash
//! javer clients search --nome Ana
//! javer clients register --nome Ana --telefone 11988887777 \
//!     --documento 111.222.333-44 --correntista
//! javer accounts score 111.222.333-44
//! javer accounts balance 4521-9 --valor 250.00
//! javer investments access 111.222.333-44
//! javer investments new --documento 11122233344 --tipo ACOES --valor 1000 --ticker PETR4
//! ```

use clap::{Parser, Subcommand};
use javer_client::{Outcome, Tone};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "javer")]
#[command(author = "Banco Javer")]
#[command(version)]
#[command(about = "Banco Javer back-office command line", long_about = None)]
struct Cli {
    /// Core banking API URL
    #[arg(long, env = "JAVER_CORE_URL")]
    core_url: Option<String>,

    /// Investment service URL
    #[arg(long, env = "JAVER_INVESTMENT_URL")]
    investment_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "text")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clients
    Clients {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Account lookups and balance
    Accounts {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Investor portal and investments
    Investments {
        #[command(subcommand)]
        action: InvestmentCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ClientCommands {
    /// Search clients by name
    Search {
        #[arg(long)]
        nome: String,
    },
    /// Get client by document
    Get { documento: String },
    /// Register a new client
    Register {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        telefone: String,
        #[arg(long)]
        documento: String,
        /// Client holds a bank account
        #[arg(long)]
        correntista: bool,
        /// Client holds an investment account
        #[arg(long)]
        investidor: bool,
        /// Investor email (sent only with --investidor)
        #[arg(long, default_value = "")]
        email: String,
        /// Declared net worth (sent only with --investidor)
        #[arg(long, default_value = "")]
        patrimonio: String,
        /// CONSERVADOR, MODERADO or ARROJADO (sent only with --investidor)
        #[arg(long, default_value = "")]
        perfil: String,
    },
    /// Delete a client
    Delete { documento: String },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Credit score of a client
    Score { documento: String },
    /// Account number of a client
    Number { documento: String },
    /// Set an account balance
    Balance {
        conta: String,
        #[arg(long)]
        valor: String,
    },
}

#[derive(Subcommand)]
enum InvestmentCommands {
    /// Check investor access and open the portal
    Access { documento: String },
    /// Register a new investment
    New {
        #[arg(long)]
        documento: String,
        /// RENDA FIXA, ACOES, FUNDOS or CRIPTO
        #[arg(long)]
        tipo: String,
        #[arg(long)]
        valor: String,
        /// Mark the investment inactive
        #[arg(long)]
        inativo: bool,
        /// Required unless tipo is RENDA FIXA
        #[arg(long, default_value = "")]
        ticker: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(outcome)) if outcome.feedback.tone == Tone::Error => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<Option<Outcome>, String> {
    let profile = cli.profile.as_deref();
    let (core_url, investment_url, format) = (cli.core_url, cli.investment_url, cli.format);

    match cli.command {
        Commands::Config { action } => commands::config::handle(action, profile).await,
        Commands::Clients { action } => {
            let mut bridge = commands::connect(profile, core_url, investment_url, format)?;
            commands::clients::handle(action, &mut bridge).await
        }
        Commands::Accounts { action } => {
            let mut bridge = commands::connect(profile, core_url, investment_url, format)?;
            commands::accounts::handle(action, &mut bridge).await
        }
        Commands::Investments { action } => {
            let mut bridge = commands::connect(profile, core_url, investment_url, format)?;
            commands::investments::handle(action, &mut bridge).await
        }
    }
}
