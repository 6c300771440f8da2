//! `reseller` - command-line front end for the reseller account service.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reseller_api::{Client, ProfileFilter, Response, encode_canonical, legal_forms};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reseller")]
#[command(about = "Reseller account service client")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical encoding of a value
    Encode {
        /// Raw value
        raw: String,
    },
    /// List accepted legal forms
    LegalForms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a saved XML response and print it as JSON
    Parse {
        /// Response file
        file: PathBuf,
    },
    /// Claim an account
    Claim {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Check whether an account login is valid
    Valid {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List profiles for an account or customer
    Profiles {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        partner_id_customer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reseller=info,reseller_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { raw } => println!("{}", encode_canonical(&raw)),
        Commands::LegalForms { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(legal_forms())?);
            } else {
                for form in legal_forms() {
                    println!("{}\t{}", form.key, form.value);
                }
            }
        }
        Commands::Parse { file } => {
            let body = tokio::fs::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            print_response(&Response::from_bytes(&body)?)?;
        }
        Commands::Claim { username, password } => {
            let client = connect(cli.config.as_deref()).await?;
            print_response(&client.claim(&username, &password).await?)?;
        }
        Commands::Valid { username, password } => {
            let client = connect(cli.config.as_deref()).await?;
            print_response(&client.check_valid(&username, &password).await?)?;
        }
        Commands::Profiles {
            username,
            password,
            partner_id_customer,
        } => {
            let client = connect(cli.config.as_deref()).await?;
            let filter = ProfileFilter {
                username,
                password,
                partner_id_customer,
            };
            print_response(&client.profiles(&filter).await?)?;
        }
    }

    Ok(())
}

async fn connect(config_path: Option<&std::path::Path>) -> anyhow::Result<Client> {
    let config = config::load(config_path).await?;
    let client = Client::new(&config)?;
    info!(base_url = config.base_url(), "Using reseller service");
    Ok(client)
}

fn print_response(response: &Response) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
