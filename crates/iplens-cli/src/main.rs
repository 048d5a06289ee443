mod cloudflare;
mod lookup;
mod render;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "iplens")]
#[command(about = "IP geolocation lookup and Cloudflare detection")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up an IP address or domain (IPv4 / IPv6 / domain; omit or `me` for your own)
    Lookup {
        /// Address or domain to look up
        subject: Option<String>,
        /// Ignore the session cache and query the provider
        #[arg(long)]
        refresh: bool,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show information about your current public IP address
    Me {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the cached lookup for this session
    Clear,
    /// Check whether a website is served through Cloudflare
    Cloudflare {
        /// Domain or URL to check (https:// is assumed)
        domain: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = iplens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Lookup {
            subject,
            refresh,
            json,
        }) => lookup::run_lookup(&config, subject.as_deref().unwrap_or(""), refresh, json).await,
        Some(Commands::Me { json }) => lookup::run_me(&config, json).await,
        Some(Commands::Clear) => lookup::run_clear(&config),
        Some(Commands::Cloudflare { domain, json }) => {
            cloudflare::run_check(&config, &domain, json).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
