use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use surfsup::{gateway, store, ClimateService, Config};
use tracing_subscriber::EnvFilter;

/// Serve the Hawaii climate dataset as a read-only JSON API.
#[derive(Parser, Debug)]
#[command(name = "surfsup", version, about)]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API (default)
    Serve {
        /// SQLite dataset to serve
        #[arg(long, value_name = "PATH")]
        db: Option<String>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the values derived from the dataset at startup
    Summary {
        /// SQLite dataset to inspect
        #[arg(long, value_name = "PATH")]
        db: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve {
        db: None,
        host: None,
        port: None,
    }) {
        Command::Serve { db, host, port } => {
            if let Some(db) = db {
                config.db_path = db;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            config.validate()?;

            let service = open_service(&config)?;
            gateway::run_gateway(&config.bind_addr(), gateway::AppState::new(service)).await
        }
        Command::Summary { db } => {
            if let Some(db) = db {
                config.db_path = db;
            }
            config.validate()?;

            let service = open_service(&config)?;
            let ctx = service.context();
            println!("Latest date:         {}", ctx.latest_date);
            println!("Earliest date:       {}", ctx.earliest_date);
            println!("Last-year window:    {} .. {}", ctx.one_year_ago, ctx.latest_date);
            println!(
                "Most active station: {} ({} rows)",
                ctx.most_active_station, ctx.most_active_count
            );
            println!("Default range end:   {}", ctx.default_end);
            println!("Stations:            {}", service.station_count()?);
            Ok(())
        }
    }
}

fn open_service(config: &Config) -> Result<ClimateService> {
    let db_path = config.resolved_db_path()?;
    tracing::info!("Opening dataset {}", db_path.display());
    let conn = store::open_readonly(&db_path)?;
    ClimateService::new(conn, config.query.default_end_date.clone())
}
