use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use server::{
    config::{AppConfig, DatabaseSettings},
    http::{self, AppState, ServeConfig},
    store::EmployeeStore,
};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee record service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Migrate(action) => run_migrate(action, &config.database).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn")),
        )
        .init();
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let store = EmployeeStore::connect(&config.database).await?;
    store.migrate().await?;
    let state = AppState {
        store: store.clone(),
        config,
    };
    http::serve(ServeConfig::new(cmd.host, cmd.port), state).await?;
    store.shutdown().await?;
    info!("database pool closed");
    Ok(())
}

async fn run_migrate(action: MigrateCommand, settings: &DatabaseSettings) -> Result<()> {
    let store = EmployeeStore::connect(settings).await?;
    match action {
        MigrateCommand::Up => {
            store.migrate().await?;
            info!("database migrations applied");
        }
        MigrateCommand::Down => {
            store.rollback().await?;
            info!("most recent migration rolled back");
        }
    }
    store.shutdown().await?;
    Ok(())
}
