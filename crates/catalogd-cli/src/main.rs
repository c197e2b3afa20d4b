use std::path::PathBuf;

use clap::{Parser, Subcommand};


#[derive(Debug, Parser)]
#[command(name = "catalogd-cli")]
#[command(about = "catalogd operational command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify the database answers a round-trip ping
    Ping,
    /// Run pending schema migrations
    Migrate,
    /// Apply every .sql file in the seed directory
    Seed {
        /// Seed directory (defaults to CATALOGD_SEED_DIR, then `seeds`)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("catalogd-cli: no command given (see --help)");
        return Ok(());
    };

    let config = catalogd_core::load_app_config_from_env()?;
    let pool_config = catalogd_db::PoolConfig::from_app_config(&config);
    let pool = catalogd_db::connect_pool(&config.database_url, pool_config).await?;

    let result = run_command(command, &pool, &config).await;
    pool.close().await;
    result
}

async fn run_command(
    command: Commands,
    pool: &sqlx::PgPool,
    config: &catalogd_core::AppConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Ping => {
            catalogd_db::ping(pool).await?;
            println!("database is reachable");
        }
        Commands::Migrate => {
            let applied = catalogd_db::run_migrations(pool).await?;
            tracing::info!(applied, "migration run complete");
            println!("applied {applied} migration(s)");
        }
        Commands::Seed { dir } => {
            let dir = dir.unwrap_or_else(|| config.seed_dir.clone());
            let applied = catalogd_db::apply_seed_dir(pool, &dir).await?;
            println!("applied {applied} seed file(s) from {}", dir.display());
        }
    }
    Ok(())
}
