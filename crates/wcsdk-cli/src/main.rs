mod labels;
mod leaderboards;
mod ssr;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wcsdk_api::WooClient;
use wcsdk_core::{AppConfig, Site};
use wcsdk_store::{Stores, TaskEngine};

use crate::labels::LabelsCommands;
use crate::leaderboards::LeaderboardsCommands;
use crate::ssr::SsrCommands;

#[derive(Debug, Parser)]
#[command(name = "wcsdk-cli")]
#[command(about = "WooCommerce store data command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Local database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Shipping labels of an order
    Labels {
        #[command(flatten)]
        site: SiteArgs,
        #[command(subcommand)]
        command: LabelsCommands,
    },
    /// Top performer products
    Leaderboards {
        #[command(flatten)]
        site: SiteArgs,
        #[command(subcommand)]
        command: LeaderboardsCommands,
    },
    /// System status report
    Ssr {
        #[command(flatten)]
        site: SiteArgs,
        #[command(subcommand)]
        command: SsrCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check the database connection
    Ping,
}

/// The site every site-scoped command talks to.
#[derive(Debug, Clone, Args)]
struct SiteArgs {
    /// Local id the site's records are stored under
    #[arg(long, env = "WCSDK_SITE_ID", default_value_t = 1)]
    site_id: i64,
    /// Public root URL of the store, e.g. `https://shop.example.com`
    #[arg(long, env = "WCSDK_SITE_URL")]
    site_url: String,
}

impl SiteArgs {
    fn to_site(&self) -> Site {
        Site::new(self.site_id, self.site_url.clone())
    }
}

/// Table cell for an optional value; absent values print as an em dash.
pub(crate) fn table_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| v.to_string())
}

/// Formats an optional value, or `"<field> not available"` when absent.
pub(crate) fn or_not_available<T: std::fmt::Display>(value: Option<T>, field: &str) -> String {
    value.map_or_else(|| format!("{field} not available"), |v| v.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("wcsdk-cli ready; run with --help for commands");
        return Ok(());
    };

    let config = wcsdk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = wcsdk_db::PoolConfig::from_app_config(&config);
    let pool = wcsdk_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => run_db(&pool, command).await,
        Commands::Labels { site, command } => {
            let stores = build_stores(&config, pool).await?;
            labels::run(&stores.shipping_labels, &site.to_site(), command).await
        }
        Commands::Leaderboards { site, command } => {
            let stores = build_stores(&config, pool).await?;
            leaderboards::run(&stores.leaderboards, &site.to_site(), command).await
        }
        Commands::Ssr { site, command } => {
            let stores = build_stores(&config, pool).await?;
            ssr::run(&stores.system_status, &site.to_site(), command).await
        }
    }
}

async fn run_db(pool: &sqlx::SqlitePool, command: DbCommands) -> anyhow::Result<()> {
    match command {
        DbCommands::Migrate => {
            let applied = wcsdk_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            wcsdk_db::health_check(pool).await?;
            println!("database ok");
        }
    }
    Ok(())
}

/// Brings the schema up to date and wires the stores over the pool.
async fn build_stores(config: &AppConfig, pool: sqlx::SqlitePool) -> anyhow::Result<Stores> {
    let applied = wcsdk_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }
    let client = WooClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build WooCommerce client: {e}"))?;
    Ok(Stores::new(Arc::new(client), pool, TaskEngine::current()))
}
