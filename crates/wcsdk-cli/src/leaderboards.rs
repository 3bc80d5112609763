//! Top performer product command handlers.

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use wcsdk_core::{DateRange, Site, StatsGranularity, TopPerformerProduct};
use wcsdk_store::LeaderboardsStore;

use crate::table_cell;

#[derive(Debug, Subcommand)]
pub enum LeaderboardsCommands {
    /// Fetch the product leaderboard from the site and cache it
    Fetch {
        /// days, weeks, months or years
        #[arg(long, default_value = "days")]
        granularity: StatsGranularity,
        /// Maximum number of products
        #[arg(long)]
        quantity: Option<u32>,
        /// First day of the window (defaults to the start of the current period)
        #[arg(long, requires = "before")]
        after: Option<NaiveDate>,
        /// Last day of the window, inclusive
        #[arg(long, requires = "after")]
        before: Option<NaiveDate>,
    },
    /// List the cached product leaderboard
    List {
        #[arg(long, default_value = "days")]
        granularity: StatsGranularity,
    },
}

pub(crate) async fn run(
    store: &LeaderboardsStore,
    site: &Site,
    command: LeaderboardsCommands,
) -> anyhow::Result<()> {
    match command {
        LeaderboardsCommands::Fetch {
            granularity,
            quantity,
            after,
            before,
        } => {
            let range = window(after, before)?;
            let products = store
                .fetch_product_leaderboards(site, granularity, range, quantity)
                .await?;
            println!(
                "fetched {} top performer(s) for {granularity}",
                products.len()
            );
            print_table(&products);
        }
        LeaderboardsCommands::List { granularity } => {
            let products = store
                .get_cached_top_performer_products(site, granularity)
                .await?;
            if products.is_empty() {
                println!("no top performers cached for {granularity}; run `leaderboards fetch` first");
                return Ok(());
            }
            print_table(&products);
        }
    }
    Ok(())
}

fn window(after: Option<NaiveDate>, before: Option<NaiveDate>) -> anyhow::Result<Option<DateRange>> {
    let (Some(after), Some(before)) = (after, before) else {
        return Ok(None);
    };
    if after > before {
        anyhow::bail!("--after ({after}) must not be later than --before ({before})");
    }
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| anyhow::anyhow!("invalid end-of-day time"))?;
    Ok(Some(DateRange {
        start: after.and_time(NaiveTime::MIN),
        end: before.and_time(end_of_day),
    }))
}

fn print_table(products: &[TopPerformerProduct]) {
    println!("{:<10}{:<36}{:<8}TOTAL", "PRODUCT", "NAME", "SOLD");
    for product in products {
        let name = table_cell(product.product_name.as_deref().map(|name| {
            if name.chars().count() > 34 {
                format!("{}...", name.chars().take(31).collect::<String>())
            } else {
                name.to_string()
            }
        }));
        let total = product.total.map(|t| {
            format!("{}{t:.2}", product.currency.as_deref().unwrap_or(""))
        });
        println!(
            "{:<10}{:<36}{:<8}{}",
            product.product_id,
            name,
            table_cell(product.quantity),
            table_cell(total),
        );
    }
}
