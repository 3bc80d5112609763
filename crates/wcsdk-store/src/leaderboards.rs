//! Product leaderboards per reporting granularity.

use std::sync::Arc;

use chrono::Local;
use sqlx::SqlitePool;
use wcsdk_api::{map_product_leaderboard, WooClient};
use wcsdk_core::{DateRange, Site, StatsGranularity, TopPerformerProduct, WooError, WooResult};
use wcsdk_db::DbError;

use crate::engine::TaskEngine;
use crate::persistence_error;

const CALLER: &str = "LeaderboardsStore";

pub struct LeaderboardsStore {
    client: Arc<WooClient>,
    pool: SqlitePool,
    engine: TaskEngine,
}

impl LeaderboardsStore {
    #[must_use]
    pub fn new(client: Arc<WooClient>, pool: SqlitePool, engine: TaskEngine) -> Self {
        Self {
            client,
            pool,
            engine,
        }
    }

    /// Fetches the top products for `granularity` and replaces the cached
    /// leaderboard for that granularity.
    ///
    /// `range` defaults to the current period of `granularity` in local
    /// time; `quantity` caps the number of products returned.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WooError`] of a failed request, the
    /// generic-unknown error for a missing payload, or a generic error
    /// carrying the database message if the cache cannot be written.
    pub async fn fetch_product_leaderboards(
        &self,
        site: &Site,
        granularity: StatsGranularity,
        range: Option<DateRange>,
        quantity: Option<u32>,
    ) -> WooResult<Vec<TopPerformerProduct>> {
        let client = Arc::clone(&self.client);
        let pool = self.pool.clone();
        let site = site.clone();
        let range = range.unwrap_or_else(|| granularity.current_period(Local::now().date_naive()));

        self.engine
            .with_default_context(CALLER, "fetch_product_leaderboards", async move {
                let Some(leaderboards) = client
                    .fetch_leaderboards(&site, granularity, range, quantity)
                    .await?
                else {
                    return Err(WooError::generic_unknown());
                };

                let products = map_product_leaderboard(&leaderboards, &site, granularity);
                wcsdk_db::replace_top_performer_products(&pool, site.id, granularity, &products)
                    .await
                    .map_err(persistence_error)?;

                tracing::info!(
                    site_id = site.id,
                    granularity = %granularity,
                    count = products.len(),
                    "stored top performer products"
                );
                Ok(products)
            })
            .await
    }

    /// Cached leaderboard for a granularity, in fetched order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_cached_top_performer_products(
        &self,
        site: &Site,
        granularity: StatsGranularity,
    ) -> Result<Vec<TopPerformerProduct>, DbError> {
        wcsdk_db::list_top_performer_products(&self.pool, site.id, granularity).await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the delete fails.
    pub async fn delete_top_performer_products(
        &self,
        site: &Site,
        granularity: StatsGranularity,
    ) -> Result<u64, DbError> {
        wcsdk_db::delete_top_performer_products(&self.pool, site.id, granularity).await
    }
}
