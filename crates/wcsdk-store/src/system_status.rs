//! Site settings: the cached system status report (SSR) of each site.

use std::sync::Arc;

use sqlx::SqlitePool;
use wcsdk_api::{map_system_status, WooClient};
use wcsdk_core::{Site, SiteSystemStatus, WooError, WooResult};
use wcsdk_db::DbError;

use crate::engine::TaskEngine;
use crate::persistence_error;

const CALLER: &str = "SystemStatusStore";

pub struct SystemStatusStore {
    client: Arc<WooClient>,
    pool: SqlitePool,
    engine: TaskEngine,
}

impl SystemStatusStore {
    #[must_use]
    pub fn new(client: Arc<WooClient>, pool: SqlitePool, engine: TaskEngine) -> Self {
        Self {
            client,
            pool,
            engine,
        }
    }

    /// Fetches the report and replaces the cached snapshot of the site.
    ///
    /// # Errors
    ///
    /// Same as the other fetches: a classified request error, the
    /// generic-unknown error for a missing payload, or a persistence error.
    pub async fn fetch_ssr(&self, site: &Site) -> WooResult<SiteSystemStatus> {
        let client = Arc::clone(&self.client);
        let pool = self.pool.clone();
        let site = site.clone();

        self.engine
            .with_default_context(CALLER, "fetch_ssr", async move {
                let Some(response) = client.fetch_system_status(&site).await? else {
                    return Err(WooError::generic_unknown());
                };

                let status = map_system_status(&response, &site);
                wcsdk_db::replace_system_status(&pool, &status)
                    .await
                    .map_err(persistence_error)?;

                tracing::info!(site_id = site.id, "stored system status report");
                Ok(status)
            })
            .await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_ssr(&self, site: &Site) -> Result<Option<SiteSystemStatus>, DbError> {
        wcsdk_db::get_system_status(&self.pool, site.id).await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the delete fails.
    pub async fn delete_ssr(&self, site: &Site) -> Result<u64, DbError> {
        wcsdk_db::delete_system_status(&self.pool, site.id).await
    }
}
