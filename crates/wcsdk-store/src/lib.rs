//! Domain stores: each remote operation fetches through [`WooClient`], maps
//! the response, replaces the local cache, and returns a [`WooResult`].
//!
//! [`WooClient`]: wcsdk_api::WooClient
//! [`WooResult`]: wcsdk_core::WooResult

pub mod engine;
pub mod leaderboards;
pub mod shipping_labels;
pub mod system_status;

use std::sync::Arc;

use sqlx::SqlitePool;
use wcsdk_api::WooClient;
use wcsdk_core::WooError;
use wcsdk_db::DbError;

pub use engine::TaskEngine;
pub use leaderboards::LeaderboardsStore;
pub use shipping_labels::ShippingLabelStore;
pub use system_status::SystemStatusStore;

/// Every store, built over one shared client, pool and engine.
pub struct Stores {
    pub shipping_labels: ShippingLabelStore,
    pub leaderboards: LeaderboardsStore,
    pub system_status: SystemStatusStore,
}

impl Stores {
    #[must_use]
    pub fn new(client: Arc<WooClient>, pool: SqlitePool, engine: TaskEngine) -> Self {
        Self {
            shipping_labels: ShippingLabelStore::new(
                Arc::clone(&client),
                pool.clone(),
                engine.clone(),
            ),
            leaderboards: LeaderboardsStore::new(Arc::clone(&client), pool.clone(), engine.clone()),
            system_status: SystemStatusStore::new(client, pool, engine),
        }
    }
}

/// A failed local write inside a fetch surfaces as a generic error carrying
/// the database message.
pub(crate) fn persistence_error(err: DbError) -> WooError {
    tracing::error!(error = %err, "failed to persist fetched records");
    WooError::generic_with_message(err.to_string())
}
