//! Database operations for the `top_performer_products` table.

use sqlx::{SqliteConnection, SqlitePool};
use wcsdk_core::{StatsGranularity, TopPerformerProduct};

use crate::DbError;

/// A row from the `top_performer_products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopPerformerProductRow {
    pub id: i64,
    pub site_id: i64,
    pub granularity: String,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub currency: Option<String>,
    pub quantity: Option<i64>,
    pub total: Option<f64>,
}

impl TopPerformerProductRow {
    /// Converts the row into the domain model.
    ///
    /// Returns `None` when the stored granularity is not one this build knows.
    #[must_use]
    pub fn into_model(self) -> Option<TopPerformerProduct> {
        let granularity = self.granularity.parse::<StatsGranularity>().ok()?;
        Some(TopPerformerProduct {
            site_id: self.site_id,
            granularity,
            product_id: self.product_id,
            product_name: self.product_name,
            currency: self.currency,
            quantity: self.quantity,
            total: self.total,
        })
    }
}

/// Returns the cached leaderboard for a site and granularity, in the order it
/// was fetched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_top_performer_products(
    pool: &SqlitePool,
    site_id: i64,
    granularity: StatsGranularity,
) -> Result<Vec<TopPerformerProduct>, DbError> {
    let rows = sqlx::query_as::<_, TopPerformerProductRow>(
        "SELECT id, site_id, granularity, product_id, product_name, currency, quantity, total \
         FROM top_performer_products \
         WHERE site_id = ?1 AND granularity = ?2 \
         ORDER BY id",
    )
    .bind(site_id)
    .bind(granularity.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(TopPerformerProductRow::into_model)
        .collect())
}

/// Deletes the cached leaderboard for a site and granularity.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_top_performer_products(
    pool: &SqlitePool,
    site_id: i64,
    granularity: StatsGranularity,
) -> Result<u64, DbError> {
    let mut conn = pool.acquire().await?;
    delete_for_parent(&mut *conn, site_id, granularity).await
}

/// Upserts leaderboard entries by `(site_id, granularity, product_id)` in one
/// transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any write fails.
pub async fn insert_or_update_top_performer_products(
    pool: &SqlitePool,
    products: &[TopPerformerProduct],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    for product in products {
        upsert_product(&mut *tx, product).await?;
    }
    tx.commit().await?;
    Ok(products.len())
}

/// Replaces the cached leaderboard for a site and granularity, atomically.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; nothing is changed in
/// that case.
pub async fn replace_top_performer_products(
    pool: &SqlitePool,
    site_id: i64,
    granularity: StatsGranularity,
    products: &[TopPerformerProduct],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    delete_for_parent(&mut *tx, site_id, granularity).await?;
    for product in products {
        upsert_product(&mut *tx, product).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn delete_for_parent(
    conn: &mut SqliteConnection,
    site_id: i64,
    granularity: StatsGranularity,
) -> Result<u64, DbError> {
    let result =
        sqlx::query("DELETE FROM top_performer_products WHERE site_id = ?1 AND granularity = ?2")
            .bind(site_id)
            .bind(granularity.as_str())
            .execute(&mut *conn)
            .await?;
    Ok(result.rows_affected())
}

async fn upsert_product(
    conn: &mut SqliteConnection,
    product: &TopPerformerProduct,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO top_performer_products \
             (site_id, granularity, product_id, product_name, currency, quantity, total) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
         ON CONFLICT (site_id, granularity, product_id) DO UPDATE SET \
             product_name = excluded.product_name, \
             currency     = excluded.currency, \
             quantity     = excluded.quantity, \
             total        = excluded.total",
    )
    .bind(product.site_id)
    .bind(product.granularity.as_str())
    .bind(product.product_id)
    .bind(product.product_name.as_deref())
    .bind(product.currency.as_deref())
    .bind(product.quantity)
    .bind(product.total)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
