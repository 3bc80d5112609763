//! Database operations for the `shipping_labels` table.

use sqlx::{types::Json, SqliteConnection, SqlitePool};
use wcsdk_core::ShippingLabel;

use crate::DbError;

const SELECT_COLUMNS: &str = "SELECT id, site_id, order_id, remote_shipping_label_id, \
            tracking_number, carrier_id, date_created, service_name, status, \
            package_name, rate, refundable_amount, currency, paper_size, \
            product_names, product_ids, form_data, store_options, refund \
     FROM shipping_labels";

/// A row from the `shipping_labels` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShippingLabelRow {
    pub id: i64,
    pub site_id: i64,
    pub order_id: i64,
    pub remote_shipping_label_id: i64,
    pub tracking_number: Option<String>,
    pub carrier_id: Option<String>,
    pub date_created: Option<i64>,
    pub service_name: Option<String>,
    pub status: Option<String>,
    pub package_name: Option<String>,
    pub rate: Option<f64>,
    pub refundable_amount: Option<f64>,
    pub currency: Option<String>,
    pub paper_size: Option<String>,
    pub product_names: Option<Json<Vec<String>>>,
    pub product_ids: Option<Json<Vec<i64>>>,
    pub form_data: Option<Json<serde_json::Value>>,
    pub store_options: Option<Json<serde_json::Value>>,
    pub refund: Option<Json<serde_json::Value>>,
}

impl From<ShippingLabelRow> for ShippingLabel {
    fn from(row: ShippingLabelRow) -> Self {
        Self {
            site_id: row.site_id,
            order_id: row.order_id,
            remote_shipping_label_id: row.remote_shipping_label_id,
            tracking_number: row.tracking_number,
            carrier_id: row.carrier_id,
            date_created: row.date_created,
            service_name: row.service_name,
            status: row.status,
            package_name: row.package_name,
            rate: row.rate,
            refundable_amount: row.refundable_amount,
            currency: row.currency,
            paper_size: row.paper_size,
            product_names: row.product_names.map(|Json(v)| v),
            product_ids: row.product_ids.map(|Json(v)| v),
            form_data: row.form_data.map(|Json(v)| v),
            store_options: row.store_options.map(|Json(v)| v),
            refund: row.refund.map(|Json(v)| v),
        }
    }
}

/// Returns every label stored for an order, in insertion order.
///
/// An order with no stored labels yields an empty list.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_shipping_labels_for_order(
    pool: &SqlitePool,
    site_id: i64,
    order_id: i64,
) -> Result<Vec<ShippingLabel>, DbError> {
    let rows = sqlx::query_as::<_, ShippingLabelRow>(&format!(
        "{SELECT_COLUMNS} WHERE site_id = ?1 AND order_id = ?2 ORDER BY id"
    ))
    .bind(site_id)
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShippingLabel::from).collect())
}

/// Looks up a single label by its full identity.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_shipping_label_by_id(
    pool: &SqlitePool,
    site_id: i64,
    order_id: i64,
    remote_shipping_label_id: i64,
) -> Result<Option<ShippingLabel>, DbError> {
    let row = sqlx::query_as::<_, ShippingLabelRow>(&format!(
        "{SELECT_COLUMNS} WHERE site_id = ?1 AND order_id = ?2 AND remote_shipping_label_id = ?3"
    ))
    .bind(site_id)
    .bind(order_id)
    .bind(remote_shipping_label_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ShippingLabel::from))
}

/// Deletes every label stored for an order. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_shipping_labels_for_order(
    pool: &SqlitePool,
    site_id: i64,
    order_id: i64,
) -> Result<u64, DbError> {
    let mut conn = pool.acquire().await?;
    delete_for_order(&mut *conn, site_id, order_id).await
}

/// Upserts labels by `(site_id, order_id, remote_shipping_label_id)`.
///
/// All rows are written inside a single transaction; if any write fails the
/// whole batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any write fails.
pub async fn insert_or_update_shipping_labels(
    pool: &SqlitePool,
    labels: &[ShippingLabel],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    for label in labels {
        upsert_label(&mut *tx, label).await?;
    }
    tx.commit().await?;
    Ok(labels.len())
}

/// Replaces the stored labels of one order with `labels`.
///
/// Deletes every existing label for `(site_id, order_id)` and inserts the new
/// set inside one transaction, so readers never observe a half-replaced
/// order. Every label in `labels` is expected to belong to that order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete or any insert fails; nothing is
/// changed in that case.
pub async fn replace_shipping_labels_for_order(
    pool: &SqlitePool,
    site_id: i64,
    order_id: i64,
    labels: &[ShippingLabel],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    delete_for_order(&mut *tx, site_id, order_id).await?;
    for label in labels {
        upsert_label(&mut *tx, label).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn delete_for_order(
    conn: &mut SqliteConnection,
    site_id: i64,
    order_id: i64,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM shipping_labels WHERE site_id = ?1 AND order_id = ?2")
        .bind(site_id)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

async fn upsert_label(conn: &mut SqliteConnection, label: &ShippingLabel) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO shipping_labels \
             (site_id, order_id, remote_shipping_label_id, tracking_number, carrier_id, \
              date_created, service_name, status, package_name, rate, refundable_amount, \
              currency, paper_size, product_names, product_ids, form_data, store_options, refund) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18) \
         ON CONFLICT (site_id, order_id, remote_shipping_label_id) DO UPDATE SET \
             tracking_number   = excluded.tracking_number, \
             carrier_id        = excluded.carrier_id, \
             date_created      = excluded.date_created, \
             service_name      = excluded.service_name, \
             status            = excluded.status, \
             package_name      = excluded.package_name, \
             rate              = excluded.rate, \
             refundable_amount = excluded.refundable_amount, \
             currency          = excluded.currency, \
             paper_size        = excluded.paper_size, \
             product_names     = excluded.product_names, \
             product_ids       = excluded.product_ids, \
             form_data         = excluded.form_data, \
             store_options     = excluded.store_options, \
             refund            = excluded.refund",
    )
    .bind(label.site_id)
    .bind(label.order_id)
    .bind(label.remote_shipping_label_id)
    .bind(label.tracking_number.as_deref())
    .bind(label.carrier_id.as_deref())
    .bind(label.date_created)
    .bind(label.service_name.as_deref())
    .bind(label.status.as_deref())
    .bind(label.package_name.as_deref())
    .bind(label.rate)
    .bind(label.refundable_amount)
    .bind(label.currency.as_deref())
    .bind(label.paper_size.as_deref())
    .bind(label.product_names.as_ref().map(Json))
    .bind(label.product_ids.as_ref().map(Json))
    .bind(label.form_data.as_ref().map(Json))
    .bind(label.store_options.as_ref().map(Json))
    .bind(label.refund.as_ref().map(Json))
    .execute(&mut *conn)
    .await?;

    Ok(())
}
