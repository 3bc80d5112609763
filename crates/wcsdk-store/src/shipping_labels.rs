//! Shipping labels: fetch, refund, print, address verification, and the
//! locally cached labels of each order.

use std::sync::Arc;

use sqlx::SqlitePool;
use wcsdk_api::{map_shipping_labels, VerifyAddressResponse, WooClient};
use wcsdk_core::{
    AddressType, AddressVerificationResult, ShippingLabel, ShippingLabelAddress, Site, WooError,
    WooResult,
};
use wcsdk_db::DbError;

use crate::engine::TaskEngine;
use crate::persistence_error;

const CALLER: &str = "ShippingLabelStore";

pub struct ShippingLabelStore {
    client: Arc<WooClient>,
    pool: SqlitePool,
    engine: TaskEngine,
}

impl ShippingLabelStore {
    #[must_use]
    pub fn new(client: Arc<WooClient>, pool: SqlitePool, engine: TaskEngine) -> Self {
        Self {
            client,
            pool,
            engine,
        }
    }

    /// Fetches the labels of an order and replaces the cached set with them.
    ///
    /// After success the cache holds exactly the returned labels for that
    /// order. A response with no payload yields the generic-unknown error and
    /// leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WooError`] of a failed request, the
    /// generic-unknown error for a missing payload, or a generic error
    /// carrying the database message if the cache cannot be written.
    pub async fn fetch_shipping_labels_for_order(
        &self,
        site: &Site,
        order_id: i64,
    ) -> WooResult<Vec<ShippingLabel>> {
        let client = Arc::clone(&self.client);
        let pool = self.pool.clone();
        let site = site.clone();

        self.engine
            .with_default_context(CALLER, "fetch_shipping_labels_for_order", async move {
                let Some(response) = client.fetch_shipping_labels(&site, order_id).await? else {
                    return Err(WooError::generic_unknown());
                };

                let parent_order_id = response.order_id.unwrap_or(order_id);
                let labels = map_shipping_labels(&response, &site);
                wcsdk_db::replace_shipping_labels_for_order(
                    &pool,
                    site.id,
                    parent_order_id,
                    &labels,
                )
                .await
                .map_err(persistence_error)?;

                tracing::info!(
                    site_id = site.id,
                    order_id = parent_order_id,
                    count = labels.len(),
                    "stored shipping labels"
                );
                Ok(labels)
            })
            .await
    }

    /// Requests a refund for one label. Returns whether the service accepted
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WooError`] of a failed request, or the
    /// generic-unknown error for a missing payload.
    pub async fn refund_shipping_label_for_order(
        &self,
        site: &Site,
        order_id: i64,
        label_id: i64,
    ) -> WooResult<bool> {
        let client = Arc::clone(&self.client);
        let site = site.clone();

        self.engine
            .with_default_context(CALLER, "refund_shipping_label_for_order", async move {
                match client
                    .refund_shipping_label(&site, order_id, label_id)
                    .await?
                {
                    Some(response) => Ok(response.success),
                    None => Err(WooError::generic_unknown()),
                }
            })
            .await
    }

    /// Requests a printable label. Returns the base64-encoded PDF.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WooError`] of a failed request, or the
    /// generic-unknown error unless the service reports success with content.
    pub async fn print_shipping_label(
        &self,
        site: &Site,
        paper_size: &str,
        label_id: i64,
    ) -> WooResult<String> {
        let client = Arc::clone(&self.client);
        let site = site.clone();
        let paper_size = paper_size.to_owned();

        self.engine
            .with_default_context(CALLER, "print_shipping_label", async move {
                let response = client
                    .print_shipping_label(&site, &paper_size, label_id)
                    .await?;
                match response {
                    Some(r) if r.success => r.b64_content.ok_or_else(WooError::generic_unknown),
                    _ => Err(WooError::generic_unknown()),
                }
            })
            .await
    }

    /// Validates an address with the label service and classifies the answer.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WooError`] of a failed request with its
    /// message defaulted to `""`, or a generic `"Unknown error"` when the
    /// answer fits no verification outcome.
    pub async fn verify_address(
        &self,
        site: &Site,
        address: &ShippingLabelAddress,
        address_type: AddressType,
    ) -> WooResult<AddressVerificationResult> {
        let client = Arc::clone(&self.client);
        let site = site.clone();
        let address = address.clone();

        self.engine
            .with_default_context(CALLER, "verify_address", async move {
                let response = client
                    .verify_address(&site, &address, address_type)
                    .await
                    .map_err(|e| WooError::from(e).with_empty_message_if_absent())?;
                classify_verification(response)
            })
            .await
    }

    /// Cached labels of an order, oldest first. Empty when none are stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_shipping_labels_for_order(
        &self,
        site: &Site,
        order_id: i64,
    ) -> Result<Vec<ShippingLabel>, DbError> {
        wcsdk_db::list_shipping_labels_for_order(&self.pool, site.id, order_id).await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_shipping_label_by_id(
        &self,
        site: &Site,
        order_id: i64,
        label_id: i64,
    ) -> Result<Option<ShippingLabel>, DbError> {
        wcsdk_db::get_shipping_label_by_id(&self.pool, site.id, order_id, label_id).await
    }

    /// Removes the cached labels of an order. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the delete fails.
    pub async fn delete_shipping_labels_for_order(
        &self,
        site: &Site,
        order_id: i64,
    ) -> Result<u64, DbError> {
        wcsdk_db::delete_shipping_labels_for_order(&self.pool, site.id, order_id).await
    }
}

/// First match wins: field errors about the address, other field errors,
/// a successful normalization, and finally a generic error.
fn classify_verification(
    response: Option<VerifyAddressResponse>,
) -> WooResult<AddressVerificationResult> {
    let Some(response) = response else {
        return Err(WooError::generic_with_message("Unknown error"));
    };

    if let Some(errors) = response.field_errors {
        return Ok(match errors.address.filter(|a| !a.trim().is_empty()) {
            Some(address) => AddressVerificationResult::InvalidAddress(address),
            None => AddressVerificationResult::InvalidRequest(errors.general.unwrap_or_default()),
        });
    }

    match response.normalized {
        Some(normalized) if response.success => Ok(AddressVerificationResult::Valid(normalized)),
        _ => Err(WooError::generic_with_message("Unknown error")),
    }
}
