use wcsdk_core::{AddressType, ShippingLabelAddress, Site};

use super::WooClient;
use crate::error::ApiError;
use crate::types::{
    PrintShippingLabelResponse, RefundShippingLabelResponse, ShippingLabelApiResponse,
    VerifyAddressRequest, VerifyAddressResponse,
};

impl WooClient {
    /// Fetches every label purchased for an order.
    ///
    /// When the server leaves `orderId` out of the body, the requested
    /// `order_id` is filled in so the mapper always has a parent key.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the site returns a non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_shipping_labels(
        &self,
        site: &Site,
        order_id: i64,
    ) -> Result<Option<ShippingLabelApiResponse>, ApiError> {
        let url = Self::build_url(site, &format!("wc/v1/connect/label/{order_id}"), &[])?;
        let response: Option<ShippingLabelApiResponse> = self.get_json(site, url).await?;
        Ok(response.map(|mut r| {
            r.order_id.get_or_insert(order_id);
            r
        }))
    }

    /// Requests a refund for one label.
    ///
    /// # Errors
    ///
    /// Same as [`WooClient::fetch_shipping_labels`].
    pub async fn refund_shipping_label(
        &self,
        site: &Site,
        order_id: i64,
        label_id: i64,
    ) -> Result<Option<RefundShippingLabelResponse>, ApiError> {
        let url = Self::build_url(
            site,
            &format!("wc/v1/connect/label/{order_id}/{label_id}/refund"),
            &[],
        )?;
        self.post_json::<(), _>(site, url, None).await
    }

    /// Requests a printable PDF of one label, base64-encoded in the response.
    ///
    /// # Errors
    ///
    /// Same as [`WooClient::fetch_shipping_labels`].
    pub async fn print_shipping_label(
        &self,
        site: &Site,
        paper_size: &str,
        label_id: i64,
    ) -> Result<Option<PrintShippingLabelResponse>, ApiError> {
        let label_id = label_id.to_string();
        let url = Self::build_url(
            site,
            "wc/v1/connect/label/print",
            &[
                ("paper_size", paper_size),
                ("label_id_csv", label_id.as_str()),
                ("caption_csv", ""),
                ("json", "true"),
            ],
        )?;
        self.get_json(site, url).await
    }

    /// Asks the label service to validate and normalize an address.
    ///
    /// # Errors
    ///
    /// Same as [`WooClient::fetch_shipping_labels`].
    pub async fn verify_address(
        &self,
        site: &Site,
        address: &ShippingLabelAddress,
        address_type: AddressType,
    ) -> Result<Option<VerifyAddressResponse>, ApiError> {
        let url = Self::build_url(site, "wc/v1/connect/normalize-address", &[])?;
        let body = VerifyAddressRequest {
            address,
            address_type,
        };
        self.post_json(site, url, Some(&body)).await
    }
}
