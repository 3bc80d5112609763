use serde::{Deserialize, Serialize};

/// A purchased shipping label attached to an order.
///
/// Identity is `(site_id, order_id, remote_shipping_label_id)`. Optional
/// fields are stored exactly as the API sent them; absence is never
/// replaced by a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingLabel {
    pub site_id: i64,
    pub order_id: i64,
    pub remote_shipping_label_id: i64,
    pub tracking_number: Option<String>,
    pub carrier_id: Option<String>,
    /// Creation time in epoch milliseconds, as sent by the API.
    pub date_created: Option<i64>,
    pub service_name: Option<String>,
    /// Label lifecycle status, e.g. `"PURCHASED"`.
    pub status: Option<String>,
    pub package_name: Option<String>,
    pub rate: Option<f64>,
    pub refundable_amount: Option<f64>,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: Option<String>,
    pub paper_size: Option<String>,
    pub product_names: Option<Vec<String>>,
    pub product_ids: Option<Vec<i64>>,
    /// The order's label form: origin and destination addresses, packages.
    pub form_data: Option<serde_json::Value>,
    pub store_options: Option<serde_json::Value>,
    pub refund: Option<serde_json::Value>,
}

impl ShippingLabel {
    /// Ship-from address recorded in the label form, if present and well-formed.
    #[must_use]
    pub fn origin_address(&self) -> Option<ShippingLabelAddress> {
        self.form_address("origin")
    }

    /// Ship-to address recorded in the label form, if present and well-formed.
    #[must_use]
    pub fn destination_address(&self) -> Option<ShippingLabelAddress> {
        self.form_address("destination")
    }

    /// Returns `true` once a refund has been requested for this label.
    #[must_use]
    pub fn is_refunded(&self) -> bool {
        self.refund.as_ref().is_some_and(|r| !r.is_null())
    }

    fn form_address(&self, key: &str) -> Option<ShippingLabelAddress> {
        let value = self.form_data.as_ref()?.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }
}

/// A postal address as understood by the label service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingLabelAddress {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, rename = "address_1", alias = "address")]
    pub address: Option<String>,
    #[serde(default, rename = "address_2")]
    pub address_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// Which end of the shipment an address describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Origin,
    Destination,
}

impl AddressType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AddressType::Origin => "origin",
            AddressType::Destination => "destination",
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful address-verification round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressVerificationResult {
    /// The service accepted the address and suggested a normalized form.
    Valid(ShippingLabelAddress),
    /// The address itself was rejected; carries the service's explanation.
    InvalidAddress(String),
    /// The request was rejected for a reason not tied to the address.
    InvalidRequest(String),
}
