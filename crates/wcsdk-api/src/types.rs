//! WooCommerce REST response types.
//!
//! Every type models the JSON returned by one endpoint. Fields the server may
//! leave out are `Option` with `#[serde(default)]`; the mappers decide what
//! an absent field means.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wcsdk_core::{AddressType, ShippingLabelAddress};

/// WordPress error body: `{"code": "...", "message": "...", "data": {"status": N}}`.
#[derive(Debug, Deserialize)]
pub struct WpErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// wc/v1/connect/label/{order_id}
// ---------------------------------------------------------------------------

/// Shipping labels purchased for one order, with the form state shared by
/// every label of that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLabelApiResponse {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub paper_size: Option<String>,
    #[serde(default)]
    pub form_data: Option<Value>,
    #[serde(default)]
    pub store_options: Option<Value>,
    #[serde(default)]
    pub labels_data: Option<Vec<LabelItem>>,
}

/// One entry of `labelsData`.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelItem {
    #[serde(default)]
    pub label_id: Option<i64>,
    #[serde(default)]
    pub tracking: Option<String>,
    #[serde(default)]
    pub refundable_amount: Option<f64>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub carrier_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub product_names: Option<Vec<String>>,
    #[serde(default)]
    pub product_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub refund: Option<Value>,
}

/// Response of `wc/v1/connect/label/{order_id}/{label_id}/refund`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefundShippingLabelResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub refund: Option<Value>,
}

/// Response of `wc/v1/connect/label/print`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintShippingLabelResponse {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub b64_content: Option<String>,
    #[serde(default)]
    pub success: bool,
}

// ---------------------------------------------------------------------------
// wc/v1/connect/normalize-address
// ---------------------------------------------------------------------------

/// Request body for address verification.
#[derive(Debug, Serialize)]
pub struct VerifyAddressRequest<'a> {
    pub address: &'a ShippingLabelAddress,
    #[serde(rename = "type")]
    pub address_type: AddressType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyAddressResponse {
    #[serde(default)]
    pub success: bool,
    /// The address as the carrier would print it.
    #[serde(default)]
    pub normalized: Option<ShippingLabelAddress>,
    #[serde(default)]
    pub is_trivial_normalization: Option<bool>,
    #[serde(default)]
    pub field_errors: Option<AddressFieldErrors>,
}

/// Validation problems reported in place of a normalized address.
///
/// `address` is set when the address itself was rejected; `general` carries
/// any other explanation.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressFieldErrors {
    #[serde(default, alias = "message")]
    pub general: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// wc-analytics/leaderboards
// ---------------------------------------------------------------------------

/// One leaderboard (products, categories, coupons, customers, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardsApiResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub headers: Vec<LeaderboardHeader>,
    #[serde(default)]
    pub rows: Vec<Vec<LeaderboardCell>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardHeader {
    #[serde(default)]
    pub label: Option<String>,
}

/// A table cell: `display` is rendered HTML, `value` the raw string or number.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardCell {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl LeaderboardCell {
    /// The raw value rendered as text; numbers are formatted as-is.
    #[must_use]
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The raw value as a float, accepting numeric strings.
    #[must_use]
    pub fn value_f64(&self) -> Option<f64> {
        match self.value.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The raw value as an integer, accepting integral floats and numeric strings.
    #[must_use]
    pub fn value_i64(&self) -> Option<i64> {
        match self.value.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .and_then(|f| format!("{f:.0}").parse().ok())
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// wc/v3/system_status
// ---------------------------------------------------------------------------

/// The sections of the system status report that are kept locally.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatusApiResponse {
    #[serde(default)]
    pub environment: Option<Value>,
    #[serde(default)]
    pub database: Option<Value>,
    #[serde(default)]
    pub active_plugins: Option<Value>,
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub security: Option<Value>,
    #[serde(default)]
    pub pages: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_response_tolerates_missing_fields() {
        let body = serde_json::json!({
            "orderId": 25,
            "labelsData": [{ "label_id": 7 }]
        });
        let resp: ShippingLabelApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.order_id, Some(25));
        assert!(resp.paper_size.is_none());
        let items = resp.labels_data.unwrap();
        assert_eq!(items[0].label_id, Some(7));
        assert!(items[0].refund.is_none());
    }

    #[test]
    fn verify_request_serializes_type_and_address_1() {
        let address = ShippingLabelAddress {
            address: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            ..ShippingLabelAddress::default()
        };
        let body = serde_json::to_value(VerifyAddressRequest {
            address: &address,
            address_type: AddressType::Destination,
        })
        .unwrap();
        assert_eq!(body["type"], "destination");
        assert_eq!(body["address"]["address_1"], "1 Main St");
        assert_eq!(body["address"]["city"], "Springfield");
    }

    #[test]
    fn leaderboard_cell_reads_numbers_and_numeric_strings() {
        let cell: LeaderboardCell =
            serde_json::from_value(serde_json::json!({ "display": "3", "value": 3 })).unwrap();
        assert_eq!(cell.value_i64(), Some(3));
        assert_eq!(cell.value_text().as_deref(), Some("3"));

        let cell: LeaderboardCell =
            serde_json::from_value(serde_json::json!({ "display": "x", "value": "54.5" }))
                .unwrap();
        assert_eq!(cell.value_f64(), Some(54.5));
        assert_eq!(cell.value_i64(), None);

        let cell: LeaderboardCell =
            serde_json::from_value(serde_json::json!({ "display": "x", "value": 4.0 })).unwrap();
        assert_eq!(cell.value_i64(), Some(4));
    }
}
