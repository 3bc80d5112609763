pub mod client;
pub mod error;
pub mod mapper;
pub mod types;

pub use client::WooClient;
pub use error::ApiError;
pub use mapper::{map_product_leaderboard, map_shipping_labels, map_system_status};
pub use types::{
    AddressFieldErrors, LabelItem, LeaderboardCell, LeaderboardsApiResponse,
    PrintShippingLabelResponse, RefundShippingLabelResponse, ShippingLabelApiResponse,
    SystemStatusApiResponse, VerifyAddressResponse,
};
