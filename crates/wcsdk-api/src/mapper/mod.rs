//! Mapping of WooCommerce API responses into the domain records persisted
//! by the stores.
//!
//! Mappers are pure: they never touch the network or the database, and an
//! optional field absent from the response stays `None` in the record.

mod leaderboards;
mod shipping_labels;
mod system_status;

pub use leaderboards::{decode_html_entities, map_product_leaderboard, PRODUCTS_LEADERBOARD_ID};
pub use shipping_labels::map_shipping_labels;
pub use system_status::map_system_status;
