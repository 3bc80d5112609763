use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use wcsdk_core::{Site, StatsGranularity, TopPerformerProduct};

use crate::types::{LeaderboardCell, LeaderboardsApiResponse};

/// `id` of the leaderboard that ranks products.
pub const PRODUCTS_LEADERBOARD_ID: &str = "products";

static PRODUCT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&](?:amp;)?(?:products|product_id)=(\d+)").expect("valid regex")
});
static CURRENCY_SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)woocommerce-Price-currencySymbol["']?\s*>(.*?)<"#).expect("valid regex")
});
static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([xX]?)([0-9a-fA-F]+);").expect("valid regex"));

/// Converts the `products` leaderboard into [`TopPerformerProduct`] records.
///
/// Each row is `[product, items sold, net revenue]`. The product id is read
/// from the link in the first cell; rows without one are skipped, and a
/// product listed twice keeps its first (higher ranked) row. A response with
/// no products leaderboard maps to an empty list.
#[must_use]
pub fn map_product_leaderboard(
    leaderboards: &[LeaderboardsApiResponse],
    site: &Site,
    granularity: StatsGranularity,
) -> Vec<TopPerformerProduct> {
    let Some(board) = leaderboards
        .iter()
        .find(|b| b.id.as_deref() == Some(PRODUCTS_LEADERBOARD_ID))
    else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    board
        .rows
        .iter()
        .filter_map(|row| map_row(row, site, granularity))
        .filter(|product| seen.insert(product.product_id))
        .collect()
}

fn map_row(
    row: &[LeaderboardCell],
    site: &Site,
    granularity: StatsGranularity,
) -> Option<TopPerformerProduct> {
    let product_cell = row.first()?;
    let Some(product_id) = product_cell.display.as_deref().and_then(extract_product_id) else {
        tracing::debug!(site_id = site.id, "leaderboard row without product link; skipping");
        return None;
    };
    let quantity_cell = row.get(1);
    let total_cell = row.get(2);

    Some(TopPerformerProduct {
        site_id: site.id,
        granularity,
        product_id,
        product_name: product_cell
            .value_text()
            .map(|name| decode_html_entities(&name)),
        currency: total_cell
            .and_then(|c| c.display.as_deref())
            .and_then(extract_currency_symbol),
        quantity: quantity_cell.and_then(LeaderboardCell::value_i64),
        total: total_cell.and_then(LeaderboardCell::value_f64),
    })
}

fn extract_product_id(display: &str) -> Option<i64> {
    PRODUCT_ID_RE
        .captures(display)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_currency_symbol(display: &str) -> Option<String> {
    let raw = CURRENCY_SYMBOL_RE.captures(display)?.get(1)?.as_str();
    let symbol = decode_html_entities(raw);
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

/// Decodes numeric (`&#36;`, `&#x24;`) and common named HTML entities.
#[must_use]
pub fn decode_html_entities(value: &str) -> String {
    let numeric = NUMERIC_ENTITY_RE.replace_all(value, |caps: &regex::Captures<'_>| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), |c| c.to_string())
    });

    numeric
        .replace("&nbsp;", "\u{a0}")
        .replace("&euro;", "€")
        .replace("&pound;", "£")
        .replace("&yen;", "¥")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
