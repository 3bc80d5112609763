use std::collections::HashSet;

use wcsdk_core::{ShippingLabel, Site};

use crate::types::ShippingLabelApiResponse;

/// Converts a label response into one [`ShippingLabel`] per `labelsData`
/// entry.
///
/// The order-level `paperSize`, `formData` and `storeOptions` are copied
/// onto every label. Entries without a `label_id` cannot be stored and are
/// skipped with a warning, as is a response with no `orderId`. A repeated
/// `label_id` keeps its first entry only.
#[must_use]
pub fn map_shipping_labels(response: &ShippingLabelApiResponse, site: &Site) -> Vec<ShippingLabel> {
    let Some(order_id) = response.order_id else {
        tracing::warn!(site_id = site.id, "label response has no order id; skipping");
        return Vec::new();
    };

    let Some(items) = response.labels_data.as_deref() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| {
            let Some(label_id) = item.label_id else {
                tracing::warn!(site_id = site.id, order_id, "label without label_id; skipping");
                return None;
            };
            if !seen.insert(label_id) {
                tracing::warn!(site_id = site.id, order_id, label_id, "duplicate label; skipping");
                return None;
            }
            Some(ShippingLabel {
                site_id: site.id,
                order_id,
                remote_shipping_label_id: label_id,
                tracking_number: item.tracking.clone(),
                carrier_id: item.carrier_id.clone(),
                date_created: item.created,
                service_name: item.service_name.clone(),
                status: item.status.clone(),
                package_name: item.package_name.clone(),
                rate: item.rate,
                refundable_amount: item.refundable_amount,
                currency: item.currency.clone(),
                paper_size: response.paper_size.clone(),
                product_names: item.product_names.clone(),
                product_ids: item.product_ids.clone(),
                form_data: response.form_data.clone(),
                store_options: response.store_options.clone(),
                refund: item.refund.clone(),
            })
        })
        .collect()
}
