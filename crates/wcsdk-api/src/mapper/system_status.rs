use serde_json::Value;
use wcsdk_core::{Site, SiteSystemStatus};

use crate::types::SystemStatusApiResponse;

/// Converts a system status report into the stored snapshot, keeping each
/// section as compact JSON text.
#[must_use]
pub fn map_system_status(response: &SystemStatusApiResponse, site: &Site) -> SiteSystemStatus {
    SiteSystemStatus {
        site_id: site.id,
        environment: section_text(response.environment.as_ref()),
        database: section_text(response.database.as_ref()),
        active_plugins: section_text(response.active_plugins.as_ref()),
        theme: section_text(response.theme.as_ref()),
        settings: section_text(response.settings.as_ref()),
        security: section_text(response.security.as_ref()),
        pages: section_text(response.pages.as_ref()),
    }
}

fn section_text(section: Option<&Value>) -> Option<String> {
    section.filter(|v| !v.is_null()).map(Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_become_compact_json_and_absent_ones_stay_none() {
        let resp: SystemStatusApiResponse = serde_json::from_value(serde_json::json!({
            "environment": { "home_url": "https://shop.example", "wp_version": "6.4" },
            "database": { "wc_database_version": "8.0.0" },
            "active_plugins": [{ "plugin": "woocommerce/woocommerce.php" }],
            "theme": null,
            "post_type_counts": [{ "type": "product", "count": "12" }]
        }))
        .unwrap();

        let status = map_system_status(&resp, &Site::new(321, "https://shop.example"));
        assert_eq!(status.site_id, 321);
        assert_eq!(
            status.database.as_deref(),
            Some(r#"{"wc_database_version":"8.0.0"}"#)
        );
        assert_eq!(
            status.active_plugins.as_deref(),
            Some(r#"[{"plugin":"woocommerce/woocommerce.php"}]"#)
        );
        assert!(status.environment.is_some());
        assert!(status.theme.is_none());
        assert!(status.settings.is_none());
        assert!(status.pages.is_none());
    }
}
