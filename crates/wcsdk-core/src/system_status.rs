use serde::{Deserialize, Serialize};

/// Snapshot of a site's system status report.
///
/// One snapshot per site. Each section holds the compact JSON text of the
/// corresponding report subtree; sections the site did not report stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSystemStatus {
    pub site_id: i64,
    pub environment: Option<String>,
    pub database: Option<String>,
    pub active_plugins: Option<String>,
    pub theme: Option<String>,
    pub settings: Option<String>,
    pub security: Option<String>,
    pub pages: Option<String>,
}

impl SiteSystemStatus {
    /// Section names paired with their stored JSON, in report order.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("environment", self.environment.as_deref()),
            ("database", self.database.as_deref()),
            ("active_plugins", self.active_plugins.as_deref()),
            ("theme", self.theme.as_deref()),
            ("settings", self.settings.as_deref()),
            ("security", self.security.as_deref()),
            ("pages", self.pages.as_deref()),
        ]
    }
}
