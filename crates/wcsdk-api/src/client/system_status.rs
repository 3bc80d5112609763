use wcsdk_core::Site;

use super::WooClient;
use crate::error::ApiError;
use crate::types::SystemStatusApiResponse;

impl WooClient {
    /// Fetches the system status report of a site.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the site returns a non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_system_status(
        &self,
        site: &Site,
    ) -> Result<Option<SystemStatusApiResponse>, ApiError> {
        let url = Self::build_url(site, "wc/v3/system_status", &[])?;
        self.get_json(site, url).await
    }
}
