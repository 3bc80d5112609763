use wcsdk_core::{DateRange, Site, StatsGranularity};

use super::WooClient;
use crate::error::ApiError;
use crate::types::LeaderboardsApiResponse;

impl WooClient {
    /// Fetches all analytics leaderboards for a reporting window.
    ///
    /// `quantity` caps the rows per leaderboard; `None` leaves the server
    /// default in place.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the site returns a non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_leaderboards(
        &self,
        site: &Site,
        granularity: StatsGranularity,
        range: DateRange,
        quantity: Option<u32>,
    ) -> Result<Option<Vec<LeaderboardsApiResponse>>, ApiError> {
        let after = DateRange::format_bound(range.start);
        let before = DateRange::format_bound(range.end);
        let per_page = quantity.map(|q| q.to_string());

        let mut query = vec![
            ("after", after.as_str()),
            ("before", before.as_str()),
            ("interval", granularity.interval()),
        ];
        if let Some(per_page) = per_page.as_deref() {
            query.push(("per_page", per_page));
        }

        let url = Self::build_url(site, "wc-analytics/leaderboards", &query)?;
        self.get_json(site, url).await
    }
}
