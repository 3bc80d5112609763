//! HTTP client for the WooCommerce REST API of a single site.
//!
//! Wraps `reqwest` with WooCommerce-specific error handling, optional basic
//! auth, and typed response deserialization. Every endpoint returns
//! `Ok(None)` when the site answers 2xx with an empty or `null` body, so the
//! stores can tell "no payload" apart from a transport failure.

mod leaderboards;
mod shipping_labels;
mod system_status;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use wcsdk_core::{AppConfig, Site};

use crate::error::ApiError;
use crate::types::WpErrorBody;

const DEFAULT_USER_AGENT: &str = "wcsdk/0.1 (store-data)";

/// Client for the WooCommerce REST API.
///
/// One client serves any number of sites; the site is passed per call and
/// its URL is the REST root (`{site.url}/wp-json/`).
pub struct WooClient {
    client: Client,
    credentials: Option<(String, String)>,
}

impl WooClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            credentials: None,
        })
    }

    /// Creates a client from the loaded application config, including the
    /// consumer key/secret pair when both are set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ApiError> {
        let user_agent = if config.api_user_agent.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            config.api_user_agent.as_str()
        };
        let client = Self::new(config.api_request_timeout_secs, user_agent)?;
        Ok(match config.credentials() {
            Some((key, secret)) => client.with_credentials(key, secret),
            None => client,
        })
    }

    /// Authenticates every request with HTTP basic auth using a WooCommerce
    /// consumer key and secret.
    #[must_use]
    pub fn with_credentials(mut self, consumer_key: &str, consumer_secret: &str) -> Self {
        self.credentials = Some((consumer_key.to_owned(), consumer_secret.to_owned()));
        self
    }

    /// Builds `{site.url}/wp-json/{path}` with percent-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidSiteUrl`] if the site URL does not parse.
    fn build_url(site: &Site, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}/wp-json/{path}", site.url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidSiteUrl {
            site_url: site.url.clone(),
            reason: e.to_string(),
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        site: &Site,
        url: Url,
    ) -> Result<Option<T>, ApiError> {
        let request = self.client.get(url.clone());
        self.send_json(site, request, &url).await
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        site: &Site,
        url: Url,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError> {
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send_json(site, request, &url).await
    }

    /// Sends the request, surfaces non-2xx statuses as [`ApiError::Api`], and
    /// parses the body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Api`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body does not match `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        site: &Site,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<Option<T>, ApiError> {
        let request = match &self.credentials {
            Some((key, secret)) => request.basic_auth(key, Some(secret)),
            None => request,
        };

        tracing::debug!(site_id = site.id, url = %url, "sending WooCommerce request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<WpErrorBody>(&body).ok();
            let (code, message) = match parsed {
                Some(err) => (
                    err.code.unwrap_or_default(),
                    err.message.unwrap_or_default(),
                ),
                None => (String::new(), body.trim().to_owned()),
            };
            tracing::warn!(
                site_id = site.id,
                status = status.as_u16(),
                code = %code,
                "WooCommerce request failed"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        parse_payload(&body, url.path())
    }
}

/// Parses a 2xx body; an empty body or a JSON `null` is no payload.
fn parse_payload<T: DeserializeOwned>(body: &str, context: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: &str) -> Site {
        Site::new(321, url)
    }

    #[test]
    fn build_url_joins_rest_root_and_path() {
        let url = WooClient::build_url(&site("https://shop.example"), "wc/v3/system_status", &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://shop.example/wp-json/wc/v3/system_status");
    }

    #[test]
    fn build_url_strips_trailing_slash_and_encodes_query() {
        let url = WooClient::build_url(
            &site("https://shop.example/"),
            "wc/v1/connect/label/print",
            &[("paper_size", "a4 letter"), ("caption_csv", "")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/wp-json/wc/v1/connect/label/print?paper_size=a4+letter&caption_csv="
        );
    }

    #[test]
    fn build_url_rejects_relative_site_url() {
        let err = WooClient::build_url(&site("shop.example"), "wc/v3/system_status", &[])
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidSiteUrl { .. }));
    }

    #[test]
    fn parse_payload_treats_empty_and_null_as_absent() {
        assert!(parse_payload::<serde_json::Value>("", "x").unwrap().is_none());
        assert!(parse_payload::<serde_json::Value>("  null ", "x")
            .unwrap()
            .is_none());
        assert!(parse_payload::<serde_json::Value>("{}", "x").unwrap().is_some());
    }

    #[test]
    fn parse_payload_reports_malformed_json() {
        let err = parse_payload::<serde_json::Value>("{oops", "/wp-json/x").unwrap_err();
        assert!(matches!(err, ApiError::Deserialize { ref context, .. } if context == "/wp-json/x"));
    }
}
