use thiserror::Error;
use wcsdk_core::{GenericErrorType, WooError, WooErrorType};

/// Errors returned by the WooCommerce REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered with a non-2xx status. `code` and `message` come from
    /// the WordPress error body when one was sent.
    #[error("WooCommerce API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid site URL \"{site_url}\": {reason}")]
    InvalidSiteUrl { site_url: String, reason: String },
}

impl From<ApiError> for WooError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => classify_transport(&e),
            ApiError::Api {
                status,
                code,
                message,
            } => {
                let original = classify_status(status);
                let error_type = classify_code(status, &code);
                let message = if message.is_empty() {
                    None
                } else {
                    Some(message)
                };
                WooError::new(error_type, original, message)
            }
            ApiError::Deserialize { context, source } => WooError::new(
                WooErrorType::InvalidResponse,
                GenericErrorType::ParseError,
                Some(format!("{context}: {source}")),
            ),
            ApiError::InvalidSiteUrl { site_url, reason } => {
                WooError::generic_with_message(format!("invalid site URL \"{site_url}\": {reason}"))
            }
        }
    }
}

fn classify_transport(e: &reqwest::Error) -> WooError {
    let message = Some(e.to_string());
    if e.is_timeout() {
        return WooError::new(WooErrorType::Timeout, GenericErrorType::Timeout, message);
    }
    if e.is_connect() {
        return WooError::new(
            WooErrorType::GenericError,
            GenericErrorType::NoConnection,
            message,
        );
    }
    if e.is_decode() {
        return WooError::new(
            WooErrorType::InvalidResponse,
            GenericErrorType::ParseError,
            message,
        );
    }
    if let Some(status) = e.status() {
        let status = status.as_u16();
        return WooError::new(classify_code(status, ""), classify_status(status), message);
    }
    WooError::new(
        WooErrorType::GenericError,
        GenericErrorType::NetworkError,
        message,
    )
}

/// Maps an HTTP status onto the transport-level cause.
fn classify_status(status: u16) -> GenericErrorType {
    match status {
        401 => GenericErrorType::HttpAuthError,
        403 => GenericErrorType::NotAuthenticated,
        404 => GenericErrorType::NotFound,
        408 | 504 => GenericErrorType::Timeout,
        500..=599 => GenericErrorType::ServerError,
        _ => GenericErrorType::InvalidResponse,
    }
}

/// Maps the WordPress error `code` (falling back to the status) onto the
/// WooCommerce-level classification.
fn classify_code(status: u16, code: &str) -> WooErrorType {
    if code == "rest_no_route" {
        return WooErrorType::ApiNotFound;
    }
    if code.ends_with("invalid_id") {
        return WooErrorType::InvalidId;
    }
    if code == "rest_invalid_param" {
        return WooErrorType::InvalidParam;
    }
    match status {
        401 | 403 => WooErrorType::AuthorizationRequired,
        408 | 504 => WooErrorType::Timeout,
        _ => WooErrorType::GenericError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: &str, message: &str) -> WooError {
        ApiError::Api {
            status,
            code: code.to_string(),
            message: message.to_string(),
        }
        .into()
    }

    #[test]
    fn unauthorized_maps_to_authorization_required() {
        let err = api(401, "woocommerce_rest_cannot_view", "Sorry, you cannot list resources.");
        assert_eq!(err.error_type, WooErrorType::AuthorizationRequired);
        assert_eq!(err.original, GenericErrorType::HttpAuthError);
        assert_eq!(
            err.message.as_deref(),
            Some("Sorry, you cannot list resources.")
        );
    }

    #[test]
    fn forbidden_maps_to_not_authenticated() {
        let err = api(403, "rest_forbidden", "");
        assert_eq!(err.error_type, WooErrorType::AuthorizationRequired);
        assert_eq!(err.original, GenericErrorType::NotAuthenticated);
        assert!(err.message.is_none());
    }

    #[test]
    fn missing_route_maps_to_api_not_found() {
        let err = api(404, "rest_no_route", "No route was found");
        assert_eq!(err.error_type, WooErrorType::ApiNotFound);
        assert_eq!(err.original, GenericErrorType::NotFound);
    }

    #[test]
    fn invalid_id_codes_map_to_invalid_id() {
        let err = api(404, "woocommerce_rest_shop_order_invalid_id", "Invalid ID.");
        assert_eq!(err.error_type, WooErrorType::InvalidId);
    }

    #[test]
    fn invalid_param_maps_to_invalid_param() {
        let err = api(400, "rest_invalid_param", "Invalid parameter(s): per_page");
        assert_eq!(err.error_type, WooErrorType::InvalidParam);
        assert_eq!(err.original, GenericErrorType::InvalidResponse);
    }

    #[test]
    fn server_errors_map_to_server_error() {
        let err = api(502, "", "Bad gateway");
        assert_eq!(err.error_type, WooErrorType::GenericError);
        assert_eq!(err.original, GenericErrorType::ServerError);
    }

    #[test]
    fn deserialize_maps_to_parse_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: WooError = ApiError::Deserialize {
            context: "system_status".to_string(),
            source,
        }
        .into();
        assert_eq!(err.error_type, WooErrorType::InvalidResponse);
        assert_eq!(err.original, GenericErrorType::ParseError);
        assert!(err
            .message
            .as_deref()
            .is_some_and(|m| m.starts_with("system_status")));
    }
}
