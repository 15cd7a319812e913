use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use crate::state::AppState;

/// Scheme, host and base path the current request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    scheme: String,
    host: String,
    base_path: String,
}

impl RequestOrigin {
    /// `base_path` is normalized to either empty or `/segment` without a
    /// trailing slash.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        base_path: impl AsRef<str>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            base_path: normalize_base_path(base_path.as_ref()),
        }
    }

    /// Resolve the origin from request headers, preferring the
    /// `X-Forwarded-*` headers set by a reverse proxy. `None` when no host
    /// can be determined.
    pub fn from_parts(parts: &Parts, base_path: &str) -> Option<Self> {
        let host = forwarded(&parts.headers, "x-forwarded-host")
            .or_else(|| header_str(&parts.headers, header::HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.as_str().to_string()))?;

        let scheme = forwarded(&parts.headers, "x-forwarded-proto")
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        Some(Self::new(scheme, host, base_path))
    }

    /// Absolute URL for `path`, which must start with `/`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.base_path, path)
    }
}

/// Extracts the [`RequestOrigin`] of the current request, if any.
pub struct CurrentOrigin(pub Option<RequestOrigin>);

impl FromRequestParts<AppState> for CurrentOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentOrigin(RequestOrigin::from_parts(
            parts,
            &state.config.server.base_path,
        )))
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First entry of a possibly comma-separated forwarding header.
fn forwarded(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name)
        .and_then(|v| v.split(',').next().map(|s| s.trim().to_string()))
        .filter(|v| !v.is_empty())
}

pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
