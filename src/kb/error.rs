use thiserror::Error;

/// Errors returned by knowledge-base lookups.
///
/// Callers recover from every variant locally (per mention, candidate or
/// page); none of them aborts a pipeline run.
#[derive(Debug, Error)]
pub enum KbError {
    /// Transport failure (connect, timeout, body read).
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    /// Non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Body did not have the expected shape.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("page not found: {title}")]
    PageNotFound { title: String },

    /// Title resolves to a disambiguation page.
    #[error("page is a disambiguation page: {title}")]
    AmbiguousPage { title: String },
}

impl KbError {
    pub(crate) fn request(endpoint: &str, err: reqwest::Error) -> Self {
        Self::Request {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// `true` for per-page failures that only disqualify one candidate.
    pub fn is_page_error(&self) -> bool {
        matches!(self, Self::PageNotFound { .. } | Self::AmbiguousPage { .. })
    }
}
