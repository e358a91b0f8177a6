/// Errors raised while calling the route optimization service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, reset, timeout).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics only.
        body: String,
    },

    /// The response body did not match the expected summary shape.
    #[error("could not decode route summary: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
