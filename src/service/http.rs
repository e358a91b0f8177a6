use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::{RouteService, ServiceError};
use crate::model::{RouteRequest, RouteSummary};

/// [`RouteService`] backed by a JSON-over-HTTP POST endpoint.
#[derive(Debug, Clone)]
pub struct HttpRouteService {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRouteService {
    /// Creates a client that posts to `endpoint`.
    ///
    /// No request timeout is configured; a request stays in flight until
    /// the service or the transport resolves it.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ServiceError::Client)?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RouteService for HttpRouteService {
    fn optimize(&self, request: RouteRequest) -> BoxFuture<'static, Result<RouteSummary, ServiceError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        async move { post_route(&client, &endpoint, &request).await }.boxed()
    }
}

async fn post_route(
    client: &reqwest::Client,
    endpoint: &str,
    request: &RouteRequest,
) -> Result<RouteSummary, ServiceError> {
    let response = client
        .post(endpoint)
        .json(request)
        .send()
        .await
        .map_err(ServiceError::Network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body: Bytes = response.bytes().await.map_err(ServiceError::Network)?;
    decode_summary(&body)
}

/// Decodes a success body, rejecting anything that is not a full summary.
fn decode_summary(body: &[u8]) -> Result<RouteSummary, ServiceError> {
    Ok(serde_json::from_slice(body)?)
}
