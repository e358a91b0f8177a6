//! Client side of the route optimization service.

mod error;
mod http;

use futures::future::BoxFuture;

use crate::model::{RouteRequest, RouteSummary};

pub use error::ServiceError;
pub use http::HttpRouteService;

/// Something that can turn a [`RouteRequest`] into a [`RouteSummary`].
///
/// The returned future owns everything it needs so it can be spawned.
pub trait RouteService: Send + Sync + 'static {
    fn optimize(&self, request: RouteRequest) -> BoxFuture<'static, Result<RouteSummary, ServiceError>>;
}
