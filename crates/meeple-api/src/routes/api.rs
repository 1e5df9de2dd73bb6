//! `GET /api`: the filterable endpoint catalog.

use std::collections::HashMap;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::catalog::{EndpointCatalog, catalog};
use crate::discovery::{DiscoveryCriteria, query_endpoints};
use crate::state::AppState;

/// Envelope for the catalog page.
#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    /// Surviving catalog entries, keyed by path.
    pub endpoints: EndpointCatalog,
}

/// Mounts the discovery route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api", get(get_endpoints))
}

/// Serves the catalog, filtered and paginated by the query string.
#[utoipa::path(
    get,
    path = "/api",
    tag = "discovery",
    responses((status = 200, description = "Filtered endpoint catalog, keyed by path"))
)]
pub(crate) async fn get_endpoints(
    Query(params): Query<HashMap<String, String>>,
) -> Json<EndpointsResponse> {
    let criteria = DiscoveryCriteria::from_query(&params);
    Json(EndpointsResponse {
        endpoints: query_endpoints(catalog(), &criteria),
    })
}
