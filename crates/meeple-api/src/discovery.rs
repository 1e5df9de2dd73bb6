//! Query-driven filtering of the endpoint catalog.
//!
//! `GET /api` runs the catalog through a fixed pipeline of filter stages,
//! then a pagination stage over whatever paths survive, counted in the
//! order the `/api` entry advertises them. Criteria that are absent or
//! unusable leave their stage as a no-op.

use std::collections::HashMap;

use meeple_core::params::{DEFAULT_LIMIT, positive_int};

use crate::catalog::{EndpointCatalog, MethodDescriptor, MethodKind};

/// Raw filter criteria lifted from `/api`'s query string.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryCriteria {
    /// Keep only this verb's descriptors.
    pub method: Option<String>,
    /// Keep descriptors whose status matches exactly.
    pub status: Option<String>,
    /// `"true"`/`"false"`: keep descriptors with (or without) keys.
    pub has_keys: Option<String>,
    /// `"true"`/`"false"`: keep descriptors with (or without) queries.
    pub has_queries: Option<String>,
    /// Keep descriptors whose request-body shape matches exactly.
    pub req_body: Option<String>,
    /// Keep descriptors whose response-body shape matches exactly.
    pub res_body: Option<String>,
    /// Page size, validated at pagination time.
    pub limit: Option<String>,
    /// Page number, validated at pagination time.
    pub page: Option<String>,
}

impl DiscoveryCriteria {
    /// Lifts the known criteria from raw query parameters; anything else
    /// is ignored.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            method: params.get("method").cloned(),
            status: params.get("status").cloned(),
            has_keys: params.get("hasKeys").cloned(),
            has_queries: params.get("hasQueries").cloned(),
            req_body: params.get("req_body").cloned(),
            res_body: params.get("res_body").cloned(),
            limit: params.get("limit").cloned(),
            page: params.get("p").cloned(),
        }
    }
}

type Stage = fn(EndpointCatalog, &DiscoveryCriteria) -> EndpointCatalog;

/// Filter stages, applied in order before pagination.
const STAGES: &[Stage] = &[
    filter_method,
    filter_status,
    filter_has_keys,
    filter_has_queries,
    filter_req_body,
    filter_res_body,
];

/// Runs `criteria` over `catalog` and returns the surviving page.
#[must_use]
pub fn query_endpoints(
    catalog: &EndpointCatalog,
    criteria: &DiscoveryCriteria,
) -> EndpointCatalog {
    let order = catalog.page_order();
    let mut view = catalog.clone();
    for stage in STAGES {
        view = stage(view, criteria);
    }
    paginate(view, criteria, &order)
}

/// Drops method descriptors failing `keep`; entries left with no methods
/// drop out entirely.
fn retain(
    mut view: EndpointCatalog,
    keep: impl Fn(MethodKind, &MethodDescriptor) -> bool,
) -> EndpointCatalog {
    for entry in &mut view.entries {
        entry
            .methods
            .retain(|(kind, descriptor)| keep(*kind, descriptor));
    }
    view.entries.retain(|entry| !entry.methods.is_empty());
    view
}

fn filter_method(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match criteria.method.as_deref().and_then(MethodKind::parse) {
        Some(wanted) => retain(view, |kind, _| kind == wanted),
        None => view,
    }
}

fn filter_status(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match criteria.status.as_deref() {
        Some(status) if !status.is_empty() => retain(view, |_, d| d.status == status),
        _ => view,
    }
}

fn bool_criterion(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

fn filter_has_keys(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match bool_criterion(criteria.has_keys.as_deref()) {
        Some(wanted) => retain(view, |_, d| !d.keys.is_empty() == wanted),
        None => view,
    }
}

fn filter_has_queries(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match bool_criterion(criteria.has_queries.as_deref()) {
        Some(wanted) => retain(view, |_, d| !d.queries.is_empty() == wanted),
        None => view,
    }
}

fn filter_req_body(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match criteria.req_body.as_deref() {
        Some(shape) if !shape.is_empty() => retain(view, |_, d| d.req_body.as_str() == shape),
        _ => view,
    }
}

fn filter_res_body(view: EndpointCatalog, criteria: &DiscoveryCriteria) -> EndpointCatalog {
    match criteria.res_body.as_deref() {
        Some(shape) if !shape.is_empty() => retain(view, |_, d| d.res_body.as_str() == shape),
        _ => view,
    }
}

/// Windows the surviving entries, counting positions in advertised order
/// so filters never change which page a surviving path lands on relative
/// to its surviving neighbours.
fn paginate(
    view: EndpointCatalog,
    criteria: &DiscoveryCriteria,
    order: &[&'static str],
) -> EndpointCatalog {
    let limit = positive_int(criteria.limit.as_deref(), DEFAULT_LIMIT);
    let page = positive_int(criteria.page.as_deref(), 1);
    let start = (page - 1).saturating_mul(limit);
    let window = start..start.saturating_add(limit);

    let mut survivors = view.entries;
    let mut entries = Vec::new();
    let mut index: i64 = 0;
    for path in order {
        let Some(pos) = survivors.iter().position(|entry| entry.path == *path) else {
            continue;
        };
        let entry = survivors.swap_remove(pos);
        if window.contains(&index) {
            entries.push(entry);
        }
        index += 1;
    }
    EndpointCatalog { entries }
}
