//! HTTP routes of the export endpoint.

use crate::error::ExportError;
use crate::state::ExportState;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use rsocket_export_core::PackageVersion;
use std::sync::Arc;
use tracing::debug;

/// Media type of the package tarball.
pub const TARBALL_CONTENT_TYPE: &str = "application/tar+gzip";

/// Media type of the package listing.
pub const LISTING_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Builds the router.
///
/// `GET /npm/packages` lists advertised packages; every other path below
/// `/npm/` is a package request.
pub fn router(state: Arc<ExportState>) -> Router {
    Router::new()
        .route("/npm/packages", get(package_listing))
        .route("/npm/{*package_name}", get(npm_package))
        .with_state(state)
}

async fn npm_package(
    State(state): State<Arc<ExportState>>,
    Path(package_name): Path<String>,
) -> Result<Response, ExportError> {
    debug!("Package request for '{package_name}'");
    let bytes = state.export_package(&package_name, PackageVersion::today())?;
    Ok(([(header::CONTENT_TYPE, TARBALL_CONTENT_TYPE)], bytes).into_response())
}

async fn package_listing(State(state): State<Arc<ExportState>>) -> Response {
    (
        [(header::CONTENT_TYPE, LISTING_CONTENT_TYPE)],
        state.package_listing(),
    )
        .into_response()
}
