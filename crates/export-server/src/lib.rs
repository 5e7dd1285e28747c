//! HTTP endpoint that serves generated npm packages.
//!
//! Each `GET /npm/<package>` resolves the service whose route ends in the
//! package's last segment, generates its package and answers with the
//! tarball, ready to be used as an npm dependency URL.
//!
//! # Examples
//!
//! ```no_run
//! use rsocket_export_core::ExportConfig;
//! use rsocket_export_introspector::ServiceCatalog;
//! use rsocket_export_server::{ExportState, router};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = Arc::new(ExportState::new(ServiceCatalog::new(), ExportConfig::default())?);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::ExportError;
pub use routes::{LISTING_CONTENT_TYPE, TARBALL_CONTENT_TYPE, router};
pub use state::ExportState;
