//! Errors of the export endpoint and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rsocket_export_files::FilesError;
use thiserror::Error;
use tracing::{error, warn};

/// Failure while serving an export request.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No catalogued service matches, or it has no callable methods
    #[error("No exportable RSocket service for package '{package}'")]
    NotFound {
        /// Requested package path
        package: String,
    },

    /// Requested path is not a usable npm package name
    #[error("Invalid package name '{package}': {source}")]
    InvalidPackageName {
        /// Requested package path
        package: String,
        /// Validation failure
        #[source]
        source: rsocket_export_core::Error,
    },

    /// Rendering or manifest serialization failed
    #[error("Package generation failed: {0}")]
    Generation(#[from] rsocket_export_core::Error),

    /// Packing the tarball failed
    #[error("Package archive failed: {0}")]
    Archive(#[from] FilesError),
}

impl ExportError {
    /// Returns `true` if no exportable service matched the request.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the request itself was malformed.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidPackageName { .. })
    }

    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidPackageName { .. } => StatusCode::BAD_REQUEST,
            Self::Generation(_) | Self::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            warn!("{self}");
        } else {
            error!("{self}");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err = ExportError::NotFound {
            package: "@demo/Missing".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_generation_is_server_error() {
        let err = ExportError::from(rsocket_export_core::Error::TemplateError {
            template: "rsocket/index.js".to_string(),
            message: "boom".to_string(),
        });
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = ExportError::NotFound {
            package: "x".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
