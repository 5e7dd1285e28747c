//! Error types for RSocket npm export.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_core::{Error, Result};
//!
//! fn require_route(route: &str) -> Result<()> {
//!     if route.is_empty() {
//!         return Err(Error::InvalidContract {
//!             service: "AccountServiceImpl".to_string(),
//!             reason: "missing class-level route".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_route("").unwrap_err();
//! assert!(err.is_invalid_contract());
//! ```

use thiserror::Error;

/// Main error type for RSocket npm export.
///
/// Generation itself is total over well-formed contracts; these variants
/// cover malformed input documents, configuration problems, and template
/// failures (which indicate a defect rather than a transient condition).
#[derive(Error, Debug)]
pub enum Error {
    /// The reflection document does not describe an exportable service.
    ///
    /// Raised when the service carries no class-level route marker or the
    /// document is otherwise structurally unusable.
    #[error("Invalid contract for '{service}': {reason}")]
    InvalidContract {
        /// Implementation type identity of the offending service
        service: String,
        /// Why the contract was rejected
        reason: String,
    },

    /// No catalogued service matches the requested name.
    #[error("Contract not found: {name}")]
    ContractNotFound {
        /// Short name or route that was looked up
        name: String,
    },

    /// A type expression in the reflection document could not be parsed.
    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression {
        /// The raw expression text
        expression: String,
        /// Description of the syntax problem
        reason: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, unreadable, or missing
    /// required fields.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Template registration or rendering failed.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Name of the template involved
        template: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error for domain types.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// I/O failure while reading documents or configuration.
    #[error("I/O error at {path}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is an invalid contract error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::Error;
    ///
    /// let err = Error::InvalidContract {
    ///     service: "Foo".to_string(),
    ///     reason: "no route".to_string(),
    /// };
    /// assert!(err.is_invalid_contract());
    /// ```
    #[must_use]
    pub const fn is_invalid_contract(&self) -> bool {
        matches!(self, Self::InvalidContract { .. })
    }

    /// Returns `true` if the requested contract does not exist.
    ///
    /// The HTTP boundary maps this to `404 Not Found`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::Error;
    ///
    /// let err = Error::ContractNotFound {
    ///     name: "AccountService".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ContractNotFound { .. })
    }

    /// Returns `true` if this is a type expression error.
    #[must_use]
    pub const fn is_type_expression_error(&self) -> bool {
        matches!(self, Self::InvalidTypeExpression { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "Invalid bind address".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
