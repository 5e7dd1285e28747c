//! Strong domain types for RSocket npm export.
//!
//! Newtypes keep routes, package names, and version tags from being mixed
//! up with arbitrary strings.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_core::{PackageName, RouteName};
//!
//! let route = RouteName::new("org.mvnsearch.user.AccountService");
//! assert_eq!(route.short_name(), "AccountService");
//!
//! let package = PackageName::new("@UserService/AccountService").unwrap();
//! assert_eq!(package.short_name(), "AccountService");
//! ```

use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Class-level route of an RSocket service (newtype over String).
///
/// Method routes are built as `<route>.<methodName>`.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::RouteName;
///
/// let route = RouteName::new("org.mvnsearch.user.AccountService");
/// assert_eq!(route.method_route("findById"), "org.mvnsearch.user.AccountService.findById");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteName(String);

impl RouteName {
    /// Creates a new route name.
    #[inline]
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }

    /// Returns the route as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final dotted segment of the route.
    ///
    /// This is the name the export endpoint matches package paths against.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::RouteName;
    ///
    /// assert_eq!(RouteName::new("a.b.Service").short_name(), "Service");
    /// assert_eq!(RouteName::new("Service").short_name(), "Service");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Builds the full route of one method.
    #[must_use]
    pub fn method_route(&self, method: &str) -> String {
        format!("{}.{method}", self.0)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

static PACKAGE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[A-Za-z0-9][A-Za-z0-9._~-]*/)?[A-Za-z0-9][A-Za-z0-9._~-]*$")
        .unwrap_or_else(|e| panic!("package name pattern must compile: {e}"))
});

/// Validated npm package name, optionally scoped.
///
/// Upper-case letters are accepted because exported packages are commonly
/// named after the service (`@UserService/AccountService`).
///
/// # Examples
///
/// ```
/// use rsocket_export_core::PackageName;
///
/// assert!(PackageName::new("account-service").is_ok());
/// assert!(PackageName::new("@UserService/AccountService").is_ok());
/// assert!(PackageName::new("../etc/passwd").is_err());
/// assert!(PackageName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Maximum length accepted by the npm registry.
    pub const MAX_LENGTH: usize = 214;

    /// Creates a validated package name.
    ///
    /// A single leading `/` (as found in request paths) is stripped.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValidationError` if the name is empty, too long, or
    /// contains characters outside `[A-Za-z0-9._~-]` (plus one `@scope/`).
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.strip_prefix('/').unwrap_or(&name);

        if trimmed.is_empty() {
            return Err(Error::ValidationError {
                field: "package_name".to_string(),
                reason: "package name cannot be empty".to_string(),
            });
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(Error::ValidationError {
                field: "package_name".to_string(),
                reason: format!("package name exceeds {} characters", Self::MAX_LENGTH),
            });
        }

        if !PACKAGE_NAME_PATTERN.is_match(trimmed) {
            return Err(Error::ValidationError {
                field: "package_name".to_string(),
                reason: format!("'{trimmed}' is not a valid npm package name"),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the package name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the segment after the scope, i.e. the service short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::PackageName;
    ///
    /// let name = PackageName::new("@UserService/AccountService").unwrap();
    /// assert_eq!(name.short_name(), "AccountService");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PackageName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

/// Version tag written into the generated manifest.
///
/// Callers supply it; the generators never read the clock themselves so that
/// two runs with the same inputs produce identical bytes.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::PackageVersion;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(PackageVersion::from_date(date).as_str(), "2024.03.07");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Creates a version from an arbitrary caller-supplied tag.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Creates a date-stamped version in `YYYY.MM.DD` form.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y.%m.%d").to_string())
    }

    /// Date-stamped version for the current local day.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Returns the version as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
