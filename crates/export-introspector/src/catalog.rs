//! Service discovery over a directory of reflection documents.

use crate::discovery::Introspector;
use crate::reflection::{ServiceReflection, is_document};
use crate::types::ServiceContract;
use rsocket_export_core::{Error, PackageName, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Set of exportable services known to one process.
///
/// Contracts are kept in file-name order so that listings are stable.
///
/// # Examples
///
/// ```
/// use rsocket_export_introspector::{Introspector, ServiceCatalog, ServiceReflection};
///
/// let doc = ServiceReflection::from_json_str(r#"{
///     "type_name": "org.demo.AccountServiceImpl",
///     "route": "org.demo.AccountService"
/// }"#).unwrap();
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.insert(Introspector::new().introspect(&doc).unwrap());
///
/// assert!(catalog.find_by_short_name("AccountService").is_some());
/// assert!(catalog.find_by_short_name("Missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    contracts: Vec<ServiceContract>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contracts: Vec::new(),
        }
    }

    /// Loads every `.json`/`.toml` document in `dir`.
    ///
    /// Documents without a class-level route do not describe an RSocket
    /// service and are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory cannot be read, or any parse or
    /// type-expression error from an individual document.
    pub fn load_dir(dir: &Path, introspector: &Introspector) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_document(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        for path in paths {
            let doc = ServiceReflection::from_path(&path)?;
            match introspector.introspect(&doc) {
                Ok(contract) => catalog.insert(contract),
                Err(e) if e.is_invalid_contract() => {
                    debug!("Skipping {}: {e}", path.display());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Loaded {} services from {}",
            catalog.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Adds a contract. A contract with the same route replaces the old one.
    pub fn insert(&mut self, contract: ServiceContract) {
        if let Some(existing) = self
            .contracts
            .iter_mut()
            .find(|c| c.route == contract.route)
        {
            *existing = contract;
        } else {
            self.contracts.push(contract);
        }
    }

    /// Finds the service whose route ends in `short` as its final dotted
    /// segment.
    #[must_use]
    pub fn find_by_short_name(&self, short: &str) -> Option<&ServiceContract> {
        self.contracts.iter().find(|c| c.short_name() == short)
    }

    /// Services that advertise an npm package name, in catalog order.
    pub fn packages(&self) -> impl Iterator<Item = (&PackageName, &ServiceContract)> {
        self.contracts
            .iter()
            .filter_map(|c| c.npm_package.as_ref().map(|name| (name, c)))
    }

    /// Iterates over all contracts.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceContract> {
        self.contracts.iter()
    }

    /// Number of services.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns `true` if no service is known.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl FromIterator<ServiceContract> for ServiceCatalog {
    fn from_iter<I: IntoIterator<Item = ServiceContract>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for contract in iter {
            catalog.insert(contract);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_dir_mixed_formats() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "b.json",
            r#"{"type_name":"a.UserServiceImpl","route":"a.UserService","npm_package":"@demo/UserService"}"#,
        );
        write(
            dir.path(),
            "a.toml",
            "type_name = \"a.AccountServiceImpl\"\nroute = \"a.AccountService\"\n",
        );
        write(dir.path(), "notes.txt", "ignored");
        write(dir.path(), "plain.json", r#"{"type_name":"a.Helper"}"#);

        let catalog = ServiceCatalog::load_dir(dir.path(), &Introspector::new()).unwrap();
        assert_eq!(catalog.len(), 2);

        let routes: Vec<_> = catalog.iter().map(|c| c.route.as_str()).collect();
        assert_eq!(routes, ["a.AccountService", "a.UserService"]);

        let packages: Vec<_> = catalog.packages().map(|(n, _)| n.as_str()).collect();
        assert_eq!(packages, ["@demo/UserService"]);
    }

    #[test]
    fn test_load_dir_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.json", "{");
        assert!(ServiceCatalog::load_dir(dir.path(), &Introspector::new()).is_err());
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceCatalog::load_dir(&dir.path().join("nope"), &Introspector::new())
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_insert_replaces_same_route() {
        let doc = ServiceReflection::from_json_str(
            r#"{"type_name":"a.FooImpl","route":"a.Foo"}"#,
        )
        .unwrap();
        let contract = Introspector::new().introspect(&doc).unwrap();

        let catalog: ServiceCatalog = vec![contract.clone(), contract].into_iter().collect();
        assert_eq!(catalog.len(), 1);
    }
}
