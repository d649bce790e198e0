//! Collection registry
//!
//! Static catalog of the archive's record collections. The registry is built
//! once at startup (from the built-in catalog or a TOML file), validated, and
//! then shared read-only behind an `Arc` by the search and correlation
//! services.
//!
//! # Example
//!
//! ```ignore
//! use lineage_core::domain::registry::CollectionRegistry;
//!
//! let registry = CollectionRegistry::builtin()?;
//! let manifests = registry.by_slug("slave-manifests").unwrap();
//! assert_eq!(manifests.table, "slave_manifests");
//! ```

pub mod catalog;
pub mod descriptor;

pub use descriptor::{
    CollectionDescriptor, CollectionRef, DATE_CANDIDATES, ENSLAVER_CANDIDATES, FieldMapping,
    RoleHints, validate_identifier,
};

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// On-disk catalog format
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    cross_referenced: Vec<String>,
    collections: Vec<CollectionDescriptor>,
}

/// Validated, immutable set of collection descriptors
#[derive(Debug, Clone)]
pub struct CollectionRegistry {
    collections: Vec<CollectionDescriptor>,
    by_id: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
    cross_referenced: Vec<usize>,
}

impl CollectionRegistry {
    /// Build a registry from unresolved descriptors and a list of
    /// cross-referenced slugs
    pub fn new(descriptors: Vec<CollectionDescriptor>, cross_referenced: &[String]) -> Result<Self> {
        let mut collections = Vec::with_capacity(descriptors.len());
        let mut by_id = HashMap::new();
        let mut by_slug = HashMap::new();

        for descriptor in descriptors {
            let descriptor = descriptor.resolve()?;
            let index = collections.len();
            if by_id.insert(descriptor.id.clone(), index).is_some() {
                return Err(Error::RegistryError(format!(
                    "duplicate collection id '{}'",
                    descriptor.id
                )));
            }
            if by_slug.insert(descriptor.slug.clone(), index).is_some() {
                return Err(Error::RegistryError(format!(
                    "duplicate collection slug '{}'",
                    descriptor.slug
                )));
            }
            collections.push(descriptor);
        }

        let cross_referenced = cross_referenced
            .iter()
            .map(|slug| {
                by_slug.get(slug).copied().ok_or_else(|| {
                    Error::RegistryError(format!(
                        "cross-referenced collection '{}' is not in the catalog",
                        slug
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            collections = collections.len(),
            cross_referenced = cross_referenced.len(),
            "collection registry loaded"
        );

        Ok(Self {
            collections,
            by_id,
            by_slug,
            cross_referenced,
        })
    }

    /// The built-in catalog
    pub fn builtin() -> Result<Self> {
        let cross: Vec<String> = catalog::CROSS_REFERENCED
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(catalog::builtin_descriptors(), &cross)
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)
            .map_err(|e| Error::RegistryError(format!("invalid catalog: {}", e)))?;
        Self::new(file.collections, &file.cross_referenced)
    }

    /// Load a TOML catalog from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read catalog {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, otherwise the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// All collections in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CollectionDescriptor> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CollectionDescriptor> {
        self.by_id.get(id).map(|&i| &self.collections[i])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&CollectionDescriptor> {
        self.by_slug.get(slug).map(|&i| &self.collections[i])
    }

    /// Look up by id, falling back to slug
    pub fn find(&self, id_or_slug: &str) -> Result<&CollectionDescriptor> {
        self.get(id_or_slug)
            .or_else(|| self.by_slug(id_or_slug))
            .ok_or_else(|| Error::CollectionNotFound(id_or_slug.to_string()))
    }

    /// Collections searched by the correlation engine, in search order
    pub fn cross_referenced(&self) -> impl Iterator<Item = &CollectionDescriptor> {
        self.cross_referenced.iter().map(|&i| &self.collections[i])
    }
}
