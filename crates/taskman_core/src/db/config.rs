//! Store configuration and its provider seam.
//!
//! # Responsibility
//! - Carry the database location, declared schema version and migration hook.
//! - Let callers swap where configuration comes from without touching the
//!   accessor.
//!
//! # Invariants
//! - `schema_version` must be >= `migrations::latest_version()`.
//! - The migration hook runs only while upgrading an older on-disk schema.

use super::DbResult;
use rusqlite::Transaction;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Schema version declared by this build.
pub const SCHEMA_VERSION: u32 = 4;

/// Procedure run inside the upgrade transaction with the previous on-disk
/// schema version.
pub type MigrationHook = Arc<dyn Fn(&Transaction<'_>, u32) -> DbResult<()> + Send + Sync>;

/// Placeholder migration used until a schema change needs data rewriting.
pub fn noop_migration(_tx: &Transaction<'_>, _old_version: u32) -> DbResult<()> {
    Ok(())
}

/// Everything needed to obtain one ready store handle.
#[derive(Clone)]
pub struct StoreConfiguration {
    pub path: PathBuf,
    pub schema_version: u32,
    pub migration: MigrationHook,
}

impl StoreConfiguration {
    /// Configuration for `path` with the current schema and a no-op hook.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema_version: SCHEMA_VERSION,
            migration: Arc::new(noop_migration),
        }
    }

    pub fn with_schema_version(mut self, schema_version: u32) -> Self {
        self.schema_version = schema_version;
        self
    }

    pub fn with_migration<F>(mut self, migration: F) -> Self
    where
        F: Fn(&Transaction<'_>, u32) -> DbResult<()> + Send + Sync + 'static,
    {
        self.migration = Arc::new(migration);
        self
    }
}

impl Debug for StoreConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfiguration")
            .field("path", &self.path)
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

/// Source of store configuration, consulted once per obtained handle.
pub trait ConfigurationProvider: Send + Sync {
    fn fetch_configuration(&self) -> StoreConfiguration;
}

/// Provider for a fixed database file with default schema settings.
#[derive(Debug, Clone)]
pub struct DefaultConfigurationProvider {
    path: PathBuf,
}

impl DefaultConfigurationProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationProvider for DefaultConfigurationProvider {
    fn fetch_configuration(&self) -> StoreConfiguration {
        StoreConfiguration::new(self.path.clone())
    }
}

impl ConfigurationProvider for StoreConfiguration {
    fn fetch_configuration(&self) -> StoreConfiguration {
        self.clone()
    }
}
