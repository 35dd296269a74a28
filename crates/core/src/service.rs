//! Shared entry point used by the presentation layer.
//!
//! [`CasebookService`] owns one [`TemplateRegistry`] and one [`RecordStore`], each behind its
//! own lock, and is cheap to clone. Templates and records are immutable once produced, so only
//! the two collections need guarding; no operation holds both locks at once.

use crate::builder::RecordBuilder;
use crate::catalog::TemplateCatalog;
use crate::config::CoreConfig;
use crate::error::CasebookResult;
use crate::record::{Record, RecordRow};
use crate::registry::TemplateRegistry;
use crate::store::RecordStore;
use crate::template::Template;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Counters shown on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CasebookStats {
    pub records: usize,
    pub templates: usize,
    pub care_types: usize,
}

/// Registry and store operations - no presentation concerns
#[derive(Clone, Debug)]
pub struct CasebookService {
    registry: Arc<RwLock<TemplateRegistry>>,
    store: Arc<RwLock<RecordStore>>,
}

impl CasebookService {
    /// Creates a service around an already populated registry and an empty store.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            store: Arc::new(RwLock::new(RecordStore::new())),
        }
    }

    /// Creates a service whose registry is built from `cfg`.
    ///
    /// # Errors
    ///
    /// Propagates catalog loading failures from [`TemplateRegistry::from_config`].
    pub fn from_config(cfg: &CoreConfig) -> CasebookResult<Self> {
        Ok(Self::new(TemplateRegistry::from_config(cfg)?))
    }

    /// Registered template keys, in registration order.
    pub fn template_keys(&self) -> Vec<String> {
        self.registry().keys()
    }

    /// Registered templates as owned clones, in registration order.
    pub fn templates(&self) -> Vec<(String, Template)> {
        self.registry()
            .templates()
            .map(|(key, template)| (key.to_string(), template))
            .collect()
    }

    /// The registered templates in catalog form, e.g. for export.
    pub fn catalog(&self) -> TemplateCatalog {
        TemplateCatalog::from_registry(&self.registry())
    }

    pub fn register(&self, key: impl Into<String>, template: Template) {
        self.registry_mut().register(key, template);
    }

    /// Starts a new record from a clone of the template registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CasebookError::TemplateNotFound`](crate::CasebookError::TemplateNotFound) for an
    /// unknown key.
    pub fn new_builder(&self, key: &str) -> CasebookResult<RecordBuilder> {
        let seed = self.registry().clone_of(key)?;
        Ok(RecordBuilder::new(seed))
    }

    /// Assembles `builder` and appends the record, returning its display index.
    ///
    /// The store is only touched when assembly succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CasebookError::IncompleteRecord`](crate::CasebookError::IncompleteRecord) when a
    /// mandatory field is missing; `builder` can be completed and submitted again.
    pub fn submit(&self, builder: &RecordBuilder) -> CasebookResult<usize> {
        let record = builder.build()?;
        Ok(self.store_mut().append(record))
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<Record> {
        self.store().list_all().to_vec()
    }

    /// The record at 1-based `display_index`, if any.
    pub fn record(&self, display_index: usize) -> Option<Record> {
        self.store().get(display_index).cloned()
    }

    pub fn rows(&self) -> Vec<RecordRow> {
        self.store().rows()
    }

    pub fn stats(&self) -> CasebookStats {
        let (templates, care_types) = {
            let registry = self.registry();
            (registry.len(), registry.care_types().len())
        };
        CasebookStats {
            records: self.store().len(),
            templates,
            care_types,
        }
    }

    // Both collections are append/overwrite only, so a poisoned lock still guards a consistent
    // value.
    fn registry(&self) -> RwLockReadGuard<'_, TemplateRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, TemplateRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_mut(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
