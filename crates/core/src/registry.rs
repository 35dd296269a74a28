//! Template registry.
//!
//! The registry maps template keys to [`Template`]s and mediates every lookup through a clone:
//! callers never get a reference to a stored template they could hold on to or mutate.
//!
//! Keys iterate in registration order. Re-registering an existing key replaces its template
//! but keeps the key's original position.

use crate::catalog::{builtin_templates, TemplateCatalog};
use crate::config::CoreConfig;
use crate::error::{CasebookError, CasebookResult};
use crate::template::Template;
use std::collections::HashMap;

/// Keyed, insertion-ordered store of templates.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    entries: Vec<(String, Template)>,
    positions: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in templates.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (key, template) in builtin_templates() {
            registry.register(key, template);
        }
        registry
    }

    /// Builds the startup registry described by `cfg`.
    ///
    /// Built-in templates are registered first (unless disabled), followed by every entry of the
    /// configured catalog file in file order. A catalog key that matches a built-in key
    /// overwrites the built-in template in place.
    ///
    /// # Errors
    ///
    /// Returns [`CasebookError::CatalogFileRead`] if the catalog file cannot be read and
    /// [`CasebookError::Catalog`] if its contents are not a valid catalog.
    pub fn from_config(cfg: &CoreConfig) -> CasebookResult<Self> {
        let mut registry = if cfg.include_builtin_templates() {
            Self::with_builtins()
        } else {
            Self::new()
        };

        if let Some(path) = cfg.catalog_path() {
            let catalog = TemplateCatalog::load(path)?;
            tracing::info!(
                "loaded {} template(s) from {}",
                catalog.len(),
                path.display()
            );
            for (key, template) in catalog {
                registry.register(key, template);
            }
        }

        Ok(registry)
    }

    /// Inserts or overwrites the template registered under `key`.
    ///
    /// Last write wins. An existing key keeps its position in [`keys`](Self::keys); a new key
    /// is appended.
    pub fn register(&mut self, key: impl Into<String>, template: Template) {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&position) => {
                tracing::debug!("template {key} overwritten");
                self.entries[position].1 = template;
            }
            None => {
                tracing::debug!("template {key} registered");
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, template));
            }
        }
    }

    /// Returns the registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns an independent copy of the template registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CasebookError::TemplateNotFound`] if `key` has not been registered. The
    /// registry is left untouched.
    pub fn clone_of(&self, key: &str) -> CasebookResult<Template> {
        let position = self
            .positions
            .get(key)
            .copied()
            .ok_or_else(|| CasebookError::TemplateNotFound {
                key: key.to_string(),
            })?;
        tracing::debug!("template {key} cloned");
        Ok(self.entries[position].1.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and cloned templates in registration order, for display.
    pub fn templates(&self) -> impl Iterator<Item = (&str, Template)> + '_ {
        self.entries
            .iter()
            .map(|(key, template)| (key.as_str(), template.clone()))
    }

    /// Distinct care types in the order they first appear.
    pub fn care_types(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for (_, template) in &self.entries {
            if !seen.iter().any(|c| c == template.care_type()) {
                seen.push(template.care_type().to_string());
            }
        }
        seen
    }
}
