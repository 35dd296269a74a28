//! # Casebook Core
//!
//! Core object-creation logic for the casebook patient record system:
//! - [`Template`]s describing a patient category's defaults, kept in a [`TemplateRegistry`]
//!   that only ever hands out independent clones
//! - a staged [`RecordBuilder`] seeded from a cloned template and validated on [`RecordBuilder::build`]
//! - an append-only [`RecordStore`] of completed [`Record`]s
//! - [`CasebookService`], which bundles a registry and a store for concurrent callers
//!
//! **No presentation concerns**: trimming raw form input, coercing unparsable ages and skipping
//! blank list entries belong to the caller (see the `casebook-cli` crate).

pub mod builder;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod record;
pub mod registry;
pub mod service;
pub mod store;
pub mod template;

pub use builder::RecordBuilder;
pub use catalog::{builtin_templates, CatalogEntry, CatalogError, TemplateCatalog};
pub use config::CoreConfig;
pub use error::{CasebookError, CasebookResult};
pub use record::{Record, RecordRow, RequiredField};
pub use registry::TemplateRegistry;
pub use service::{CasebookService, CasebookStats};
pub use store::RecordStore;
pub use template::Template;

pub use casebook_types::{NonEmptyText, TextError};
