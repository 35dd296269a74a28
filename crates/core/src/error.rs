use crate::catalog::CatalogError;
use crate::record::RequiredField;

/// Errors returned by the casebook core.
///
/// Only [`CasebookError::TemplateNotFound`] and [`CasebookError::IncompleteRecord`] can come out
/// of the record creation flow; the remaining variants are raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum CasebookError {
    #[error("template not found: {key}")]
    TemplateNotFound { key: String },

    #[error("record is incomplete, missing: {}", RequiredField::join(missing))]
    IncompleteRecord { missing: Vec<RequiredField> },

    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read template catalog: {0}")]
    CatalogFileRead(std::io::Error),
    #[error("template catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type CasebookResult<T> = std::result::Result<T, CasebookError>;
