//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! [`TemplateRegistry::from_config`](crate::TemplateRegistry::from_config) and
//! [`CasebookService`](crate::CasebookService). Nothing in this crate reads environment
//! variables; the helpers below take already-read values so that callers decide where they
//! come from.

use crate::error::{CasebookError, CasebookResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    include_builtin_templates: bool,
    catalog_path: Option<PathBuf>,
}

impl CoreConfig {
    pub fn new(include_builtin_templates: bool, catalog_path: Option<PathBuf>) -> Self {
        Self {
            include_builtin_templates,
            catalog_path,
        }
    }

    pub fn include_builtin_templates(&self) -> bool {
        self.include_builtin_templates
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(true, None)
    }
}

/// Validate an optional template catalog path.
///
/// `None` and blank values mean "no catalog". Anything else must point at a regular file.
pub fn resolve_catalog_path(value: Option<PathBuf>) -> CasebookResult<Option<PathBuf>> {
    let Some(path) = value.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };

    if !path.is_file() {
        return Err(CasebookError::InvalidInput(format!(
            "template catalog {} is not a readable file",
            path.display()
        )));
    }

    Ok(Some(path))
}

/// Parse the "disable built-in templates" switch from an optional string value.
///
/// Built-ins stay enabled unless the value is `1`, `true` or `yes` (case-insensitive).
pub fn builtins_enabled_from_env_value(value: Option<String>) -> bool {
    let disabled = value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes"));
    !disabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_includes_builtins_without_catalog() {
        let cfg = CoreConfig::default();
        assert!(cfg.include_builtin_templates());
        assert!(cfg.catalog_path().is_none());
    }

    #[test]
    fn test_resolve_catalog_path_accepts_none_and_blank() {
        assert!(resolve_catalog_path(None).unwrap().is_none());
        assert!(resolve_catalog_path(Some(PathBuf::new())).unwrap().is_none());
    }

    #[test]
    fn test_resolve_catalog_path_accepts_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("catalog.yaml");
        fs::write(&path, "[]").expect("should write catalog");

        let resolved = resolve_catalog_path(Some(path.clone())).expect("file should resolve");
        assert_eq!(resolved, Some(path));
    }

    #[test]
    fn test_resolve_catalog_path_rejects_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let err = resolve_catalog_path(Some(temp_dir.path().to_path_buf()))
            .expect_err("directory should be rejected");
        assert!(matches!(err, CasebookError::InvalidInput(msg) if msg.contains("not a readable file")));
    }

    #[test]
    fn test_builtins_enabled_from_env_value() {
        assert!(builtins_enabled_from_env_value(None));
        assert!(builtins_enabled_from_env_value(Some("".into())));
        assert!(builtins_enabled_from_env_value(Some("0".into())));
        assert!(!builtins_enabled_from_env_value(Some("1".into())));
        assert!(!builtins_enabled_from_env_value(Some(" TRUE ".into())));
    }
}
