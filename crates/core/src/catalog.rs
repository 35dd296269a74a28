//! Template catalog wire format and the built-in templates.
//!
//! A catalog is a YAML sequence of template definitions:
//!
//! ```yaml
//! - key: adult-cardiology
//!   patient_category: Adult
//!   care_type: Cardiology
//!   baseline_exams:
//!     - Electrocardiogram
//!     - Lipid panel
//! ```
//!
//! Responsibilities:
//! - Define a strict wire model (`deny_unknown_fields`) for catalog files
//! - Translate between the wire model and domain [`Template`]s
//! - Reject entries with a blank key or category and keys repeated within one file

use crate::constants::{ADULT_EMERGENCY_KEY, GERIATRIC_INPATIENT_KEY, PEDIATRIC_OUTPATIENT_KEY};
use crate::error::{CasebookError, CasebookResult};
use crate::registry::TemplateRegistry;
use crate::template::Template;
use crate::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Errors returned while parsing or rendering a template catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The templates every registry starts with unless built-ins are disabled.
pub fn builtin_templates() -> Vec<(&'static str, Template)> {
    vec![
        (
            ADULT_EMERGENCY_KEY,
            Template::new(
                "Adult",
                "Emergency",
                ["Complete blood count", "Blood glucose", "Electrocardiogram"],
            ),
        ),
        (
            PEDIATRIC_OUTPATIENT_KEY,
            Template::new(
                "Pediatric",
                "Outpatient",
                ["Weight and height", "Blood pressure", "Complete blood count"],
            ),
        ),
        (
            GERIATRIC_INPATIENT_KEY,
            Template::new(
                "Geriatric",
                "Inpatient",
                [
                    "Complete blood count",
                    "Metabolic panel",
                    "Chest X-ray",
                    "Echocardiogram",
                ],
            ),
        ),
    ]
}

/// One keyed template definition from a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: String,
    pub template: Template,
}

/// An ordered list of catalog entries with unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    entries: Vec<CatalogEntry>,
}

impl TemplateCatalog {
    /// Parse a catalog from YAML text.
    ///
    /// Schema mismatches are reported with the path of the offending field
    /// (e.g. `[1].care_type`). Blank input yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the YAML does not match the catalog schema or contains unknown keys,
    /// - an entry has a blank `key` or `patient_category`,
    /// - a key appears more than once.
    pub fn parse(yaml_text: &str) -> Result<Self, CatalogError> {
        if yaml_text.trim().is_empty() {
            return Ok(Self::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, Vec<TemplateWire>>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CatalogError::Translation(format!(
                    "catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(wire.len());
        for (position, item) in wire.into_iter().enumerate() {
            let entry = wire_to_domain(item).map_err(|msg| {
                CatalogError::InvalidInput(format!("entry {position}: {msg}"))
            })?;
            if !seen.insert(entry.key.clone()) {
                return Err(CatalogError::InvalidInput(format!(
                    "duplicate template key '{}'",
                    entry.key
                )));
            }
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Render the catalog as YAML text.
    pub fn render(&self) -> Result<String, CatalogError> {
        let wire: Vec<TemplateWire> = self.entries.iter().map(domain_to_wire).collect();
        serde_yaml::to_string(&wire)
            .map_err(|e| CatalogError::Translation(format!("failed to serialise catalog: {e}")))
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> CasebookResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(CasebookError::CatalogFileRead)?;
        Ok(Self::parse(&yaml)?)
    }

    /// Snapshot every template of a registry, in registry order.
    pub fn from_registry(registry: &TemplateRegistry) -> Self {
        let entries = registry
            .templates()
            .map(|(key, template)| CatalogEntry {
                key: key.to_string(),
                template,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TemplateCatalog {
    type Item = (String, Template);
    type IntoIter = std::vec::IntoIter<(String, Template)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_iter()
            .map(|entry| (entry.key, entry.template))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TemplateWire {
    key: String,
    patient_category: String,
    care_type: String,
    #[serde(default)]
    baseline_exams: Vec<String>,
}

fn wire_to_domain(wire: TemplateWire) -> Result<CatalogEntry, String> {
    let key = NonEmptyText::new(&wire.key).map_err(|_| "key cannot be empty".to_string())?;
    let category = NonEmptyText::new(&wire.patient_category)
        .map_err(|_| "patient_category cannot be empty".to_string())?;

    Ok(CatalogEntry {
        key: key.into_inner(),
        template: Template::new(category.into_inner(), wire.care_type, wire.baseline_exams),
    })
}

fn domain_to_wire(entry: &CatalogEntry) -> TemplateWire {
    TemplateWire {
        key: entry.key.clone(),
        patient_category: entry.template.patient_category().to_string(),
        care_type: entry.template.care_type().to_string(),
        baseline_exams: entry.template.baseline_exams().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
- key: adult-cardiology
  patient_category: Adult
  care_type: Cardiology
  baseline_exams:
    - Electrocardiogram
    - Lipid panel
- key: " neonatal-icu "
  patient_category: Neonatal
  care_type: Intensive care
"#;

    #[test]
    fn test_parse_reads_entries_in_order() {
        let catalog = TemplateCatalog::parse(CATALOG).expect("catalog should parse");

        assert_eq!(catalog.len(), 2);
        let first = &catalog.entries()[0];
        assert_eq!(first.key, "adult-cardiology");
        assert_eq!(
            first.template.baseline_exams(),
            ["Electrocardiogram", "Lipid panel"]
        );

        let second = &catalog.entries()[1];
        assert_eq!(second.key, "neonatal-icu", "keys should be trimmed");
        assert_eq!(second.template.care_type(), "Intensive care");
        assert!(second.template.baseline_exams().is_empty());
    }

    #[test]
    fn test_parse_blank_input_is_empty() {
        let catalog = TemplateCatalog::parse("  \n").expect("blank should parse");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_fields_with_path() {
        let yaml = "- key: a\n  patient_category: Adult\n  care_type: Emergency\n  colour: red\n";

        let err = TemplateCatalog::parse(yaml).expect_err("unknown field should fail");
        assert!(
            matches!(err, CatalogError::Translation(ref msg) if msg.contains("colour")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_parse_rejects_blank_key() {
        let yaml = "- key: '  '\n  patient_category: Adult\n  care_type: Emergency\n";

        let err = TemplateCatalog::parse(yaml).expect_err("blank key should fail");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("key cannot be empty")));
    }

    #[test]
    fn test_parse_rejects_duplicate_keys() {
        let yaml = "- key: a\n  patient_category: Adult\n  care_type: Emergency\n\
                    - key: a\n  patient_category: Adult\n  care_type: Inpatient\n";

        let err = TemplateCatalog::parse(yaml).expect_err("duplicate key should fail");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("duplicate template key 'a'")));
    }

    #[test]
    fn test_render_output_parses_back() {
        let registry = TemplateRegistry::with_builtins();
        let catalog = TemplateCatalog::from_registry(&registry);

        let yaml = catalog.render().expect("render should succeed");
        let reparsed = TemplateCatalog::parse(&yaml).expect("rendered catalog should parse");

        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn test_builtin_templates_match_documented_defaults() {
        let builtins = builtin_templates();
        let keys: Vec<&str> = builtins.iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                ADULT_EMERGENCY_KEY,
                PEDIATRIC_OUTPATIENT_KEY,
                GERIATRIC_INPATIENT_KEY
            ]
        );

        let pediatric = &builtins[1].1;
        assert_eq!(
            pediatric.baseline_exams(),
            ["Weight and height", "Blood pressure", "Complete blood count"]
        );
        assert_eq!(builtins[2].1.baseline_exams().len(), 4);
    }
}
