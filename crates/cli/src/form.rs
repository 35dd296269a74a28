//! Raw form input and its normalisation.
//!
//! Everything the core expects the caller to do happens here: text is trimmed, an unparsable or
//! negative age becomes `0`, and blank medications, allergies, extra exams and notes are dropped
//! before they reach the builder.

use casebook_core::{CasebookResult, CasebookService, RecordBuilder};
use serde::Deserialize;
use std::path::Path;

/// Field values exactly as a user typed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub template: String,
    pub name: String,
    pub identity_id: String,
    pub age: String,
    pub diagnosis: String,
    pub physician: String,
    pub notes: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub extra_exams: Vec<String>,
}

impl RecordForm {
    /// Applies the form to a freshly seeded builder.
    pub fn fill(&self, builder: RecordBuilder) -> RecordBuilder {
        let mut builder = builder
            .with_name(self.name.trim())
            .with_identity_id(self.identity_id.trim())
            .with_diagnosis(self.diagnosis.trim())
            .with_physician(self.physician.trim())
            .with_age(parse_age(&self.age));

        if let Some(notes) = non_blank(&self.notes) {
            builder = builder.with_notes(notes);
        }
        for medication in self.medications.iter().filter_map(|m| non_blank(m)) {
            builder = builder.add_medication(medication);
        }
        for allergy in self.allergies.iter().filter_map(|a| non_blank(a)) {
            builder = builder.add_allergy(allergy);
        }
        for exam in self.extra_exams.iter().filter_map(|e| non_blank(e)) {
            builder = builder.add_exam(exam);
        }
        builder
    }

    /// Clones the selected template, fills it and stores the record.
    ///
    /// Returns the new record's display index.
    pub fn submit(&self, service: &CasebookService) -> CasebookResult<usize> {
        let builder = self.fill(service.new_builder(self.template.trim())?);
        service.submit(&builder)
    }
}

/// Parses an age field, falling back to `0` for anything that is not a non-negative integer.
pub fn parse_age(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ============================================================================
// Batch files
// ============================================================================

/// One entry of a batch file. Ages may be written as numbers or text.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchEntryWire {
    template: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    identity_id: String,
    #[serde(default)]
    age: Option<serde_yaml::Value>,
    #[serde(default)]
    diagnosis: String,
    #[serde(default)]
    physician: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    medications: Vec<String>,
    #[serde(default)]
    allergies: Vec<String>,
    #[serde(default)]
    extra_exams: Vec<String>,
}

impl From<BatchEntryWire> for RecordForm {
    fn from(wire: BatchEntryWire) -> Self {
        let age = match wire.age {
            Some(serde_yaml::Value::Number(n)) => n.to_string(),
            Some(serde_yaml::Value::String(s)) => s,
            _ => String::new(),
        };
        Self {
            template: wire.template,
            name: wire.name,
            identity_id: wire.identity_id,
            age,
            diagnosis: wire.diagnosis,
            physician: wire.physician,
            notes: wire.notes,
            medications: wire.medications,
            allergies: wire.allergies,
            extra_exams: wire.extra_exams,
        }
    }
}

/// Parses a YAML list of form submissions.
pub fn parse_batch(yaml_text: &str) -> anyhow::Result<Vec<RecordForm>> {
    if yaml_text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<BatchEntryWire> = serde_yaml::from_str(yaml_text)?;
    Ok(entries.into_iter().map(RecordForm::from).collect())
}

pub fn load_batch(path: &Path) -> anyhow::Result<Vec<RecordForm>> {
    let yaml = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read batch file {}: {e}", path.display()))?;
    parse_batch(&yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::{CasebookError, CoreConfig, RequiredField};
    use std::fs;
    use tempfile::TempDir;

    fn service() -> CasebookService {
        CasebookService::from_config(&CoreConfig::default()).expect("default config should load")
    }

    fn form() -> RecordForm {
        RecordForm {
            template: " adult-emergency ".into(),
            name: "  Ana Torres ".into(),
            identity_id: "0912345678".into(),
            age: " 42 ".into(),
            diagnosis: "Acute appendicitis".into(),
            physician: " Dr. Vega".into(),
            notes: "   ".into(),
            medications: vec!["Ceftriaxone ".into(), "  ".into()],
            allergies: vec!["".into()],
            extra_exams: vec![" Abdominal ultrasound".into()],
        }
    }

    #[test]
    fn test_parse_age_falls_back_to_zero() {
        assert_eq!(parse_age(" 42 "), 42);
        assert_eq!(parse_age("abc"), 0);
        assert_eq!(parse_age("-3"), 0);
        assert_eq!(parse_age(""), 0);
        assert_eq!(parse_age("99999999999"), 0);
    }

    #[test]
    fn test_submit_normalises_input() {
        let service = service();

        let index = form().submit(&service).expect("submit should succeed");
        let record = service.record(index).expect("record should be stored");

        assert_eq!(record.patient_name(), "Ana Torres");
        assert_eq!(record.age(), 42);
        assert_eq!(record.responsible_physician(), "Dr. Vega");
        assert_eq!(record.notes(), None);
        assert_eq!(record.medications(), ["Ceftriaxone"]);
        assert!(record.allergies().is_empty());
        assert_eq!(record.exams().last().map(String::as_str), Some("Abdominal ultrasound"));
        assert_eq!(record.exams().len(), 4);
    }

    #[test]
    fn test_submit_surfaces_missing_fields() {
        let service = service();
        let mut form = form();
        form.identity_id = "  ".into();

        let err = form.submit(&service).expect_err("blank id should fail");
        assert!(matches!(
            err,
            CasebookError::IncompleteRecord { ref missing } if missing == &[RequiredField::IdentityId]
        ));
        assert!(service.records().is_empty());
    }

    #[test]
    fn test_submit_with_unknown_template_fails() {
        let mut form = form();
        form.template = "cardiology".into();

        let err = form.submit(&service()).expect_err("unknown template should fail");
        assert!(matches!(err, CasebookError::TemplateNotFound { ref key } if key == "cardiology"));
    }

    #[test]
    fn test_parse_batch_accepts_numeric_and_text_ages() {
        let yaml = r#"
- template: pediatric-outpatient
  name: Mateo Rivas
  identity_id: "1720001111"
  age: 7
  diagnosis: Otitis media
- template: geriatric-inpatient
  name: Rosa Paredes
  age: unknown
"#;
        let forms = parse_batch(yaml).expect("batch should parse");

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].age, "7");
        assert_eq!(forms[0].identity_id, "1720001111");
        assert_eq!(parse_age(&forms[1].age), 0);
        assert!(forms[1].diagnosis.is_empty());
    }

    #[test]
    fn test_parse_batch_rejects_unknown_fields() {
        let yaml = "- template: adult-emergency\n  blood_type: O+\n";
        assert!(parse_batch(yaml).is_err());
    }

    #[test]
    fn test_load_batch_reads_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("batch.yaml");
        fs::write(&path, "- template: adult-emergency\n  name: A\n").expect("should write");

        let forms = load_batch(&path).expect("batch should load");
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].name, "A");

        assert!(load_batch(&temp_dir.path().join("missing.yaml")).is_err());
    }
}
