//! Completed patient records and their display forms.
//!
//! A [`Record`] can only be produced by [`RecordBuilder::build`](crate::RecordBuilder::build).
//! Its fields are read-only, and the three mandatory fields are carried as [`NonEmptyText`] so
//! the non-empty guarantee travels with the value.

use crate::constants::{EXAM_SEPARATOR, LIST_SEPARATOR, NO_ALLERGIES, NO_NOTES};
use crate::NonEmptyText;
use serde::Serialize;

/// Fields that must be present and non-blank before a record can be assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    PatientName,
    IdentityId,
    Diagnosis,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::PatientName,
        RequiredField::IdentityId,
        RequiredField::Diagnosis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequiredField::PatientName => "patient name",
            RequiredField::IdentityId => "identity id",
            RequiredField::Diagnosis => "diagnosis",
        }
    }

    pub(crate) fn join(fields: &[RequiredField]) -> String {
        fields
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR)
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One fully assembled patient record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub(crate) patient_category: String,
    pub(crate) care_type: String,
    pub(crate) patient_name: NonEmptyText,
    pub(crate) identity_id: NonEmptyText,
    pub(crate) age: u32,
    pub(crate) diagnosis: NonEmptyText,
    pub(crate) responsible_physician: String,
    pub(crate) notes: Option<String>,
    pub(crate) exams: Vec<String>,
    pub(crate) medications: Vec<String>,
    pub(crate) allergies: Vec<String>,
}

impl Record {
    pub fn patient_category(&self) -> &str {
        &self.patient_category
    }

    pub fn care_type(&self) -> &str {
        &self.care_type
    }

    pub fn patient_name(&self) -> &NonEmptyText {
        &self.patient_name
    }

    pub fn identity_id(&self) -> &NonEmptyText {
        &self.identity_id
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn diagnosis(&self) -> &NonEmptyText {
        &self.diagnosis
    }

    pub fn responsible_physician(&self) -> &str {
        &self.responsible_physician
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn exams(&self) -> &[String] {
        &self.exams
    }

    pub fn medications(&self) -> &[String] {
        &self.medications
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    /// Builds the tabular row shown for this record at `display_index` (1-based).
    pub fn summary_row(&self, display_index: usize) -> RecordRow {
        RecordRow {
            index: display_index,
            patient_name: self.patient_name.to_string(),
            identity_id: self.identity_id.to_string(),
            age: format!("{} years", self.age),
            patient_category: self.patient_category.clone(),
            care_type: self.care_type.clone(),
            physician: self.responsible_physician.clone(),
            diagnosis: self.diagnosis.to_string(),
            medications: self.medications.join(LIST_SEPARATOR),
            allergies: self.allergies_display(),
        }
    }

    /// Label/value pairs for the detail view, in display order.
    pub fn detail_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Patient", self.patient_name.to_string()),
            ("Identity id", self.identity_id.to_string()),
            ("Age", format!("{} years", self.age)),
            ("Patient category", self.patient_category.clone()),
            ("Care type", self.care_type.clone()),
            ("Physician", self.responsible_physician.clone()),
            ("Diagnosis", self.diagnosis.to_string()),
            ("Exams", self.exams.join(EXAM_SEPARATOR)),
            ("Medications", self.medications.join(EXAM_SEPARATOR)),
            ("Allergies", self.allergies_display()),
            (
                "Notes",
                self.notes.clone().unwrap_or_else(|| NO_NOTES.to_string()),
            ),
        ]
    }

    fn allergies_display(&self) -> String {
        if self.allergies.is_empty() {
            NO_ALLERGIES.to_string()
        } else {
            self.allergies.join(LIST_SEPARATOR)
        }
    }
}

/// Flattened, display-ready view of one record in the record listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub index: usize,
    pub patient_name: String,
    pub identity_id: String,
    pub age: String,
    pub patient_category: String,
    pub care_type: String,
    pub physician: String,
    pub diagnosis: String,
    pub medications: String,
    pub allergies: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            patient_category: "Adult".into(),
            care_type: "Emergency".into(),
            patient_name: NonEmptyText::new("Ana Torres").unwrap(),
            identity_id: NonEmptyText::new("0912345678").unwrap(),
            age: 42,
            diagnosis: NonEmptyText::new("Acute appendicitis").unwrap(),
            responsible_physician: "Dr. Vega".into(),
            notes: None,
            exams: vec!["Complete blood count".into(), "Abdominal ultrasound".into()],
            medications: vec!["Ceftriaxone".into(), "Metronidazole".into()],
            allergies: vec![],
        }
    }

    #[test]
    fn test_summary_row_formats_lists() {
        let row = record().summary_row(3);

        assert_eq!(row.index, 3);
        assert_eq!(row.age, "42 years");
        assert_eq!(row.medications, "Ceftriaxone, Metronidazole");
        assert_eq!(row.allergies, NO_ALLERGIES);
    }

    #[test]
    fn test_detail_lines_show_placeholders() {
        let mut rec = record();
        rec.allergies.push("Penicillin".into());
        let lines = rec.detail_lines();

        let value = |label: &str| {
            lines
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .expect("label should be present")
        };
        assert_eq!(value("Exams"), "Complete blood count | Abdominal ultrasound");
        assert_eq!(value("Allergies"), "Penicillin");
        assert_eq!(value("Notes"), NO_NOTES);
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_required_field_join() {
        assert_eq!(
            RequiredField::join(&RequiredField::ALL),
            "patient name, identity id, diagnosis"
        );
    }
}
