//! Staged record assembly.
//!
//! A [`RecordBuilder`] is seeded from one cloned [`Template`], accumulates caller-supplied fields
//! in any order, and produces a [`Record`] from [`RecordBuilder::build`].
//!
//! ```text
//! Seeded -> Accumulating (with_* / add_* calls, repeatable) -> build()
//!                 ^                                              |
//!                 +------------- IncompleteRecord ---------------+
//! ```
//!
//! The builder does no input normalisation: callers trim text, skip blank list entries and map
//! unparsable ages to `0` before calling in.

use crate::error::{CasebookError, CasebookResult};
use crate::record::{Record, RequiredField};
use crate::template::Template;
use crate::NonEmptyText;

/// Accumulates the fields of one record under construction.
///
/// Single-valued setters overwrite; `add_*` methods append. Every setter consumes and returns the
/// builder so calls chain. [`build`](Self::build) only borrows, so a rejected build keeps all
/// accumulated state for a retry.
#[derive(Clone, Debug)]
#[must_use]
pub struct RecordBuilder {
    patient_category: String,
    care_type: String,
    patient_name: Option<String>,
    identity_id: Option<String>,
    age: u32,
    diagnosis: Option<String>,
    responsible_physician: String,
    notes: Option<String>,
    exams: Vec<String>,
    medications: Vec<String>,
    allergies: Vec<String>,
}

impl RecordBuilder {
    /// Seeds a builder from a template clone. The template's baseline exams become the initial
    /// exam list.
    pub fn new(template: Template) -> Self {
        Self {
            patient_category: template.patient_category().to_string(),
            care_type: template.care_type().to_string(),
            patient_name: None,
            identity_id: None,
            age: 0,
            diagnosis: None,
            responsible_physician: String::new(),
            notes: None,
            exams: template.baseline_exams().to_vec(),
            medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_identity_id(mut self, identity_id: impl Into<String>) -> Self {
        self.identity_id = Some(identity_id.into());
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    pub fn with_physician(mut self, physician: impl Into<String>) -> Self {
        self.responsible_physician = physician.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn add_medication(mut self, medication: impl Into<String>) -> Self {
        self.medications.push(medication.into());
        self
    }

    pub fn add_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergies.push(allergy.into());
        self
    }

    pub fn add_exam(mut self, exam: impl Into<String>) -> Self {
        self.exams.push(exam.into());
        self
    }

    pub fn patient_category(&self) -> &str {
        &self.patient_category
    }

    pub fn care_type(&self) -> &str {
        &self.care_type
    }

    pub fn exams(&self) -> &[String] {
        &self.exams
    }

    /// Mandatory fields that are unset or blank, in [`RequiredField::ALL`] order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.required_value(*field).is_none())
            .collect()
    }

    /// Assembles the record.
    ///
    /// The returned record owns copies of every list, so it is unaffected by anything done to
    /// the builder afterwards. Required text is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CasebookError::IncompleteRecord`] listing every mandatory field that is unset
    /// or blank. The builder is left unchanged.
    pub fn build(&self) -> CasebookResult<Record> {
        let (Some(patient_name), Some(identity_id), Some(diagnosis)) = (
            self.required_value(RequiredField::PatientName),
            self.required_value(RequiredField::IdentityId),
            self.required_value(RequiredField::Diagnosis),
        ) else {
            return Err(CasebookError::IncompleteRecord {
                missing: self.missing_fields(),
            });
        };

        tracing::debug!(
            "record assembled for {} / {}",
            self.patient_category,
            self.care_type
        );

        Ok(Record {
            patient_category: self.patient_category.clone(),
            care_type: self.care_type.clone(),
            patient_name,
            identity_id,
            age: self.age,
            diagnosis,
            responsible_physician: self.responsible_physician.clone(),
            notes: self.notes.clone(),
            exams: self.exams.clone(),
            medications: self.medications.clone(),
            allergies: self.allergies.clone(),
        })
    }

    fn required_value(&self, field: RequiredField) -> Option<NonEmptyText> {
        let raw = match field {
            RequiredField::PatientName => &self.patient_name,
            RequiredField::IdentityId => &self.identity_id,
            RequiredField::Diagnosis => &self.diagnosis,
        };
        NonEmptyText::from_optional(raw.as_deref())
    }
}
