//! Record templates.
//!
//! A [`Template`] describes the defaults for one patient category: the category itself, the
//! care type and the baseline examinations every new record of that kind starts with. Variation
//! between templates is purely data, so there is a single concrete type.

use serde::Serialize;

/// Default attributes for one patient category.
///
/// Templates are immutable once constructed: fields are private and only read accessors are
/// exposed. The registry hands out owned clones, and `Clone` copies the exam list, so no two
/// copies ever share a sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Template {
    patient_category: String,
    care_type: String,
    /// Display order matters and duplicates are allowed.
    baseline_exams: Vec<String>,
}

impl Template {
    pub fn new<I, S>(
        patient_category: impl Into<String>,
        care_type: impl Into<String>,
        baseline_exams: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patient_category: patient_category.into(),
            care_type: care_type.into(),
            baseline_exams: baseline_exams.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patient_category(&self) -> &str {
        &self.patient_category
    }

    pub fn care_type(&self) -> &str {
        &self.care_type
    }

    pub fn baseline_exams(&self) -> &[String] {
        &self.baseline_exams
    }

    /// Test-only mutator used to prove clones do not alias each other.
    #[cfg(test)]
    pub(crate) fn baseline_exams_mut(&mut self) -> &mut Vec<String> {
        &mut self.baseline_exams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preserves_exam_order_and_duplicates() {
        let template = Template::new("Adult", "Emergency", ["CBC", "ECG", "CBC"]);

        assert_eq!(template.patient_category(), "Adult");
        assert_eq!(template.care_type(), "Emergency");
        assert_eq!(template.baseline_exams(), ["CBC", "ECG", "CBC"]);
    }

    #[test]
    fn clone_does_not_share_exams() {
        let original = Template::new("Adult", "Emergency", ["CBC"]);
        let mut copy = original.clone();
        copy.baseline_exams_mut().push("Chest X-ray".into());

        assert_eq!(original.baseline_exams(), ["CBC"]);
        assert_eq!(copy.baseline_exams(), ["CBC", "Chest X-ray"]);
    }
}
