//! Constants used throughout the casebook core crate.
//!
//! Built-in template keys and display strings live here so the catalog, the record views and
//! the CLI agree on them.

/// Key of the built-in adult emergency template.
pub const ADULT_EMERGENCY_KEY: &str = "adult-emergency";

/// Key of the built-in pediatric outpatient template.
pub const PEDIATRIC_OUTPATIENT_KEY: &str = "pediatric-outpatient";

/// Key of the built-in geriatric inpatient template.
pub const GERIATRIC_INPATIENT_KEY: &str = "geriatric-inpatient";

/// Environment variable naming an optional YAML template catalog.
pub const CATALOG_ENV_VAR: &str = "CASEBOOK_CATALOG";

/// Environment variable that disables the built-in templates when set to `1` or `true`.
pub const NO_BUILTINS_ENV_VAR: &str = "CASEBOOK_NO_BUILTINS";

/// Shown in place of an empty allergy list.
pub const NO_ALLERGIES: &str = "None";

/// Shown in place of absent notes.
pub const NO_NOTES: &str = "-";

/// Separator used when exams are listed in the detail view.
pub const EXAM_SEPARATOR: &str = " | ";

/// Separator used for medication and allergy lists.
pub const LIST_SEPARATOR: &str = ", ";
