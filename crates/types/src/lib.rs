//! Validated text primitives shared by the casebook crates.
//!
//! Mandatory record fields are carried as [`NonEmptyText`] once a record has been assembled, so
//! downstream code never has to re-check for blank values.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction; the trimmed
/// form is what gets stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Like [`NonEmptyText::new`] but for optional input; `None` and blank text both map to `None`.
    pub fn from_optional(input: Option<impl AsRef<str>>) -> Option<Self> {
        input.and_then(|s| Self::new(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<str> for NonEmptyText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NonEmptyText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Ana Torres \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "Ana Torres");
    }

    #[test]
    fn new_rejects_empty_and_whitespace_only() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t "), Err(TextError::Empty));
    }

    #[test]
    fn from_optional_drops_blank_values() {
        assert_eq!(NonEmptyText::from_optional(None::<&str>), None);
        assert_eq!(NonEmptyText::from_optional(Some("   ")), None);
        assert_eq!(
            NonEmptyText::from_optional(Some(" follow up ")),
            Some(NonEmptyText::new("follow up").unwrap())
        );
    }

    #[test]
    fn compares_against_str() {
        let text = NonEmptyText::try_from("flu").unwrap();
        assert_eq!(text, "flu");
        assert_eq!(text.to_string(), "flu");
    }

    #[test]
    fn deserialize_rejects_blank_strings() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("blank should fail");
        assert!(err.to_string().contains("text cannot be empty"));

        let ok: NonEmptyText = serde_json::from_str("\" 1712 \"").expect("should parse");
        assert_eq!(ok.into_inner(), "1712");
    }
}
