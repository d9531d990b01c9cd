//! Phrase submission fields
//!
//! Presence is the only rule: a value must exist and contain something
//! other than whitespace. Content is stored as submitted.

use super::ValidationError;

fn require(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_owned()),
        _ => Err(ValidationError::Empty { field }),
    }
}

/// Phrase text as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseText(String);

impl PhraseText {
    /// Validate presence of the phrase text.
    ///
    /// # Example
    /// ```
    /// use phrasebook_server::models::PhraseText;
    ///
    /// assert!(PhraseText::new(Some("te quiero")).is_ok());
    /// assert!(PhraseText::new(Some("   ")).is_err());
    /// assert!(PhraseText::new(None).is_err());
    /// ```
    pub fn new(value: Option<&str>) -> Result<Self, ValidationError> {
        require("phrase", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Language code referencing `languages.language_code`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(value: Option<&str>) -> Result<Self, ValidationError> {
        require("languageCode", value).map(|v| Self(v.trim().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Category display name referencing `categories.name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(value: Option<&str>) -> Result<Self, ValidationError> {
        require("category", value).map(|v| Self(v.trim().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A fully validated phrase submission
#[derive(Debug, Clone)]
pub struct NewPhrase {
    pub text: PhraseText,
    pub language: LanguageCode,
    pub category: CategoryName,
}

impl NewPhrase {
    /// Validate all three fields, reporting the first missing one in
    /// request order (phrase, languageCode, category).
    pub fn new(
        phrase: Option<&str>,
        language_code: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            text: PhraseText::new(phrase)?,
            language: LanguageCode::new(language_code)?,
            category: CategoryName::new(category)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_submission() {
        let p = NewPhrase::new(Some("je t'aime"), Some("fr"), Some("Partner")).unwrap();
        assert_eq!(p.text.as_str(), "je t'aime");
        assert_eq!(p.language.as_str(), "fr");
        assert_eq!(p.category.as_str(), "Partner");
    }

    #[test]
    fn reports_missing_field_by_name() {
        let err = NewPhrase::new(Some("hola"), None, Some("Mom")).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "languageCode" });

        let err = NewPhrase::new(Some("hola"), Some("es"), Some("")).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category" });

        let err = NewPhrase::new(None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "phrase" });
    }

    #[test]
    fn blank_counts_as_missing() {
        let err = PhraseText::new(Some(" \t\n")).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "phrase" }));
    }

    #[test]
    fn reference_keys_are_trimmed_but_text_is_not() {
        let p = NewPhrase::new(Some("  ciao  "), Some(" it "), Some(" Friend")).unwrap();
        assert_eq!(p.text.as_str(), "  ciao  ");
        assert_eq!(p.language.as_str(), "it");
        assert_eq!(p.category.as_str(), "Friend");
    }
}
