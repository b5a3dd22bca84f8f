//! Error types for the harvester.
//!
//! Every variant is local to one document or one bill: callers are expected
//! to log the offending path and move on to the next document.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Element text could not be coerced to the expected type.
    #[error("Invalid value {value:?} for <{element}> in {context}: expected {expected}")]
    InvalidValue {
        element: String,
        context: String,
        value: String,
        expected: &'static str,
    },

    /// Redundant tags (e.g. `<number>` and `<billNumber>`) disagree.
    #[error("Conflicting values for {field}: {primary:?} vs legacy {legacy:?}")]
    FieldMismatch {
        field: &'static str,
        primary: Option<String>,
        legacy: Option<String>,
    },

    /// A text-version reference lists more than one distinct format URL.
    #[error("Text version resolves to {} distinct URLs: {}", .urls.len(), .urls.join(", "))]
    AmbiguousUrl { urls: Vec<String> },

    /// A text-version file name matched more than one candidate document.
    #[error("File name {file_name} matches {matches} text versions")]
    JoinFanOut { file_name: String, matches: usize },

    /// An identity key appeared twice in a set that must be unique.
    #[error("Duplicate {kind}: {key}")]
    DuplicateKey { kind: &'static str, key: String },

    /// A scrape path or file name does not follow a known pattern.
    #[error("Unrecognized file name: {0}")]
    InvalidFileName(String),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = HarvesterError::MissingElement {
            element: "updateDate".to_string(),
            context: "billStatus/bill".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required XML element: updateDate in billStatus/bill"
        );
    }

    #[test]
    fn test_field_mismatch_display() {
        let err = HarvesterError::FieldMismatch {
            field: "type",
            primary: Some("hr".to_string()),
            legacy: Some("s".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Conflicting values for type: Some(\"hr\") vs legacy Some(\"s\")"
        );
    }

    #[test]
    fn test_ambiguous_url_display() {
        let err = HarvesterError::AmbiguousUrl {
            urls: vec!["a.xml".to_string(), "b.xml".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Text version resolves to 2 distinct URLs: a.xml, b.xml"
        );
    }
}
