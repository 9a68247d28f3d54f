//! Error types for student record construction.

/// A student record could not be built from the given input.
///
/// Rule violations (empty name, badly formed student ID) are reported per
/// field through [`validator::ValidationErrors`]. Input that is not shaped
/// like a record at all (wrong JSON types, required keys missing) is
/// reported as [`ValidationError::Malformed`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// One or more fields broke a validation rule.
    #[error("invalid student fields: {0}")]
    Fields(#[from] validator::ValidationErrors),

    /// The input could not be read as a student record.
    #[error("malformed student record: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Names of the fields that failed validation, sorted.
    ///
    /// Empty for [`ValidationError::Malformed`].
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            Self::Fields(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(ToString::to_string)
                    .collect();
                fields.sort();
                fields
            }
            Self::Malformed(_) => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
