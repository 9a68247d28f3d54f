//! The student record and its input forms.
//!
//! A [`Student`] only exists in a valid state: its fields are private and
//! every constructor runs the validation rules. Untrusted input arrives as a
//! [`StudentDraft`] (a full record, e.g. a create request or a persisted
//! entry) or a [`StudentPatch`] (a partial update), and is turned into a
//! `Student` through a fallible conversion.
//!
//! # Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `name` | non-empty |
//! | `student_id` | exactly 9 characters, starting with `A0` |
//! | `term` | any integer; `1` when absent from a draft |

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::ValidationError;

/// Term assigned when a draft does not carry one.
pub const DEFAULT_TERM: i64 = 1;

/// Exact length of a student ID, in characters.
pub const STUDENT_ID_LEN: usize = 9;

/// Literal prefix every student ID starts with.
pub const STUDENT_ID_PREFIX: &str = "A0";

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// A single validated student record.
///
/// Serializes to the canonical mapping
/// `{"name": string, "student_id": string, "term": integer}`, which is both
/// the persisted shape and the API response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Student {
    /// Display name. Never empty.
    #[validate(length(min = 1))]
    name: String,
    /// Institution-issued identifier, e.g. `A01234567`.
    #[validate(length(equal = 9), custom(function = "validate_student_id_prefix"))]
    student_id: String,
    /// Current term number.
    term: i64,
}

impl Student {
    /// Build a student, enforcing every field rule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Fields`] naming each field that broke a rule.
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        term: i64,
    ) -> Result<Self, ValidationError> {
        let student = Self {
            name: name.into(),
            student_id: student_id.into(),
            term,
        };
        student.validate()?;
        Ok(student)
    }

    /// Build a student in the first term.
    pub fn with_default_term(
        name: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(name, student_id, DEFAULT_TERM)
    }

    /// Build a student from an untyped JSON mapping.
    ///
    /// Missing `term` defaults to [`DEFAULT_TERM`]. A `term` that is present
    /// but not an integer is rejected, as is any non-string `name` or
    /// `student_id`.
    pub fn from_mapping(value: serde_json::Value) -> Result<Self, ValidationError> {
        StudentDraft::from_mapping(value)?.try_into()
    }

    /// The student's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The student's identifier.
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// The student's current term.
    pub const fn term(&self) -> i64 {
        self.term
    }

    /// Canonical mapping of this record.
    pub fn to_mapping(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "student_id": self.student_id,
            "term": self.term,
        })
    }

    /// Return a copy with every field present in `patch` replaced.
    ///
    /// The result is validated as a whole, so a patch can never produce a
    /// record that [`Student::new`] would have refused. `self` is untouched
    /// either way.
    pub fn apply(&self, patch: &StudentPatch) -> Result<Self, ValidationError> {
        Self::new(
            patch.name.clone().unwrap_or_else(|| self.name.clone()),
            patch
                .student_id
                .clone()
                .unwrap_or_else(|| self.student_id.clone()),
            patch.term.unwrap_or(self.term),
        )
    }
}

impl TryFrom<StudentDraft> for Student {
    type Error = ValidationError;

    fn try_from(draft: StudentDraft) -> Result<Self, Self::Error> {
        Self::new(draft.name, draft.student_id, draft.term)
    }
}

/// Check the literal `A0` prefix of a student ID.
///
/// Length is checked separately by the `length` rule.
fn validate_student_id_prefix(student_id: &str) -> Result<(), validator::ValidationError> {
    if student_id.starts_with(STUDENT_ID_PREFIX) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("student_id_prefix"))
    }
}

// ---------------------------------------------------------------------------
// Input forms
// ---------------------------------------------------------------------------

/// Unvalidated full record, as read from a request body or the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    /// Proposed name.
    pub name: String,
    /// Proposed student ID.
    pub student_id: String,
    /// Proposed term, [`DEFAULT_TERM`] when the key is absent.
    #[serde(default = "default_term")]
    pub term: i64,
}

impl StudentDraft {
    /// Read a draft from an untyped JSON mapping.
    ///
    /// Only a JSON object is accepted; positional forms such as
    /// `["Ann", "A01234567"]` are malformed.
    pub fn from_mapping(value: serde_json::Value) -> Result<Self, ValidationError> {
        Ok(serde_json::from_value(require_object(value)?)?)
    }
}

const fn default_term() -> i64 {
    DEFAULT_TERM
}

/// Serde's derived struct visitors also take sequences, so the object
/// check has to happen before deserializing.
fn require_object(value: serde_json::Value) -> Result<serde_json::Value, ValidationError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(ValidationError::Malformed(format!(
            "expected a JSON object, found {value}"
        )))
    }
}

/// Partial update: every field that is `Some` replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StudentPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New student ID.
    #[serde(default)]
    pub student_id: Option<String>,
    /// New term.
    #[serde(default)]
    pub term: Option<i64>,
}

impl StudentPatch {
    /// Read a patch from an untyped JSON mapping. Unknown keys are ignored.
    pub fn from_mapping(value: serde_json::Value) -> Result<Self, ValidationError> {
        Ok(serde_json::from_value(require_object(value)?)?)
    }

    /// `true` when the patch changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.student_id.is_none() && self.term.is_none()
    }
}
