//! Patient profile model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationErrors;

/// Validation errors returned by [`PatientId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientIdValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier contained something other than ASCII letters, digits,
    /// `-` or `_`.
    InvalidCharacters,
}

impl fmt::Display for PatientIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "patient id must not be empty"),
            Self::InvalidCharacters => {
                write!(f, "patient id may only contain letters, digits, '-' or '_'")
            }
        }
    }
}

impl std::error::Error for PatientIdValidationError {}

/// Opaque patient identifier as issued by the backend.
///
/// Identifiers appear in route paths, so they are restricted to URL-safe
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Validate and construct a [`PatientId`].
    pub fn new(id: impl Into<String>) -> Result<Self, PatientIdValidationError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, PatientIdValidationError> {
        if id.is_empty() {
            return Err(PatientIdValidationError::Empty);
        }
        if !id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        {
            return Err(PatientIdValidationError::InvalidCharacters);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PatientId> for String {
    fn from(value: PatientId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PatientId {
    type Error = PatientIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Patient profile whose device data the viewer displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Profile identifier.
    pub id: PatientId,
    /// Display name.
    pub full_name: String,
    /// Date of birth.
    pub birthday: NaiveDate,
    /// Date of diagnosis, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_date: Option<NaiveDate>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl Patient {
    /// Copy of this profile with the patch applied.
    pub fn apply(&self, patch: &PatientPatch) -> Self {
        let mut merged = self.clone();
        if let Some(full_name) = &patch.full_name {
            merged.full_name.clone_from(full_name);
        }
        if let Some(birthday) = patch.birthday {
            merged.birthday = birthday;
        }
        if let Some(diagnosis_date) = patch.diagnosis_date {
            merged.diagnosis_date = Some(diagnosis_date);
        }
        if let Some(about) = &patch.about {
            merged.about = Some(about.clone());
        }
        merged
    }

    /// Attributes sent when this profile is updated.
    pub fn attributes(&self) -> NewPatient {
        NewPatient {
            full_name: self.full_name.clone(),
            birthday: self.birthday,
            diagnosis_date: self.diagnosis_date,
            about: self.about.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn fixture(id: PatientId) -> Self {
        Self {
            id,
            full_name: "Jamie Doe".to_owned(),
            birthday: NaiveDate::from_ymd_opt(2005, 3, 14).unwrap_or_default(),
            diagnosis_date: NaiveDate::from_ymd_opt(2012, 6, 1),
            about: None,
        }
    }
}

/// Partial edit submitted by the patient profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub full_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub diagnosis_date: Option<NaiveDate>,
    pub about: Option<String>,
}

/// Profile attributes without the identifier.
///
/// Submitted when creating a patient and as the body of a profile update, so
/// the identifier never travels in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub full_name: String,
    pub birthday: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl NewPatient {
    /// Attach the identifier issued by the backend.
    pub fn into_patient(self, id: PatientId) -> Patient {
        Patient {
            id,
            full_name: self.full_name,
            birthday: self.birthday,
            diagnosis_date: self.diagnosis_date,
            about: self.about,
        }
    }
}

/// Check profile dates and names against `today`.
pub fn validate_patient(
    full_name: &str,
    birthday: NaiveDate,
    diagnosis_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if full_name.trim().is_empty() {
        errors.add("fullName", "Full name is required.");
    }
    if birthday > today {
        errors.add("birthday", "Birthday can't be in the future.");
    }
    if let Some(diagnosed) = diagnosis_date {
        if diagnosed > today {
            errors.add("diagnosisDate", "Diagnosis date can't be in the future.");
        }
        if diagnosed < birthday {
            errors.add("diagnosisDate", "Diagnosis date can't be before birthday.");
        }
    }
    errors.into_result()
}
