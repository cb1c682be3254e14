//! User account model, profile patches and the outgoing update payload.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::patient::{Patient, PatientId};
use crate::domain::validation::ValidationErrors;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Reference from a user account to the patient profile it manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRef {
    /// Referenced profile.
    pub id: PatientId,
}

/// Authenticated account as returned by the user API.
///
/// A user references at most one patient profile, either their own or one
/// they manage on someone's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    /// Login name, usually an email address.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Managed patient profile, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
}

impl User {
    /// Identifier of the patient profile this user manages, if any.
    pub fn patient_id(&self) -> Option<&PatientId> {
        self.patient.as_ref().map(|patient| &patient.id)
    }

    /// Whether `patient` is the profile this user manages.
    pub fn owns_patient(&self, patient: &Patient) -> bool {
        self.patient_id() == Some(&patient.id)
    }

    /// Copy of this user with the patch applied. The password never lands in
    /// the display copy.
    pub fn apply(&self, patch: &UserPatch) -> Self {
        let mut merged = self.clone();
        if let Some(username) = &patch.username {
            merged.username.clone_from(username);
        }
        if let Some(full_name) = &patch.full_name {
            merged.full_name.clone_from(full_name);
        }
        merged
    }

    /// Copy of this user now referencing `patient_id`.
    pub fn with_patient(&self, patient_id: PatientId) -> Self {
        Self {
            patient: Some(PatientRef { id: patient_id }),
            ..self.clone()
        }
    }
}

/// Partial edit submitted by the account form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New login name.
    pub username: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New password.
    pub password: Option<Zeroizing<String>>,
    /// Must repeat `password`.
    pub password_confirmation: Option<Zeroizing<String>>,
}

impl UserPatch {
    /// Patch changing only the username.
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Patch changing only the full name.
    pub fn full_name(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            ..Self::default()
        }
    }

    /// Add a password change to the patch.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password_confirmation = Some(Zeroizing::new(password.clone()));
        self.password = Some(Zeroizing::new(password));
        self
    }
}

/// Body sent to the user API on account update.
///
/// Only account attributes travel: the username is omitted when it did not
/// change, otherwise the backend answers with a "username taken" conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// Omitted when unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Display name to store.
    pub full_name: String,
    /// Sent only when changed.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_secret"
    )]
    pub password: Option<Zeroizing<String>>,
}

impl UserUpdate {
    /// Build the payload for `merged`, given the account as it was before.
    pub fn from_merged(previous: &User, merged: &User, patch: &UserPatch) -> Self {
        let username = (merged.username != previous.username).then(|| merged.username.clone());
        Self {
            username,
            full_name: merged.full_name.clone(),
            password: patch.password.clone(),
        }
    }
}

fn serialize_secret<S>(value: &Option<Zeroizing<String>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(secret) => serializer.serialize_str(secret.as_str()),
        None => serializer.serialize_none(),
    }
}

/// Check a user account edit before it is submitted.
///
/// `candidate` is the merged account; `patch` supplies the password fields.
pub fn validate_user(candidate: &User, patch: &UserPatch) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if candidate.username.trim().is_empty() {
        errors.add("username", "Email address is required.");
    }
    if candidate.full_name.trim().is_empty() {
        errors.add("fullName", "Full name is required.");
    }
    if let Some(password) = &patch.password {
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {PASSWORD_MIN_LENGTH} characters long."),
            );
        }
        let confirmed = patch
            .password_confirmation
            .as_ref()
            .is_some_and(|confirmation| confirmation.as_str() == password.as_str());
        if !confirmed {
            errors.add("passwordConfirmation", "Passwords don't match.");
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests;
