//! Authentication primitives: login credentials and signup details.
//!
//! Form values are validated here before the controller hands them to the
//! user API port.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login or signup values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Full name was missing or blank once trimmed.
    EmptyFullName,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("demo", "password").unwrap();
/// assert_eq!(creds.username(), "demo");
/// assert!(!creds.remember());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
    remember: bool,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            remember: false,
        })
    }

    /// Ask the API client to keep the session beyond the browser session.
    pub fn remembered(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether the session should be long lived.
    pub fn remember(&self) -> bool {
        self.remember
    }
}

/// Validated account details submitted by the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    username: String,
    full_name: String,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Construct signup details from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(LoginValidationError::EmptyFullName);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            full_name: full_name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Display name for the new account.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Initial password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
