use serde::{Deserialize, Serialize};

use crate::util::validation;

/// Body of `POST /form-validation-example`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Signup {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Per-field messages for a submission that failed shape validation.
///
/// Keys keep the names the form client reads (`emailValid`,
/// `usernameValid`, `passwordValid`); a field is present only when it
/// failed. Built fresh per attempt and discarded with the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_valid: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_valid: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_valid: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.email_valid.is_none() && self.username_valid.is_none() && self.password_valid.is_none()
    }
}

impl Signup {
    /// The authoritative server-side shape check. Availability is not
    /// re-checked here; only the synchronous validators run.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !validation::is_valid_email(&self.email) {
            errors.email_valid = Some("Invalid email address");
        }

        if !validation::is_valid_username(&self.username) {
            errors.username_valid = Some("Invalid username");
        }

        if !validation::is_valid_password(&self.password) {
            errors.password_valid = Some("Invalid password");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
