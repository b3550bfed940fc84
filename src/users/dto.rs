use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

use crate::users::repo_types::User;

/// Payload for POST /users/. All fields required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 2, max = 128, message = "Name must be between 2 and 128 characters"),
        custom(function = alphabetic_name)
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 128, message = "Name must be between 2 and 128 characters"),
        custom(function = alphabetic_name)
    )]
    pub last_name: String,
    #[validate(
        length(min = 2, max = 128, message = "Email must be between 2 and 128 characters"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = password_strength)
    )]
    pub password: String,
}

/// Payload for PUT /users/{id}. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 2, max = 128, message = "Name must be between 2 and 128 characters"),
        custom(function = alphabetic_name)
    )]
    pub first_name: Option<String>,
    #[validate(
        length(min = 2, max = 128, message = "Name must be between 2 and 128 characters"),
        custom(function = alphabetic_name)
    )]
    pub last_name: Option<String>,
    #[validate(
        length(min = 2, max = 128, message = "Email must be between 2 and 128 characters"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = password_strength)
    )]
    pub password: Option<String>,
}

/// Outbound projection of a user. Salt and password hash never appear here.
#[derive(Debug, Serialize)]
pub struct UserRead {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn alphabetic_name(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        let mut err = ValidationError::new("not_alphabetic");
        err.message = Some("Name must contain only letters".into());
        Err(err)
    }
}

fn password_strength(value: &str) -> Result<(), ValidationError> {
    if !value.chars().any(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("missing_digit");
        err.message = Some("Password must contain at least one digit".into());
        return Err(err);
    }
    if !value.chars().any(char::is_uppercase) {
        let mut err = ValidationError::new("missing_uppercase");
        err.message = Some("Password must contain at least one uppercase letter".into());
        return Err(err);
    }
    Ok(())
}
