// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::store::{Job, Subscription};

#[derive(Deserialize, Validate)]
#[serde(crate = "rocket::serde")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "company must not be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

#[derive(Deserialize, Validate)]
#[serde(crate = "rocket::serde")]
pub struct SubscribeRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub keyword: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateJobResponse {
    pub message: String,
    pub job: Job,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SubscribeResponse {
    pub message: String,
    pub subscription: Subscription,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    pub fn new(error: String, error_code: String, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            errors,
        }
    }

    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        for (field, messages) in errors.field_errors() {
            for error in messages {
                field_errors.push(FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("invalid value for {}", field)),
                });
            }
        }

        Self::new(
            "Request failed validation".to_string(),
            "VALIDATION_ERROR".to_string(),
            field_errors,
        )
    }
}
