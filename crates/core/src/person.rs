//! Person form validation.
//!
//! A create request carries three free-text fields. This module decides
//! which of three states the request is in and, for submissions, collects
//! every field problem at once so the caller can redisplay them together:
//!
//! - no parameters at all: [`FormState::Initial`], nothing validated
//! - one or more problems: [`FormState::Invalid`], raw input echoed back
//! - everything present and well formed: [`FormState::Valid`]

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

pub const FIRST_NAME_MISSING: &str = "First name was not provided.";
pub const LAST_NAME_MISSING: &str = "Last name was not provided.";
pub const PHONE_MISSING: &str = "Phone number was not provided.";
pub const PHONE_INVALID_FORMAT: &str = "Phone number was not in a valid format.";

/// Confirmation shown after a person has been stored.
pub const PERSON_CREATED: &str = "Successfully added the person to the list.";

/// Query/form parameter names used by the create form.
pub const PARAM_FIRST_NAME: &str = "firstName";
pub const PARAM_LAST_NAME: &str = "lastName";
pub const PARAM_PHONE: &str = "phone";

/// Lengths of the hyphen-separated groups in `DDD-DDD-DDDD`.
const PHONE_GROUP_LENGTHS: [usize; 3] = [3, 3, 4];

/// Order in which field errors are reported.
const FIELD_ORDER: [&str; 3] = ["first_name", "last_name", "phone"];

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Raw, unvalidated person fields as submitted by the client.
///
/// Missing fields deserialize to empty strings so they are reported as
/// "not provided" rather than rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PersonInput {
    #[validate(custom(function = "validate_first_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Person fields that passed validation. Names are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedPerson {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Outcome of evaluating a create-form request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// First page load: the request carried no parameters.
    Initial,
    /// At least one field is missing or malformed.
    Invalid {
        errors: Vec<FieldError>,
        values: PersonInput,
    },
    /// All fields present and well formed.
    Valid(ValidatedPerson),
}

impl PersonInput {
    /// Build the input from query/form parameters.
    ///
    /// Returns `None` when the request carried no parameters at all, which is
    /// the initial page load rather than an empty submission.
    pub fn from_form_params(params: &HashMap<String, String>) -> Option<Self> {
        if params.is_empty() {
            return None;
        }
        let field = |name: &str| params.get(name).cloned().unwrap_or_default();
        Some(Self {
            first_name: field(PARAM_FIRST_NAME),
            last_name: field(PARAM_LAST_NAME),
            phone: field(PARAM_PHONE),
        })
    }

    /// Validate every field, collecting all problems in field order.
    pub fn check(&self) -> Result<ValidatedPerson, Vec<FieldError>> {
        match self.validate() {
            Ok(()) => Ok(ValidatedPerson {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                phone: self.phone.clone(),
            }),
            Err(errors) => Err(ordered_field_errors(&errors)),
        }
    }

    /// Validate and convert into a [`CoreError::Validation`] on failure.
    pub fn into_validated(self) -> Result<ValidatedPerson, CoreError> {
        self.check().map_err(CoreError::Validation)
    }
}

impl FormState {
    /// Evaluate a create-form request. `None` means no parameters were sent.
    pub fn evaluate(submission: Option<PersonInput>) -> Self {
        let Some(values) = submission else {
            return FormState::Initial;
        };
        match values.check() {
            Ok(person) => FormState::Valid(person),
            Err(errors) => FormState::Invalid { errors, values },
        }
    }
}

/// Whether `phone` has the shape `DDD-DDD-DDDD`.
///
/// Checks the group count, each group's length, and that every character in
/// a group is an ASCII digit.
pub fn is_valid_phone_format(phone: &str) -> bool {
    let groups: Vec<&str> = phone.split('-').collect();
    groups.len() == PHONE_GROUP_LENGTHS.len()
        && groups
            .iter()
            .zip(PHONE_GROUP_LENGTHS)
            .all(|(group, len)| group.len() == len && group.bytes().all(|b| b.is_ascii_digit()))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", FIRST_NAME_MISSING));
    }
    Ok(())
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", LAST_NAME_MISSING));
    }
    Ok(())
}

// A blank phone is only reported as missing, never also as malformed.
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", PHONE_MISSING));
    }
    if !is_valid_phone_format(value) {
        return Err(field_error("phone_format", PHONE_INVALID_FORMAT));
    }
    Ok(())
}

/// Flatten `validator`'s map of errors into a list ordered like the form.
fn ordered_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.errors();
    FIELD_ORDER
        .iter()
        .flat_map(|field| match by_field.get(*field) {
            Some(ValidationErrorsKind::Field(list)) => list
                .iter()
                .map(|e| FieldError {
                    field: (*field).to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
        .collect()
}
