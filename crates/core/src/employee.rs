//! Employee record validation.
//!
//! Both the create form and the update body are checked here before any
//! row is written or any upload is kept.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Designations offered by the UI. The server stores any non-empty value.
pub const DESIGNATIONS: &[&str] = &[
    "Manager",
    "Assistant Manager",
    "Senior Developer",
    "Junior Developer",
];

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 100;

pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_INVALID_AGE: &str = "Valid age is required";

/// Whether `designation` is one of [`DESIGNATIONS`].
pub fn is_known_designation(designation: &str) -> bool {
    DESIGNATIONS.contains(&designation)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Text fields of a create request, as received.
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub designation: Option<String>,
    pub details: Option<String>,
}

/// A record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub image: Option<String>,
    pub name: String,
    pub age: i32,
    pub designation: String,
    pub details: Option<String>,
}

/// The mutable subset of a record. Image and designation are never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: String,
    pub age: i32,
    pub details: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a create form. `image` is the public path of the first upload.
pub fn validate_new_employee(
    form: &EmployeeForm,
    image: Option<String>,
) -> Result<NewEmployee, CoreError> {
    let (Some(name), Some(age), Some(designation)) = (
        trimmed(form.name.as_deref()),
        trimmed(form.age.as_deref()),
        trimmed(form.designation.as_deref()),
    ) else {
        return Err(CoreError::Validation(MSG_MISSING_FIELDS.into()));
    };

    let age = parse_age(age).ok_or_else(|| CoreError::Validation(MSG_INVALID_AGE.into()))?;
    validate_age(age)?;

    Ok(NewEmployee {
        image,
        name: name.to_string(),
        age,
        designation: designation.to_string(),
        details: trimmed(form.details.as_deref()).map(str::to_string),
    })
}

/// Validate an update body.
///
/// `age` may be a JSON number or a numeric string; anything else is
/// rejected. Empty `details` clears the column.
pub fn validate_employee_update(
    name: Option<&str>,
    age: Option<&serde_json::Value>,
    details: Option<&str>,
) -> Result<EmployeeUpdate, CoreError> {
    let name = trimmed(name).ok_or_else(|| CoreError::Validation(MSG_NAME_REQUIRED.into()))?;

    let age = age
        .and_then(age_from_json)
        .ok_or_else(|| CoreError::Validation(MSG_INVALID_AGE.into()))?;
    validate_age(age)?;

    Ok(EmployeeUpdate {
        name: name.to_string(),
        age,
        details: trimmed(details).map(str::to_string),
    })
}

/// Reject ages outside `MIN_AGE..=MAX_AGE`.
pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Age must be between {MIN_AGE} and {MAX_AGE}"
        )))
    }
}

/// Parse an age from text, ignoring surrounding whitespace.
pub fn parse_age(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn age_from_json(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        serde_json::Value::String(s) => parse_age(s),
        _ => None,
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
