use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Company,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim() {
            "student" => Ok(Role::Student),
            "company" => Ok(Role::Company),
            other => Err(AppError::Validation(format!(
                "Invalid role '{other}': expected 'student' or 'company'"
            ))),
        }
    }
}

/// Serde hook for optional text inputs: trims, and treats blank as absent.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Returns the trimmed value, or a 400 naming the field when it is blank.
pub fn require_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}
