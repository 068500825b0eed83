//! Wire contracts for the employee resource.
//!
//! Create and update payloads are validated here, before any store access.
//! Update fields are applied by presence: an absent (or null) field is never
//! forwarded to the store, a present field always is, even when empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use entity::employees;

use crate::error::ApiError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_DEPARTMENT_LEN: usize = 50;
pub const MAX_POSITION_LEN: usize = 50;

/// Hard ceiling for salary input sanity checks.
pub const MAX_SALARY: f64 = 10_000_000.0;

#[derive(Clone, Debug, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_optional_text(&self.phone, "phone", MAX_PHONE_LEN)?;
        validate_optional_text(&self.department, "department", MAX_DEPARTMENT_LEN)?;
        validate_optional_text(&self.position, "position", MAX_POSITION_LEN)?;
        validate_salary(self.salary)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_optional_text(&self.phone, "phone", MAX_PHONE_LEN)?;
        validate_optional_text(&self.department, "department", MAX_DEPARTMENT_LEN)?;
        validate_optional_text(&self.position, "position", MAX_POSITION_LEN)?;
        validate_salary(self.salary)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            department: model.department,
            position: model.position,
            salary: model.salary,
            hire_date: model.hire_date,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "name is too long ({} chars, max {MAX_NAME_LEN})",
            name.len()
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("email must not be empty"));
    }
    if trimmed.len() > MAX_EMAIL_LEN {
        return Err(ApiError::validation(format!(
            "email is too long ({} chars, max {MAX_EMAIL_LEN})",
            trimmed.len()
        )));
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ApiError::validation("email is not a valid address"));
    }
    Ok(())
}

fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ApiError> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(ApiError::validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

fn validate_salary(salary: Option<f64>) -> Result<(), ApiError> {
    if let Some(value) = salary {
        if value < 0.0 {
            return Err(ApiError::validation("salary cannot be negative"));
        }
        if value > MAX_SALARY {
            return Err(ApiError::validation(
                "salary exceeds maximum allowed value",
            ));
        }
    }
    Ok(())
}
