use validator::ValidateEmail;
use vx_error::{Error, Result};

pub fn storage(err: anyhow::Error) -> Error {
    Error::Storage(err.to_string())
}

pub fn found<T>(value: Option<T>) -> Result<T> {
    value.ok_or_else(Error::item_not_found)
}

pub fn affected(rows_affected: bool) -> Result<()> {
    if rows_affected {
        Ok(())
    } else {
        Err(Error::item_not_found())
    }
}

pub fn require(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

pub fn check_email(email: &str) -> Result<()> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(Error::Validation("Invalid email address".to_owned()))
    }
}
