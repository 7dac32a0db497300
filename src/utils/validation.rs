use crate::utils::error::{CpfError, Result};
use std::collections::HashSet;

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CpfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CpfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(CpfError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let allowed: HashSet<&str> = SUPPORTED_FORMATS.iter().copied().collect();
    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(CpfError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

/// Report file stem: no separators, so outputs stay inside the output directory.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    validate_non_empty_string(field_name, stem)?;

    if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(CpfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: stem.to_string(),
            reason: "File name cannot contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CpfError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CpfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
