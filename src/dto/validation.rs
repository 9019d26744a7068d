//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted uploader name, counted in characters after trimming.
pub const MAX_UPLOADER_NAME_LEN: usize = 100;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Validates an uploader name: required and at most [`MAX_UPLOADER_NAME_LEN`] characters.
///
/// # Examples
///
/// ```ignore
/// validate_uploader_name("Aunt May") // Ok
/// validate_uploader_name("   ")      // Err - blank
/// ```
pub fn validate_uploader_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("uploader_name_required");
        err.message = Some("Please enter your name".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_UPLOADER_NAME_LEN {
        let mut err = ValidationError::new("uploader_name_length");
        err.message =
            Some(format!("Name is too long (max {MAX_UPLOADER_NAME_LEN} characters)").into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uploader_name() {
        assert!(validate_uploader_name("Aunt May").is_ok());
        assert!(validate_uploader_name(&"a".repeat(100)).is_ok());
        assert!(validate_uploader_name(&format!("  {}  ", "a".repeat(100))).is_ok());
        assert!(validate_uploader_name(&"a".repeat(101)).is_err());
        assert!(validate_uploader_name("").is_err());
        assert!(validate_uploader_name(" \t ").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("g1").is_ok());
        assert!(validate_not_blank("  ").is_err());
    }
}
