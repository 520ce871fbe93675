//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Identifiers: lead, employee, rule, account
pub const MAX_ID_LEN: usize = 128;

/// Product labels as typed into lead forms
pub const MAX_PRODUCT_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("emp-1", "employee_id", MAX_ID_LEN).is_ok());
        assert!(validate_required_text("  ", "employee_id", MAX_ID_LEN).is_err());
        let long = "x".repeat(MAX_PRODUCT_LEN + 1);
        let err = validate_required_text(&long, "product", MAX_PRODUCT_LEN).unwrap_err();
        assert!(err.message.contains("too long"));
    }
}
