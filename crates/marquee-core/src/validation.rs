//! # Validation Module
//!
//! Input validation rules for Marquee.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Console prompts (apps/console)                           │
//! │  ├── Re-prompt loop on invalid input                               │
//! │  └── Calls THIS MODULE to decide valid/invalid                     │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Catalog operations (marquee-core)                        │
//! │  └── Same checks again before any mutation                         │
//! │                                                                     │
//! │  The retry/prompt behaviour is a presentation concern; this module │
//! │  only answers "is this value acceptable" with a typed result.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use marquee_core::validation::{validate_title, validate_pin};
//!
//! assert!(validate_title("Dune").is_ok());
//! assert!(validate_pin("1234").is_ok());
//! assert!(validate_pin("12ab").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a patron first or last name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - May contain digits, spaces, `+` and `-` only
pub fn validate_contact_number(contact: &str) -> ValidationResult<()> {
    let contact = contact.trim();

    if contact.is_empty() {
        return Err(ValidationError::Required {
            field: "contact number".to_string(),
        });
    }

    if contact.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "contact number".to_string(),
            max: 20,
        });
    }

    if !contact
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "contact number".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    Ok(())
}

/// Validates a member PIN.
///
/// ## Rules
/// - Exactly four characters
/// - All four must be ASCII digits
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be a four-digit number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a running time in minutes.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must be at most 600
pub fn validate_duration(minutes: u32) -> ValidationResult<()> {
    if minutes == 0 {
        return Err(ValidationError::MustBePositive {
            field: "duration".to_string(),
        });
    }

    if minutes > 600 {
        return Err(ValidationError::OutOfRange {
            field: "duration".to_string(),
            min: 1,
            max: 600,
        });
    }

    Ok(())
}

/// Validates a copy count for a single add/remove transaction.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must be at most 100 per transaction
pub fn validate_copy_count(copies: u32) -> ValidationResult<()> {
    if copies == 0 {
        return Err(ValidationError::MustBePositive {
            field: "copies".to_string(),
        });
    }

    if copies > 100 {
        return Err(ValidationError::OutOfRange {
            field: "copies".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
