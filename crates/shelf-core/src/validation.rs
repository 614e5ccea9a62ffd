//! # Validation Module
//!
//! Field predicates used by every entity setter.
//!
//! ## Two Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Predicates (is_invalid_text, is_valid_email, ...)                     │
//! │  ├── Pure bool checks on one value                                     │
//! │  └── No error states                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Validators (validate_text, validate_phone, ...)                       │
//! │  ├── Turn a failing predicate into a ValidationError                   │
//! │  └── Carry the field name for the message                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Entity setters (Author::set_email, Book::set_price, ...)             │
//! │                                                                         │
//! │  Database CHECK constraints catch anything that slips past             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{is_invalid_text, validate_phone};
//!
//! assert!(is_invalid_text("   "));
//! assert!(validate_phone("phone", "1234567890").is_ok());
//! assert!(validate_phone("phone", "12345").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MIN_PHONE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Predicates
// =============================================================================

/// True if the text is empty or whitespace only.
pub fn is_invalid_text(text: &str) -> bool {
    text.trim().is_empty()
}

/// True if the email contains `@`. No further format checking.
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@')
}

/// True if the number is zero or negative.
pub fn is_invalid_number(number: i64) -> bool {
    number <= 0
}

/// True if the price is negative. Zero is a valid price.
pub fn is_invalid_price(price: Money) -> bool {
    price.is_negative()
}

/// True if the amount is negative. Zero is a valid amount.
pub fn is_invalid_amount(amount: i64) -> bool {
    amount < 0
}

/// True if the phone is blank or shorter than [`MIN_PHONE_LENGTH`].
///
/// Digit content is checked by [`validate_phone`], not here.
pub fn is_invalid_phone(phone: &str) -> bool {
    is_invalid_text(phone) || phone.chars().count() < MIN_PHONE_LENGTH
}

// =============================================================================
// Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if is_invalid_text(value) {
        return Err(ValidationError::Required { field });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - Must contain `@`
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_email;
///
/// assert!(validate_email("email", "j@x.com").is_ok());
/// assert!(validate_email("email", "").is_err());
/// assert!(validate_email("email", "jx.com").is_err());
/// ```
pub fn validate_email(field: &'static str, value: &str) -> ValidationResult<()> {
    validate_text(field, value)?;

    if !is_valid_email(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must contain '@'",
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be blank
/// - At least [`MIN_PHONE_LENGTH`] characters
/// - ASCII digits only (`0`-`9`); other Unicode decimal digits are rejected
pub fn validate_phone(field: &'static str, value: &str) -> ValidationResult<()> {
    if is_invalid_text(value) {
        return Err(ValidationError::Required { field });
    }

    if is_invalid_phone(value) {
        return Err(ValidationError::TooShort {
            field,
            min: MIN_PHONE_LENGTH,
        });
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must contain only digits",
        });
    }

    Ok(())
}

/// Rejects zero and negative numbers (ages, foreign keys).
pub fn validate_positive(field: &'static str, value: i64) -> ValidationResult<()> {
    if is_invalid_number(value) {
        return Err(ValidationError::MustBePositive { field });
    }

    Ok(())
}

/// Rejects negative prices.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_price;
/// use shelf_core::Money;
///
/// assert!(validate_price("price", Money::from_cents(999)).is_ok());
/// assert!(validate_price("price", Money::zero()).is_ok());
/// assert!(validate_price("price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &'static str, value: Money) -> ValidationResult<()> {
    if is_invalid_price(value) {
        return Err(ValidationError::Negative { field });
    }

    Ok(())
}

/// Rejects negative amounts (stock levels).
pub fn validate_amount(field: &'static str, value: i64) -> ValidationResult<()> {
    if is_invalid_amount(value) {
        return Err(ValidationError::Negative { field });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_invalid_text() {
        assert!(is_invalid_text(""));
        assert!(is_invalid_text(" "));
        assert!(is_invalid_text("\t\n  "));

        assert!(!is_invalid_text("Dune"));
        assert!(!is_invalid_text("  padded  "));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("j@x.com"));
        assert!(is_valid_email("@"));
        assert!(!is_valid_email("jx.com"));
    }

    #[test]
    fn test_numeric_predicates() {
        assert!(is_invalid_number(0));
        assert!(is_invalid_number(-3));
        assert!(!is_invalid_number(1));

        assert!(is_invalid_amount(-1));
        assert!(!is_invalid_amount(0));

        assert!(is_invalid_price(Money::from_cents(-1)));
        assert!(!is_invalid_price(Money::zero()));
    }

    #[test]
    fn test_is_invalid_phone() {
        assert!(is_invalid_phone(""));
        assert!(is_invalid_phone("          "));
        assert!(is_invalid_phone("123456789"));

        assert!(!is_invalid_phone("1234567890"));
        // Length only; digits are the validator's job
        assert!(!is_invalid_phone("12345abcde"));
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(
            validate_phone("phone", "   "),
            Err(ValidationError::Required { field: "phone" })
        );
        assert_eq!(
            validate_phone("phone", "12345"),
            Err(ValidationError::TooShort {
                field: "phone",
                min: 10
            })
        );
        assert!(matches!(
            validate_phone("phone", "12345abcde"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_phone("phone", "0000000000").is_ok());

        // Arabic-Indic digits are decimal digits, but not ASCII ones
        assert_eq!(
            validate_phone("phone", "٠١٢٣٤٥٦٧٨٩"),
            Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "must contain only digits",
            })
        );
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("email", " "),
            Err(ValidationError::Required { field: "email" })
        );
        assert!(matches!(
            validate_email("email", "nobody"),
            Err(ValidationError::InvalidFormat { field: "email", .. })
        ));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("age", 1).is_ok());
        assert_eq!(
            validate_positive("age", 0),
            Err(ValidationError::MustBePositive { field: "age" })
        );
    }
}
