//! # Author
//!
//! A book author. Every field validates on assignment; the constructor runs
//! the same setters, so an `Author` value is always valid.
//!
//! ## Field Rules
//! ```text
//! ┌──────────────┬────────────────────────────────────────────────────────┐
//! │ name         │ not blank                                              │
//! │ age          │ > 0                                                    │
//! │ country      │ not blank                                              │
//! │ description  │ blank → "Not provided" (never rejected)                │
//! │ email        │ not blank, contains '@'                                │
//! │ phone        │ not blank, >= 10 chars, digits only                    │
//! │ status       │ free (alive / active flag)                             │
//! └──────────────┴────────────────────────────────────────────────────────┘
//! ```
//!
//! Authors do not own their books. The books of an author are looked up by
//! foreign key through the author service.

use serde::Serialize;
use ts_rs::TS;

use crate::validation::{
    is_invalid_text, validate_email, validate_phone, validate_positive, validate_text,
    ValidationResult,
};
use crate::DEFAULT_DESCRIPTION;

/// A book author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Author {
    /// Store-assigned identity; `0` until persisted.
    id: i64,
    name: String,
    age: i64,
    country: String,
    description: String,
    email: String,
    phone: String,
    status: bool,
}

impl Author {
    /// Creates an author, validating every field.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::Author;
    ///
    /// let author = Author::new("Jane Doe", 40, "US", "", "j@x.com", "1234567890", true).unwrap();
    /// assert_eq!(author.description(), "Not provided");
    ///
    /// assert!(Author::new("Jane Doe", 0, "US", "", "j@x.com", "1234567890", true).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        age: i64,
        country: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        status: bool,
    ) -> ValidationResult<Self> {
        let mut author = Author {
            id: 0,
            name: String::new(),
            age: 0,
            country: String::new(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            status,
        };

        author.set_name(name)?;
        author.set_age(age)?;
        author.set_country(country)?;
        author.set_description(description);
        author.set_email(email)?;
        author.set_phone(phone)?;

        Ok(author)
    }

    /// Attaches the store-assigned id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn status(&self) -> bool {
        self.status
    }

    // -------------------------------------------------------------------------
    // Validating setters
    // -------------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_text("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> ValidationResult<()> {
        validate_positive("age", age)?;
        self.age = age;
        Ok(())
    }

    pub fn set_country(&mut self, country: impl Into<String>) -> ValidationResult<()> {
        let country = country.into();
        validate_text("country", &country)?;
        self.country = country;
        Ok(())
    }

    /// Sets the description; blank input falls back to "Not provided".
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.description = if is_invalid_text(&description) {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            description
        };
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> ValidationResult<()> {
        let email = email.into();
        validate_email("email", &email)?;
        self.email = email;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> ValidationResult<()> {
        let phone = phone.into();
        validate_phone("phone", &phone)?;
        self.phone = phone;
        Ok(())
    }

    pub fn set_status(&mut self, status: bool) {
        self.status = status;
    }

    /// Overwrites every mutable field with the values of `other`.
    ///
    /// All-or-nothing: on error `self` is unchanged. The id is kept.
    pub fn update_from(&mut self, other: &Author) -> ValidationResult<()> {
        let mut updated = self.clone();
        updated.set_name(other.name())?;
        updated.set_age(other.age())?;
        updated.set_country(other.country())?;
        updated.set_description(other.description());
        updated.set_email(other.email())?;
        updated.set_phone(other.phone())?;
        updated.set_status(other.status());

        *self = updated;
        Ok(())
    }

    /// One-line summary of the author for display.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::Author;
    ///
    /// let author = Author::new("Jane Doe", 40, "US", "desc", "j@x.com", "1234567890", true).unwrap();
    /// assert_eq!(
    ///     author.info(),
    ///     "Author: Jane Doe,Age: 40,Country: US,Description: desc,Email: j@x.com,Phone: 1234567890,Status: True"
    /// );
    /// ```
    pub fn info(&self) -> String {
        format!(
            "Author: {},Age: {},Country: {},Description: {},Email: {},Phone: {},Status: {}",
            self.name,
            self.age,
            self.country,
            self.description,
            self.email,
            self.phone,
            if self.status { "True" } else { "False" }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn jane() -> Author {
        Author::new("Jane Doe", 40, "US", "desc", "j@x.com", "1234567890", true).unwrap()
    }

    #[test]
    fn test_new_author_is_transient() {
        let author = jane();
        assert_eq!(author.id(), 0);
        assert_eq!(author.with_id(7).id(), 7);
    }

    #[test]
    fn test_rejects_non_positive_age() {
        for age in [0, -1, -40] {
            let err = Author::new("Jane", age, "US", "", "j@x.com", "1234567890", true).unwrap_err();
            assert_eq!(err, ValidationError::MustBePositive { field: "age" });
        }
        assert!(Author::new("Jane", 1, "US", "", "j@x.com", "1234567890", true).is_ok());
    }

    #[test]
    fn test_rejects_blank_text_fields() {
        let err = Author::new(" ", 40, "US", "", "j@x.com", "1234567890", true).unwrap_err();
        assert_eq!(err.field(), "name");

        let err = Author::new("Jane", 40, "", "", "j@x.com", "1234567890", true).unwrap_err();
        assert_eq!(err.field(), "country");
    }

    #[test]
    fn test_blank_description_defaults() {
        let mut author = jane();
        author.set_description("   ");
        assert_eq!(author.description(), DEFAULT_DESCRIPTION);

        author.set_description("Writes space operas");
        assert_eq!(author.description(), "Writes space operas");
    }

    #[test]
    fn test_email_rules() {
        let mut author = jane();
        assert_eq!(
            author.set_email(""),
            Err(ValidationError::Required { field: "email" })
        );
        assert!(author.set_email("no-at-sign").is_err());
        // Failed assignment leaves the old value
        assert_eq!(author.email(), "j@x.com");
    }

    #[test]
    fn test_phone_rules() {
        let mut author = jane();
        assert!(author.set_phone("123").is_err());
        assert!(author.set_phone("123456789a").is_err());
        assert_eq!(author.phone(), "1234567890");

        author.set_phone("09876543210").unwrap();
        assert_eq!(author.phone(), "09876543210");
    }

    #[test]
    fn test_update_from_keeps_id() {
        let mut stored = jane().with_id(3);
        let edited = Author::new("J. Doe", 41, "UK", "", "jd@x.com", "5555555555", false).unwrap();

        stored.update_from(&edited).unwrap();

        assert_eq!(stored.id(), 3);
        assert_eq!(stored.name(), "J. Doe");
        assert_eq!(stored.age(), 41);
        assert_eq!(stored.country(), "UK");
        assert_eq!(stored.description(), DEFAULT_DESCRIPTION);
        assert_eq!(stored.email(), "jd@x.com");
        assert_eq!(stored.phone(), "5555555555");
        assert!(!stored.status());
    }

    #[test]
    fn test_info_status_false() {
        let mut author = jane();
        author.set_status(false);
        assert!(author.info().ends_with("Status: False"));
    }
}
