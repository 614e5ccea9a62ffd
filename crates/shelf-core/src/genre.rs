//! # Genre
//!
//! A book genre. Unlike an author's description, a genre's description is
//! required: blank input is rejected, never defaulted.

use serde::Serialize;
use ts_rs::TS;

use crate::validation::{validate_text, ValidationResult};

/// A book genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Genre {
    /// Store-assigned identity; `0` until persisted.
    id: i64,
    name: String,
    description: String,
}

impl Genre {
    /// Creates a genre, validating both fields.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> ValidationResult<Self> {
        let mut genre = Genre {
            id: 0,
            name: String::new(),
            description: String::new(),
        };

        genre.set_name(name)?;
        genre.set_description(description)?;

        Ok(genre)
    }

    /// Attaches the store-assigned id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_text("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> ValidationResult<()> {
        let description = description.into();
        validate_text("description", &description)?;
        self.description = description;
        Ok(())
    }

    /// Overwrites name and description with the values of `other`.
    ///
    /// All-or-nothing: on error `self` is unchanged. The id is kept.
    pub fn update_from(&mut self, other: &Genre) -> ValidationResult<()> {
        let mut updated = self.clone();
        updated.set_name(other.name())?;
        updated.set_description(other.description())?;

        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_new_genre() {
        let genre = Genre::new("Fiction", "Fictional works").unwrap();
        assert_eq!(genre.id(), 0);
        assert_eq!(genre.name(), "Fiction");
        assert_eq!(genre.description(), "Fictional works");
    }

    #[test]
    fn test_blank_description_is_rejected() {
        assert_eq!(
            Genre::new("Fiction", "  ").unwrap_err(),
            ValidationError::Required {
                field: "description"
            }
        );
    }

    #[test]
    fn test_failed_set_keeps_value() {
        let mut genre = Genre::new("Fiction", "Fictional works").unwrap();
        assert!(genre.set_name("").is_err());
        assert_eq!(genre.name(), "Fiction");
    }

    #[test]
    fn test_update_from() {
        let mut stored = Genre::new("Fiction", "Fictional works").unwrap().with_id(4);
        let edited = Genre::new("Sci-Fi", "Science fiction").unwrap();

        stored.update_from(&edited).unwrap();

        assert_eq!(stored.id(), 4);
        assert_eq!(stored.name(), "Sci-Fi");
        assert_eq!(stored.description(), "Science fiction");
    }
}
