//! # shelf-core: Pure Domain Logic for the Book Catalog
//!
//! This crate holds the entities of the inventory (books, authors, genres),
//! the field validation they enforce, and the stock rules. It has zero I/O
//! dependencies; persistence lives in `shelf-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shelf Inventory Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (view models, navigation)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        shelf-db services (BookService, AuthorService, ...)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   book    │  │  author   │  │   genre   │  │ validation│  │   │
//! │  │   │  restock  │  │   info    │  │           │  │ predicates│  │   │
//! │  │   │   sell    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`author`], [`genre`], [`book`] - Self-validating entities
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field predicates and validators
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::{Author, Book, Genre, Money};
//!
//! let genre = Genre::new("Fiction", "Fictional works").unwrap().with_id(2);
//! let author = Author::new("Jane Doe", 40, "US", "desc", "j@x.com", "1234567890", true)
//!     .unwrap()
//!     .with_id(2);
//!
//! let mut book = Book::new("Dune", "US", &genre, &author, Money::from_major_minor(9, 99), 3).unwrap();
//! book.sell(3).unwrap();
//!
//! assert_eq!(book.stock(), 0);
//! assert_eq!(book.status(), "Not available: (0)");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod author;
pub mod book;
pub mod error;
pub mod genre;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use author::Author;
pub use book::Book;
pub use error::{CoreError, CoreResult, ValidationError};
pub use genre::Genre;
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id of the sentinel "Unknown" author.
///
/// Books whose author is deleted are reassigned here. The row is created by
/// the initial migration and cannot be deleted through the services.
pub const UNKNOWN_AUTHOR_ID: i64 = 1;

/// Id of the sentinel "Unknown" genre. See [`UNKNOWN_AUTHOR_ID`].
pub const UNKNOWN_GENRE_ID: i64 = 1;

/// Stored in place of a blank author description.
pub const DEFAULT_DESCRIPTION: &str = "Not provided";

/// Minimum number of characters in a phone number.
pub const MIN_PHONE_LENGTH: usize = 10;
