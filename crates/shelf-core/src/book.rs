//! # Book
//!
//! A stocked title in the catalog.
//!
//! ## Relations
//! ```text
//! ┌─────────────────┐        ┌─────────────────┐
//! │     Author      │        │      Genre      │
//! │  id ◄───────────┼──┐  ┌──┼──────────► id   │
//! └─────────────────┘  │  │  └─────────────────┘
//!                      │  │
//!               ┌──────┴──┴───────┐
//!               │      Book       │
//!               │  author_id (FK) │
//!               │  genre_id  (FK) │
//!               │  price, stock   │
//!               └─────────────────┘
//! ```
//!
//! A book holds only the ids of its author and genre. Both are always
//! positive: a book cannot exist without an author and a genre, and the
//! only way to change them is [`Book::change_author`] / [`Book::change_genre`].
//!
//! ## Stock Rules
//! - `restock(n)` requires `n > 0` and `stock + n` to fit in an `i64`
//! - `sell(n)` requires `0 <= n <= stock`
//! - A failed operation leaves the stock unchanged

use serde::Serialize;
use ts_rs::TS;

use crate::author::Author;
use crate::error::{CoreError, CoreResult};
use crate::genre::Genre;
use crate::money::Money;
use crate::validation::{
    validate_amount, validate_positive, validate_price, validate_text, ValidationResult,
};

/// A book in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Book {
    /// Store-assigned identity; `0` until persisted.
    id: i64,
    title: String,
    country: String,
    genre_id: i64,
    author_id: i64,
    price: Money,
    stock: i64,
}

impl Book {
    /// Creates a book for a persisted genre and author.
    ///
    /// Fails if any field is invalid, including a genre or author that has
    /// no store id yet.
    pub fn new(
        title: impl Into<String>,
        country: impl Into<String>,
        genre: &Genre,
        author: &Author,
        price: Money,
        stock: i64,
    ) -> ValidationResult<Self> {
        Book::restore(0, title, country, genre.id(), author.id(), price, stock)
    }

    /// Rebuilds a book from stored columns, running the same validation as
    /// [`Book::new`].
    pub fn restore(
        id: i64,
        title: impl Into<String>,
        country: impl Into<String>,
        genre_id: i64,
        author_id: i64,
        price: Money,
        stock: i64,
    ) -> ValidationResult<Self> {
        let mut book = Book {
            id,
            title: String::new(),
            country: String::new(),
            genre_id: 0,
            author_id: 0,
            price: Money::zero(),
            stock: 0,
        };

        book.set_title(title)?;
        book.set_country(country)?;
        book.set_genre_id(genre_id)?;
        book.set_author_id(author_id)?;
        book.set_price(price)?;
        book.set_stock(stock)?;

        Ok(book)
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

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn genre_id(&self) -> i64 {
        self.genre_id
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Availability derived from the current stock.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::{Book, Money};
    ///
    /// let book = Book::restore(1, "Dune", "US", 1, 1, Money::zero(), 2).unwrap();
    /// assert_eq!(book.status(), "Available: (2)");
    /// ```
    pub fn status(&self) -> String {
        let status = if self.stock > 0 {
            "Available"
        } else {
            "Not available"
        };

        format!("{}: ({})", status, self.stock)
    }

    // -------------------------------------------------------------------------
    // Validating setters
    // -------------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) -> ValidationResult<()> {
        let title = title.into();
        validate_text("title", &title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_country(&mut self, country: impl Into<String>) -> ValidationResult<()> {
        let country = country.into();
        validate_text("country", &country)?;
        self.country = country;
        Ok(())
    }

    pub fn set_price(&mut self, price: Money) -> ValidationResult<()> {
        validate_price("price", price)?;
        self.price = price;
        Ok(())
    }

    pub fn set_stock(&mut self, stock: i64) -> ValidationResult<()> {
        validate_amount("stock", stock)?;
        self.stock = stock;
        Ok(())
    }

    fn set_genre_id(&mut self, genre_id: i64) -> ValidationResult<()> {
        validate_positive("genre_id", genre_id)?;
        self.genre_id = genre_id;
        Ok(())
    }

    fn set_author_id(&mut self, author_id: i64) -> ValidationResult<()> {
        validate_positive("author_id", author_id)?;
        self.author_id = author_id;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Behaviors
    // -------------------------------------------------------------------------

    /// Adds `amount` copies to the stock. Only positive amounts are accepted.
    pub fn restock(&mut self, amount: i64) -> CoreResult<()> {
        if amount <= 0 {
            return Err(CoreError::InvalidRestock { amount });
        }

        self.stock = self
            .stock
            .checked_add(amount)
            .ok_or_else(|| CoreError::StockOverflow {
                title: self.title.clone(),
                stock: self.stock,
                amount,
            })?;
        Ok(())
    }

    /// Removes `amount` copies from the stock.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::{Book, Money};
    ///
    /// let mut book = Book::restore(1, "Dune", "US", 1, 1, Money::zero(), 3).unwrap();
    /// assert!(book.sell(4).is_err());
    /// assert_eq!(book.stock(), 3);
    ///
    /// book.sell(3).unwrap();
    /// assert_eq!(book.stock(), 0);
    /// ```
    pub fn sell(&mut self, amount: i64) -> CoreResult<()> {
        if amount < 0 || amount > self.stock {
            return Err(CoreError::InsufficientStock {
                title: self.title.clone(),
                available: self.stock,
                requested: amount,
            });
        }

        self.stock -= amount;
        Ok(())
    }

    /// Points the book at another author.
    pub fn change_author(&mut self, author: Option<&Author>) -> CoreResult<()> {
        let author = author.ok_or(CoreError::MissingReference { entity: "Author" })?;
        self.set_author_id(author.id())?;
        Ok(())
    }

    /// Points the book at another genre.
    pub fn change_genre(&mut self, genre: Option<&Genre>) -> CoreResult<()> {
        let genre = genre.ok_or(CoreError::MissingReference { entity: "Genre" })?;
        self.set_genre_id(genre.id())?;
        Ok(())
    }

    /// Overwrites every mutable field with the values of `other`, reassigning
    /// author and genre through [`Book::change_author`] and
    /// [`Book::change_genre`].
    ///
    /// All-or-nothing: on error `self` is unchanged. The id is kept.
    pub fn update_from(
        &mut self,
        other: &Book,
        author: Option<&Author>,
        genre: Option<&Genre>,
    ) -> CoreResult<()> {
        let mut updated = self.clone();
        updated.set_title(other.title())?;
        updated.set_country(other.country())?;
        updated.set_price(other.price())?;
        updated.set_stock(other.stock())?;
        updated.change_author(author)?;
        updated.change_genre(genre)?;

        *self = updated;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
