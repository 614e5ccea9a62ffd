//! # Book Service
//!
//! Book CRUD plus the stock and reassignment operations.
//!
//! Every mutation follows the same path: load the stored row inside a unit
//! of work, let the entity validate and mutate itself, write it back and
//! commit. An entity error returns before the commit, so the dropped unit
//! of work rolls back and the stored row keeps its previous values.

use shelf_core::{Author, Book, CoreResult, Genre};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::BookRepository;

/// Orchestrates book operations.
#[derive(Debug, Clone)]
pub struct BookService {
    db: Database,
}

impl BookService {
    pub fn new(db: Database) -> Self {
        BookService { db }
    }

    /// All books, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Book>> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).all().await
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Book>> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).find_by_id(id).await
    }

    pub async fn get_by_title(&self, title: &str) -> DbResult<Option<Book>> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).find_by_title(title).await
    }

    /// Total number of books in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).count().await
    }

    /// Persists a new book and returns it with its generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - author or genre not stored
    pub async fn add(&self, book: &Book) -> DbResult<Book> {
        let mut uow = self.db.begin().await?;
        let id = uow.books().insert(book).await?;
        uow.commit().await?;

        debug!(id = %id, title = %book.title(), "Book added");
        Ok(book.clone().with_id(id))
    }

    /// Overwrites every field of the stored book with `book`'s values.
    ///
    /// The author and genre `book` points at are resolved in the same unit
    /// of work; a dangling reference fails with `MissingReference`.
    pub async fn update(&self, book: &Book) -> DbResult<Option<Book>> {
        let mut uow = self.db.begin().await?;

        let Some(mut stored) = uow.books().find_by_id(book.id()).await? else {
            return Ok(None);
        };

        let author = uow.authors().find_by_id(book.author_id()).await?;
        let genre = uow.genres().find_by_id(book.genre_id()).await?;

        stored.update_from(book, author.as_ref(), genre.as_ref())?;
        uow.books().update(&stored).await?;
        uow.commit().await?;

        Ok(Some(stored))
    }

    /// Removes a book.
    pub async fn delete(&self, id: i64) -> DbResult<Option<Book>> {
        let mut uow = self.db.begin().await?;

        let Some(book) = uow.books().find_by_id(id).await? else {
            return Ok(None);
        };

        uow.books().remove(id).await?;
        uow.commit().await?;

        info!(id = %id, title = %book.title(), "Book deleted");
        Ok(Some(book))
    }

    /// Adds `amount` copies to the stored stock.
    ///
    /// ## Returns
    /// * `Ok(Some(updated))` - stock increased
    /// * `Ok(None)` - no book with `id`
    /// * `Err(Domain(InvalidRestock))` - `amount <= 0`, stock unchanged
    /// * `Err(Domain(StockOverflow))` - stock would exceed `i64::MAX`
    pub async fn restock(&self, id: i64, amount: i64) -> DbResult<Option<Book>> {
        debug!(id = %id, amount = amount, "Restocking book");
        self.mutate(id, |book| book.restock(amount)).await
    }

    /// Removes `amount` copies from the stored stock.
    ///
    /// ## Returns
    /// * `Ok(Some(updated))` - stock decreased
    /// * `Ok(None)` - no book with `id`
    /// * `Err(Domain(InsufficientStock))` - negative or more than in stock
    pub async fn sell(&self, id: i64, amount: i64) -> DbResult<Option<Book>> {
        debug!(id = %id, amount = amount, "Selling book");
        self.mutate(id, |book| book.sell(amount)).await
    }

    /// Points the stored book at another author.
    pub async fn change_author(
        &self,
        id: i64,
        author: Option<&Author>,
    ) -> DbResult<Option<Book>> {
        self.mutate(id, |book| book.change_author(author)).await
    }

    /// Points the stored book at another genre.
    pub async fn change_genre(&self, id: i64, genre: Option<&Genre>) -> DbResult<Option<Book>> {
        self.mutate(id, |book| book.change_genre(genre)).await
    }

    /// Load, apply `op`, write back, commit.
    async fn mutate<F>(&self, id: i64, op: F) -> DbResult<Option<Book>>
    where
        F: FnOnce(&mut Book) -> CoreResult<()>,
    {
        let mut uow = self.db.begin().await?;

        let Some(mut book) = uow.books().find_by_id(id).await? else {
            return Ok(None);
        };

        op(&mut book)?;
        uow.books().update(&book).await?;
        uow.commit().await?;

        Ok(Some(book))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::service::test_support::{book, fiction, jane, services};
    use shelf_core::{CoreError, Money, UNKNOWN_AUTHOR_ID, UNKNOWN_GENRE_ID};

    #[tokio::test]
    async fn test_sell_whole_stock() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let sold = services.books.sell(dune.id(), 3).await.unwrap().unwrap();
        assert_eq!(sold.stock(), 0);
        assert_eq!(sold.status(), "Not available: (0)");

        let stored = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), 0);
    }

    #[tokio::test]
    async fn test_restock() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let restocked = services.books.restock(dune.id(), 5).await.unwrap().unwrap();
        assert_eq!(restocked.stock(), 8);
        assert_eq!(restocked.status(), "Available: (8)");
    }

    #[tokio::test]
    async fn test_out_of_range_leaves_stock_unchanged() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        for amount in [0, -5] {
            let err = services.books.restock(dune.id(), amount).await.unwrap_err();
            assert!(err.as_domain().is_some_and(CoreError::is_out_of_range));
        }
        for amount in [4, -1] {
            let err = services.books.sell(dune.id(), amount).await.unwrap_err();
            assert!(matches!(
                err,
                DbError::Domain(CoreError::InsufficientStock { available: 3, .. })
            ));
        }

        let stored = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), 3);
    }

    #[tokio::test]
    async fn test_stock_ops_on_missing_book() {
        let services = services().await;

        assert!(services.books.restock(404, 1).await.unwrap().is_none());
        assert!(services.books.sell(404, 1).await.unwrap().is_none());
        assert!(services.books.delete(404).await.unwrap().is_none());
        assert!(services.books.get_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_title_and_all() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;
        book(&services, "Emma", &genre, &author, 1).await;

        let found = services.books.get_by_title("Dune").await.unwrap();
        assert_eq!(found, Some(dune));
        assert!(services.books.get_by_title("Ulysses").await.unwrap().is_none());

        let titles: Vec<String> = services
            .books
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|b| b.title().to_string())
            .collect();
        assert_eq!(titles, ["Dune", "Emma"]);
        assert_eq!(services.books.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_with_unknown_reference_fails() {
        let services = services().await;
        let genre = fiction(&services).await;
        let ghost = Author::new("Ghost", 30, "US", "", "g@x.com", "1234567890", true)
            .unwrap()
            .with_id(99);

        let orphan =
            Book::new("Orphan", "US", &genre, &ghost, Money::from_cents(100), 1).unwrap();
        let err = services.books.add(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(services.books.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_and_reassigns() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let edited = Book::restore(
            dune.id(),
            "Dune (Deluxe)",
            "UK",
            UNKNOWN_GENRE_ID,
            UNKNOWN_AUTHOR_ID,
            Money::from_major_minor(24, 50),
            7,
        )
        .unwrap();
        let updated = services.books.update(&edited).await.unwrap().unwrap();
        assert_eq!(updated, edited);

        let stored = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Dune (Deluxe)");
        assert_eq!(stored.price().cents(), 2450);
        assert_eq!(stored.author_id(), UNKNOWN_AUTHOR_ID);
        assert_eq!(stored.genre_id(), UNKNOWN_GENRE_ID);
    }

    #[tokio::test]
    async fn test_update_with_missing_author_is_rejected() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let edited =
            Book::restore(dune.id(), "Renamed", "US", genre.id(), 99, Money::zero(), 3).unwrap();
        let err = services.books.update(&edited).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::MissingReference { entity: "Author" })
        ));

        let stored = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Dune");

        let ghost = Book::restore(404, "Ghost", "US", 1, 1, Money::zero(), 0).unwrap();
        assert!(services.books.update(&ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_change_author_and_genre() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let unknown = services.authors.get_by_id(UNKNOWN_AUTHOR_ID).await.unwrap();
        let moved = services
            .books
            .change_author(dune.id(), unknown.as_ref())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.author_id(), UNKNOWN_AUTHOR_ID);

        let err = services.books.change_genre(dune.id(), None).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::MissingReference { entity: "Genre" })
        ));

        let stored = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(stored.genre_id(), genre.id());
        assert_eq!(stored.author_id(), UNKNOWN_AUTHOR_ID);
    }

    #[tokio::test]
    async fn test_invalid_stored_row_is_reported_on_load() {
        use shelf_core::ValidationError;

        let services = services().await;

        // A tab survives SQLite's trim() but not the entity's blank check
        let id = sqlx::query(
            r#"
            INSERT INTO books (title, country, genre_id, author_id, price_cents, stock)
            VALUES (char(9), 'US', 1, 1, 100, 1)
            "#,
        )
        .execute(services.books.db.pool())
        .await
        .unwrap()
        .last_insert_rowid();

        let err = services.books.get_by_id(id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::CorruptRow {
                entity: "Book",
                source: ValidationError::Required { field: "title" },
                ..
            }
        ));
        assert!(matches!(
            services.books.get_all().await,
            Err(DbError::CorruptRow { entity: "Book", .. })
        ));

        // Mutations load first, so they refuse the row instead of rewriting it
        assert!(matches!(
            services.books.restock(id, 1).await,
            Err(DbError::CorruptRow { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        let removed = services.books.delete(dune.id()).await.unwrap();
        assert_eq!(removed, Some(dune.clone()));
        assert!(services.books.get_by_id(dune.id()).await.unwrap().is_none());
    }
}
