//! # Book Repository
//!
//! SQL for the `books` table, including the foreign-key lookups that stand
//! in for an author's or genre's list of books.
//!
//! ## Back-references
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Author / Genre never hold their books. Asking "which books?" is a    │
//! │  query by foreign key, answered fresh each time:                      │
//! │                                                                         │
//! │    find_by_author(7)   → SELECT ... WHERE author_id = 7                │
//! │    find_by_genre(3)    → SELECT ... WHERE genre_id  = 3                │
//! │    count_by_genre(3)   → SELECT COUNT(*) ... WHERE genre_id = 3        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::{Book, Money};
use sqlx::{FromRow, SqliteConnection};
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    country: String,
    genre_id: i64,
    author_id: i64,
    price_cents: Money,
    stock: i64,
}

impl TryFrom<BookRow> for Book {
    type Error = DbError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Book::restore(
            id,
            row.title,
            row.country,
            row.genre_id,
            row.author_id,
            row.price_cents,
            row.stock,
        )
        .map_err(|source| DbError::CorruptRow {
            entity: "Book",
            id,
            source,
        })
    }
}

const SELECT_BOOKS: &str = r#"
    SELECT id, title, country, genre_id, author_id, price_cents, stock
    FROM books
"#;

/// Repository for book rows.
#[derive(Debug)]
pub struct BookRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> BookRepository<'c> {
    /// Creates a repository over the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        BookRepository { conn }
    }

    /// All books, ordered by id.
    pub async fn all(self) -> DbResult<Vec<Book>> {
        self.fetch_many(&format!("{SELECT_BOOKS} ORDER BY id"), None)
            .await
    }

    /// Gets a book by id.
    pub async fn find_by_id(self, id: i64) -> DbResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!("{SELECT_BOOKS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(self.conn)
            .await?;

        row.map(Book::try_from).transpose()
    }

    /// First book (lowest id) with exactly this title.
    pub async fn find_by_title(self, title: &str) -> DbResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "{SELECT_BOOKS} WHERE title = ?1 ORDER BY id LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(self.conn)
        .await?;

        row.map(Book::try_from).transpose()
    }

    /// Books currently written by the given author.
    pub async fn find_by_author(self, author_id: i64) -> DbResult<Vec<Book>> {
        self.fetch_many(
            &format!("{SELECT_BOOKS} WHERE author_id = ?1 ORDER BY id"),
            Some(author_id),
        )
        .await
    }

    /// Books currently filed under the given genre.
    pub async fn find_by_genre(self, genre_id: i64) -> DbResult<Vec<Book>> {
        self.fetch_many(
            &format!("{SELECT_BOOKS} WHERE genre_id = ?1 ORDER BY id"),
            Some(genre_id),
        )
        .await
    }

    /// Live count of books filed under the given genre.
    pub async fn count_by_genre(self, genre_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE genre_id = ?1")
            .bind(genre_id)
            .fetch_one(self.conn)
            .await?;

        Ok(count)
    }

    /// Total number of books.
    pub async fn count(self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.conn)
            .await?;

        Ok(count)
    }

    /// Inserts a new book and returns the generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - author or genre id unknown
    pub async fn insert(self, book: &Book) -> DbResult<i64> {
        debug!(title = %book.title(), "Inserting book");

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, country, genre_id, author_id, price_cents, stock)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(book.title())
        .bind(book.country())
        .bind(book.genre_id())
        .bind(book.author_id())
        .bind(book.price())
        .bind(book.stock())
        .execute(self.conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes every column of an existing book.
    pub async fn update(self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id(), "Updating book");

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = ?2,
                country = ?3,
                genre_id = ?4,
                author_id = ?5,
                price_cents = ?6,
                stock = ?7
            WHERE id = ?1
            "#,
        )
        .bind(book.id())
        .bind(book.title())
        .bind(book.country())
        .bind(book.genre_id())
        .bind(book.author_id())
        .bind(book.price())
        .bind(book.stock())
        .execute(self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", book.id()));
        }

        Ok(())
    }

    /// Deletes a book row.
    pub async fn remove(self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Removing book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    async fn fetch_many(self, sql: &str, key: Option<i64>) -> DbResult<Vec<Book>> {
        let mut query = sqlx::query_as::<_, BookRow>(sql);
        if let Some(key) = key {
            query = query.bind(key);
        }

        let rows = query.fetch_all(self.conn).await?;
        rows.into_iter().map(Book::try_from).collect()
    }
}
