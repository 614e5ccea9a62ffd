//! # Author Repository
//!
//! SQL for the `authors` table.

use shelf_core::Author;
use sqlx::{FromRow, SqliteConnection};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Column layout of `authors`.
#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    age: i64,
    country: String,
    description: String,
    email: String,
    phone: String,
    status: bool,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DbError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Author::new(
            row.name,
            row.age,
            row.country,
            row.description,
            row.email,
            row.phone,
            row.status,
        )
        .map(|author| author.with_id(id))
        .map_err(|source| DbError::CorruptRow {
            entity: "Author",
            id,
            source,
        })
    }
}

const SELECT_AUTHORS: &str = r#"
    SELECT id, name, age, country, description, email, phone, status
    FROM authors
"#;

/// Repository for author rows.
///
/// ## Usage
/// ```rust,ignore
/// let mut uow = db.begin().await?;
/// let author = uow.authors().find_by_id(2).await?;
/// ```
#[derive(Debug)]
pub struct AuthorRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> AuthorRepository<'c> {
    /// Creates a repository over the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        AuthorRepository { conn }
    }

    /// All authors, ordered by id.
    pub async fn all(self) -> DbResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!("{SELECT_AUTHORS} ORDER BY id"))
            .fetch_all(self.conn)
            .await?;

        rows.into_iter().map(Author::try_from).collect()
    }

    /// Gets an author by id.
    pub async fn find_by_id(self, id: i64) -> DbResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!("{SELECT_AUTHORS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(self.conn)
            .await?;

        row.map(Author::try_from).transpose()
    }

    /// First author (lowest id) with exactly this name.
    pub async fn find_by_name(self, name: &str) -> DbResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "{SELECT_AUTHORS} WHERE name = ?1 ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(self.conn)
        .await?;

        row.map(Author::try_from).transpose()
    }

    /// Inserts a new author and returns the generated id.
    ///
    /// The id carried by `author` is ignored.
    pub async fn insert(self, author: &Author) -> DbResult<i64> {
        debug!(name = %author.name(), "Inserting author");

        let result = sqlx::query(
            r#"
            INSERT INTO authors (name, age, country, description, email, phone, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(author.name())
        .bind(author.age())
        .bind(author.country())
        .bind(author.description())
        .bind(author.email())
        .bind(author.phone())
        .bind(author.status())
        .execute(self.conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes every column of an existing author.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no row with that id
    pub async fn update(self, author: &Author) -> DbResult<()> {
        debug!(id = %author.id(), "Updating author");

        let result = sqlx::query(
            r#"
            UPDATE authors SET
                name = ?2,
                age = ?3,
                country = ?4,
                description = ?5,
                email = ?6,
                phone = ?7,
                status = ?8
            WHERE id = ?1
            "#,
        )
        .bind(author.id())
        .bind(author.name())
        .bind(author.age())
        .bind(author.country())
        .bind(author.description())
        .bind(author.email())
        .bind(author.phone())
        .bind(author.status())
        .execute(self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", author.id()));
        }

        Ok(())
    }

    /// Deletes an author row.
    ///
    /// Fails with `ForeignKeyViolation` while books still reference it.
    pub async fn remove(self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Removing author");

        let result = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id)
            .execute(self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", id));
        }

        Ok(())
    }
}
