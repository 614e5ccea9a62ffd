//! # Genre Repository
//!
//! SQL for the `genres` table.

use shelf_core::Genre;
use sqlx::{FromRow, SqliteConnection};
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct GenreRow {
    id: i64,
    name: String,
    description: String,
}

impl TryFrom<GenreRow> for Genre {
    type Error = DbError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Genre::new(row.name, row.description)
            .map(|genre| genre.with_id(id))
            .map_err(|source| DbError::CorruptRow {
                entity: "Genre",
                id,
                source,
            })
    }
}

/// Repository for genre rows.
#[derive(Debug)]
pub struct GenreRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> GenreRepository<'c> {
    /// Creates a repository over the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        GenreRepository { conn }
    }

    /// All genres, ordered by id.
    pub async fn all(self) -> DbResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, description FROM genres ORDER BY id",
        )
        .fetch_all(self.conn)
        .await?;

        rows.into_iter().map(Genre::try_from).collect()
    }

    /// Gets a genre by id.
    pub async fn find_by_id(self, id: i64) -> DbResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, description FROM genres WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.conn)
        .await?;

        row.map(Genre::try_from).transpose()
    }

    /// First genre (lowest id) with exactly this name.
    pub async fn find_by_name(self, name: &str) -> DbResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, description FROM genres WHERE name = ?1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(self.conn)
        .await?;

        row.map(Genre::try_from).transpose()
    }

    /// Inserts a new genre and returns the generated id.
    pub async fn insert(self, genre: &Genre) -> DbResult<i64> {
        debug!(name = %genre.name(), "Inserting genre");

        let result = sqlx::query("INSERT INTO genres (name, description) VALUES (?1, ?2)")
            .bind(genre.name())
            .bind(genre.description())
            .execute(self.conn)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes every column of an existing genre.
    pub async fn update(self, genre: &Genre) -> DbResult<()> {
        debug!(id = %genre.id(), "Updating genre");

        let result = sqlx::query("UPDATE genres SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(genre.id())
            .bind(genre.name())
            .bind(genre.description())
            .execute(self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Genre", genre.id()));
        }

        Ok(())
    }

    /// Deletes a genre row.
    pub async fn remove(self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Removing genre");

        let result = sqlx::query("DELETE FROM genres WHERE id = ?1")
            .bind(id)
            .execute(self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Genre", id));
        }

        Ok(())
    }
}
