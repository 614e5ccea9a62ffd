//! # Author Service
//!
//! Author CRUD plus the cascading delete.
//!
//! ## Cascading Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete(7)                                                             │
//! │       │                                                                 │
//! │       ├── id == 1? ──► Err(ProtectedSentinel), nothing touched         │
//! │       ▼                                                                 │
//! │  begin unit of work                                                    │
//! │       │                                                                 │
//! │  load author 7 and "Unknown" author 1                                  │
//! │       │                                                                 │
//! │       ├── either missing? ──► Ok(None), nothing reassigned             │
//! │       ▼                                                                 │
//! │  for each book with author_id = 7:                                     │
//! │      book.change_author(Unknown), write row                            │
//! │       │                                                                 │
//! │  remove author 7                                                       │
//! │       │                                                                 │
//! │  commit once ──► reassignment and removal land together                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::{Author, Book, CoreError, UNKNOWN_AUTHOR_ID};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::{AuthorRepository, BookRepository};

/// Orchestrates author operations.
#[derive(Debug, Clone)]
pub struct AuthorService {
    db: Database,
}

impl AuthorService {
    pub fn new(db: Database) -> Self {
        AuthorService { db }
    }

    /// All authors, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Author>> {
        let mut conn = self.db.acquire().await?;
        AuthorRepository::new(&mut *conn).all().await
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Author>> {
        let mut conn = self.db.acquire().await?;
        AuthorRepository::new(&mut *conn).find_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Author>> {
        let mut conn = self.db.acquire().await?;
        AuthorRepository::new(&mut *conn).find_by_name(name).await
    }

    /// Persists a new author and returns it with its generated id.
    pub async fn add(&self, author: &Author) -> DbResult<Author> {
        let mut uow = self.db.begin().await?;
        let id = uow.authors().insert(author).await?;
        uow.commit().await?;

        debug!(id = %id, "Author added");
        Ok(author.clone().with_id(id))
    }

    /// Overwrites every field of the stored author with `author`'s values.
    ///
    /// ## Returns
    /// * `Ok(Some(updated))` - row updated
    /// * `Ok(None)` - no author with `author.id()`
    pub async fn update(&self, author: &Author) -> DbResult<Option<Author>> {
        let mut uow = self.db.begin().await?;

        let Some(mut stored) = uow.authors().find_by_id(author.id()).await? else {
            return Ok(None);
        };

        stored.update_from(author)?;
        uow.authors().update(&stored).await?;
        uow.commit().await?;

        Ok(Some(stored))
    }

    /// Deletes an author, first moving its books to the "Unknown" author.
    ///
    /// ## Returns
    /// * `Ok(Some(removed))` - author removed, books reassigned
    /// * `Ok(None)` - author (or the "Unknown" author) does not exist
    /// * `Err(Domain(ProtectedSentinel))` - `id` is the "Unknown" author
    pub async fn delete(&self, id: i64) -> DbResult<Option<Author>> {
        if id == UNKNOWN_AUTHOR_ID {
            warn!(id = %id, "Refusing to delete the fallback author");
            return Err(CoreError::ProtectedSentinel {
                entity: "Author",
                id,
            }
            .into());
        }

        let mut uow = self.db.begin().await?;

        let target = uow.authors().find_by_id(id).await?;
        let unknown = uow.authors().find_by_id(UNKNOWN_AUTHOR_ID).await?;
        let (Some(target), Some(unknown)) = (target, unknown) else {
            debug!(id = %id, "Author delete skipped: author or fallback missing");
            return Ok(None);
        };

        let books = uow.books().find_by_author(target.id()).await?;
        let reassigned = books.len();
        for mut book in books {
            book.change_author(Some(&unknown))?;
            uow.books().update(&book).await?;
        }

        uow.authors().remove(target.id()).await?;
        uow.commit().await?;

        info!(id = %id, reassigned = reassigned, "Author deleted");
        Ok(Some(target))
    }

    /// Display summary of a stored author.
    pub async fn info(&self, id: i64) -> DbResult<Option<String>> {
        Ok(self.get_by_id(id).await?.map(|author| author.info()))
    }

    /// Books currently written by the author.
    pub async fn books(&self, id: i64) -> DbResult<Vec<Book>> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).find_by_author(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
