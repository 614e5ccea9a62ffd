//! # Genre Service
//!
//! Genre CRUD, the live book count, and the cascading delete (same shape
//! as the author service: orphaned books move to the "Unknown" genre in
//! the same commit that removes the genre).

use shelf_core::{Book, CoreError, Genre, UNKNOWN_GENRE_ID};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::{BookRepository, GenreRepository};

/// Orchestrates genre operations.
#[derive(Debug, Clone)]
pub struct GenreService {
    db: Database,
}

impl GenreService {
    pub fn new(db: Database) -> Self {
        GenreService { db }
    }

    /// All genres, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Genre>> {
        let mut conn = self.db.acquire().await?;
        GenreRepository::new(&mut *conn).all().await
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Genre>> {
        let mut conn = self.db.acquire().await?;
        GenreRepository::new(&mut *conn).find_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Genre>> {
        let mut conn = self.db.acquire().await?;
        GenreRepository::new(&mut *conn).find_by_name(name).await
    }

    /// Persists a new genre and returns it with its generated id.
    pub async fn add(&self, genre: &Genre) -> DbResult<Genre> {
        let mut uow = self.db.begin().await?;
        let id = uow.genres().insert(genre).await?;
        uow.commit().await?;

        debug!(id = %id, "Genre added");
        Ok(genre.clone().with_id(id))
    }

    /// Overwrites name and description of the stored genre.
    pub async fn update(&self, genre: &Genre) -> DbResult<Option<Genre>> {
        let mut uow = self.db.begin().await?;

        let Some(mut stored) = uow.genres().find_by_id(genre.id()).await? else {
            return Ok(None);
        };

        stored.update_from(genre)?;
        uow.genres().update(&stored).await?;
        uow.commit().await?;

        Ok(Some(stored))
    }

    /// Deletes a genre, first moving its books to the "Unknown" genre.
    ///
    /// ## Returns
    /// * `Ok(Some(removed))` - genre removed, books reassigned
    /// * `Ok(None)` - genre (or the "Unknown" genre) does not exist
    /// * `Err(Domain(ProtectedSentinel))` - `id` is the "Unknown" genre
    pub async fn delete(&self, id: i64) -> DbResult<Option<Genre>> {
        if id == UNKNOWN_GENRE_ID {
            warn!(id = %id, "Refusing to delete the fallback genre");
            return Err(CoreError::ProtectedSentinel { entity: "Genre", id }.into());
        }

        let mut uow = self.db.begin().await?;

        let target = uow.genres().find_by_id(id).await?;
        let unknown = uow.genres().find_by_id(UNKNOWN_GENRE_ID).await?;
        let (Some(target), Some(unknown)) = (target, unknown) else {
            debug!(id = %id, "Genre delete skipped: genre or fallback missing");
            return Ok(None);
        };

        let books = uow.books().find_by_genre(target.id()).await?;
        let reassigned = books.len();
        for mut book in books {
            book.change_genre(Some(&unknown))?;
            uow.books().update(&book).await?;
        }

        uow.genres().remove(target.id()).await?;
        uow.commit().await?;

        info!(id = %id, reassigned = reassigned, "Genre deleted");
        Ok(Some(target))
    }

    /// Number of books currently filed under the genre, or `None` if the
    /// genre does not exist.
    pub async fn count_books(&self, id: i64) -> DbResult<Option<i64>> {
        let mut conn = self.db.acquire().await?;

        if GenreRepository::new(&mut *conn).find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let count = BookRepository::new(&mut *conn).count_by_genre(id).await?;
        Ok(Some(count))
    }

    /// Books currently filed under the genre.
    pub async fn books(&self, id: i64) -> DbResult<Vec<Book>> {
        let mut conn = self.db.acquire().await?;
        BookRepository::new(&mut *conn).find_by_genre(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::service::test_support::{book, fiction, jane, services};

    #[tokio::test]
    async fn test_add_get_and_find_by_name() {
        let services = services().await;
        let added = fiction(&services).await;

        assert_eq!(
            services.genres.get_by_id(added.id()).await.unwrap(),
            Some(added.clone())
        );
        assert_eq!(
            services.genres.get_by_name("Fiction").await.unwrap(),
            Some(added)
        );
        assert!(services.genres.get_by_name("Poetry").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let services = services().await;
        let added = fiction(&services).await;

        let edited = Genre::new("Sci-Fi", "Science fiction").unwrap().with_id(added.id());
        let updated = services.genres.update(&edited).await.unwrap().unwrap();
        assert_eq!(updated, edited);

        let ghost = Genre::new("Ghost", "Nothing").unwrap().with_id(77);
        assert!(services.genres.update(&ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_books_is_live() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;

        assert_eq!(services.genres.count_books(genre.id()).await.unwrap(), Some(0));

        let dune = book(&services, "Dune", &genre, &author, 3).await;
        book(&services, "Emma", &genre, &author, 1).await;
        assert_eq!(services.genres.count_books(genre.id()).await.unwrap(), Some(2));

        services.books.delete(dune.id()).await.unwrap();
        assert_eq!(services.genres.count_books(genre.id()).await.unwrap(), Some(1));

        assert_eq!(services.genres.count_books(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reassigns_books_to_fallback() {
        let services = services().await;
        let genre = fiction(&services).await;
        let author = jane(&services).await;
        let dune = book(&services, "Dune", &genre, &author, 3).await;

        services.genres.delete(genre.id()).await.unwrap().unwrap();

        assert!(services.genres.get_by_id(genre.id()).await.unwrap().is_none());
        let reloaded = services.books.get_by_id(dune.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.genre_id(), UNKNOWN_GENRE_ID);
        assert_eq!(reloaded.author_id(), author.id());
        assert_eq!(services.genres.count_books(UNKNOWN_GENRE_ID).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_delete_fallback_is_blocked() {
        let services = services().await;

        let err = services.genres.delete(UNKNOWN_GENRE_ID).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::ProtectedSentinel { entity: "Genre", .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_aborts_when_fallback_missing() {
        let services = services().await;
        let genre = fiction(&services).await;

        // Simulate a store whose fallback row is gone
        sqlx::query("DELETE FROM genres WHERE id = 1")
            .execute(services.genres.db.pool())
            .await
            .unwrap();

        assert!(services.genres.delete(genre.id()).await.unwrap().is_none());
        assert!(services.genres.get_by_id(genre.id()).await.unwrap().is_some());
    }
}
