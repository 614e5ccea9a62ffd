//! # Repository Module
//!
//! The persistence gateway: per-entity repositories over one connection,
//! and the unit of work that commits them.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Unit of Work + Repositories                          │
//! │                                                                         │
//! │  Service operation                                                     │
//! │       │                                                                 │
//! │       │  let mut uow = db.begin().await?;                              │
//! │       ▼                                                                 │
//! │  UnitOfWork (one SQLite transaction)                                   │
//! │  ├── uow.authors() → AuthorRepository                                  │
//! │  ├── uow.genres()  → GenreRepository                                   │
//! │  ├── uow.books()   → BookRepository                                    │
//! │  │     all / find_by_id / find_by_* / insert / update / remove         │
//! │  │                                                                      │
//! │  └── uow.commit()  ← exactly once per logical operation                │
//! │                                                                         │
//! │  Dropped without commit → rolled back, nothing persisted               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories are built over a plain `&mut SqliteConnection`, so the same
//! code serves reads on a pooled connection and writes inside a unit of
//! work. Every loaded row is validated into its entity; a row that violates
//! an entity invariant surfaces as [`DbError::CorruptRow`].
//!
//! [`DbError::CorruptRow`]: crate::error::DbError::CorruptRow

pub mod author;
pub mod book;
pub mod genre;

use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};

pub use author::AuthorRepository;
pub use book::BookRepository;
pub use genre::GenreRepository;

/// One transaction's worth of pending changes.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        UnitOfWork { tx }
    }

    /// Author rows inside this unit of work.
    pub fn authors(&mut self) -> AuthorRepository<'_> {
        AuthorRepository::new(&mut *self.tx)
    }

    /// Genre rows inside this unit of work.
    pub fn genres(&mut self) -> GenreRepository<'_> {
        GenreRepository::new(&mut *self.tx)
    }

    /// Book rows inside this unit of work.
    pub fn books(&mut self) -> BookRepository<'_> {
        BookRepository::new(&mut *self.tx)
    }

    /// Durably persists every change made through this unit of work.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unit of work committed");
        Ok(())
    }
}
