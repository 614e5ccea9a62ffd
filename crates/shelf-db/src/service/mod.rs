//! # Domain Services
//!
//! One service per entity type. Each operation runs to completion inside a
//! single unit of work and commits at most once.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Presentation calls service.sell(book_id, 3)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  begin unit of work                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load row ──── missing? ──► Ok(None), nothing committed                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  entity method (validates, mutates) ── error? ──► Err, rolled back     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write row(s), commit once ──► Ok(Some(updated))                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three services share one cloned [`Database`] handle; build them
//! together with [`Services::new`].

pub mod author;
pub mod book;
pub mod genre;

pub use author::AuthorService;
pub use book::BookService;
pub use genre::GenreService;

use crate::pool::Database;

/// The three services over one shared database handle.
#[derive(Debug, Clone)]
pub struct Services {
    pub books: BookService,
    pub authors: AuthorService,
    pub genres: GenreService,
}

impl Services {
    pub fn new(db: Database) -> Self {
        Services {
            books: BookService::new(db.clone()),
            authors: AuthorService::new(db.clone()),
            genres: GenreService::new(db),
        }
    }
}
