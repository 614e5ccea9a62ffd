//! # shelf-db: Persistence and Services for the Book Catalog
//!
//! This crate stores the catalog in SQLite (via sqlx) and exposes the three
//! domain services the presentation layer talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelf Inventory Data Flow                        │
//! │                                                                         │
//! │  Presentation (services.books.sell(id, 3))                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Services    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (service/)    │    │ (repository/) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ BookService   │───►│ UnitOfWork    │    │ 001_initial_ │  │   │
//! │  │   │ AuthorService │    │ BookRepo      │    │ schema.sql   │  │   │
//! │  │   │ GenreService  │    │ AuthorRepo .. │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                        ┌───────▼───────┐                       │   │
//! │  │                        │   Database    │                       │   │
//! │  │                        │   (pool.rs)   │                       │   │
//! │  │                        └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (./db/shelf.db)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool settings and `SHELF_*` environment loading
//! - [`pool`] - Connection pool and unit-of-work entry point
//! - [`migrations`] - Embedded schema and fallback rows
//! - [`error`] - Database error types
//! - [`repository`] - SQL per table, grouped under a unit of work
//! - [`service`] - Book, author and genre services
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_db::{Database, DbConfig, Services};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let services = Services::new(db);
//!
//! if let Some(book) = services.books.sell(book_id, 3).await? {
//!     println!("{}", book.status());
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;
pub use repository::UnitOfWork;

// Repository re-exports for convenience
pub use repository::{AuthorRepository, BookRepository, GenreRepository};

pub use service::{AuthorService, BookService, GenreService, Services};
