//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the database named by SHELF_DATABASE_PATH (default ./db/shelf.db)
//! cargo run -p shelf-db --features seed --bin seed
//!
//! # Specify database path
//! cargo run -p shelf-db --features seed --bin seed -- --db ./data/shelf.db
//! ```
//!
//! ## Generated Catalog
//! - A handful of genres (fiction, science fiction, history, ...)
//! - Authors with valid contact details
//! - Books spread across them, some out of stock

use std::env;
use std::path::PathBuf;

use shelf_core::{Author, Book, Genre, Money};
use shelf_db::{Database, DbConfig, Services};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (name, description)
const GENRES: &[(&str, &str)] = &[
    ("Fiction", "Fictional works"),
    ("Science Fiction", "Speculative fiction about science and technology"),
    ("History", "Accounts of past events"),
    ("Poetry", "Verse and lyric collections"),
];

/// (name, age, country, description, email, phone)
const AUTHORS: &[(&str, i64, &str, &str, &str, &str)] = &[
    ("Jane Austen", 41, "UK", "Novelist of manners", "jane@austen.org", "4401234567"),
    ("Frank Herbert", 65, "US", "", "frank@herbert.net", "2065550100"),
    ("Mary Beard", 69, "UK", "Classicist", "mary@beard.co.uk", "4407654321"),
    ("Pablo Neruda", 69, "Chile", "Poet and diplomat", "pablo@neruda.cl", "5622223333"),
];

/// (title, country, genre index, author index, price cents, stock)
const BOOKS: &[(&str, &str, usize, usize, i64, i64)] = &[
    ("Emma", "UK", 0, 0, 899, 12),
    ("Pride and Prejudice", "UK", 0, 0, 999, 4),
    ("Persuasion", "UK", 0, 0, 799, 0),
    ("Dune", "US", 1, 1, 1299, 3),
    ("Dune Messiah", "US", 1, 1, 1099, 1),
    ("SPQR", "UK", 2, 2, 1850, 6),
    ("Twenty Love Poems", "Chile", 3, 3, 650, 0),
    ("Canto General", "Chile", 3, 3, 1400, 2),
];

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Seed the database at `db`, or the configured one if `None`.
    Run {
        db: Option<PathBuf>,
        ignored: Vec<String>,
    },
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),
}

const USAGE: &str = "\
Usage: seed [OPTIONS]

Options:
  -d, --db <PATH>    Database file path (default: $SHELF_DATABASE_PATH or ./db/shelf.db)
  -h, --help         Show this help message";

/// Parses everything after the program name.
fn parse_args(args: &[String]) -> Result<Command, ArgsError> {
    let mut db = None;
    let mut ignored = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                let path = iter
                    .next()
                    .ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                db = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => ignored.push(arg.clone()),
        }
    }

    Ok(Command::Run { db, ignored })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let db_path = match parse_args(&args) {
        Ok(Command::Help) => {
            println!("Shelf Seed Data Generator");
            println!();
            println!("{USAGE}");
            return Ok(());
        }
        Ok(Command::Run { db, ignored }) => {
            for arg in ignored {
                warn!(arg = %arg, "Ignoring unknown argument");
            }
            db
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env()?,
    };

    info!(path = %config.database_path.display(), "Seeding catalog");

    let db = Database::new(config).await?;
    let services = Services::new(db.clone());

    let existing = services.books.count().await?;
    if existing > 0 {
        warn!(
            books = existing,
            "Database already has books, skipping seed to avoid duplicates"
        );
        db.close().await;
        return Ok(());
    }

    let mut genres = Vec::with_capacity(GENRES.len());
    for (name, description) in GENRES {
        let genre = Genre::new(*name, *description)?;
        genres.push(services.genres.add(&genre).await?);
    }

    let mut authors = Vec::with_capacity(AUTHORS.len());
    for (name, age, country, description, email, phone) in AUTHORS {
        let author = Author::new(*name, *age, *country, *description, *email, *phone, true)?;
        authors.push(services.authors.add(&author).await?);
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for (title, country, genre_idx, author_idx, price_cents, stock) in BOOKS {
        let book = Book::new(
            *title,
            *country,
            &genres[*genre_idx],
            &authors[*author_idx],
            Money::from_cents(*price_cents),
            *stock,
        )?;

        match services.books.add(&book).await {
            Ok(_) => generated += 1,
            Err(e) => warn!(title = %title, error = %e, "Failed to insert book"),
        }
    }

    info!(
        genres = genres.len(),
        authors = authors.len(),
        books = generated,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Installs the log subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelf=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_uses_configured_database() {
        assert_eq!(
            parse_args(&[]),
            Ok(Command::Run {
                db: None,
                ignored: vec![],
            })
        );
    }

    #[test]
    fn test_db_path() {
        for flag in ["--db", "-d"] {
            assert_eq!(
                parse_args(&args(&[flag, "./data/shelf.db"])),
                Ok(Command::Run {
                    db: Some(PathBuf::from("./data/shelf.db")),
                    ignored: vec![],
                })
            );
        }
    }

    #[test]
    fn test_db_without_value_is_an_error() {
        assert_eq!(
            parse_args(&args(&["--db"])),
            Err(ArgsError::MissingValue("--db".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["--verbose", "-d"])),
            Err(ArgsError::MissingValue("-d".to_string()))
        );
    }

    #[test]
    fn test_help_and_unknown_args() {
        assert_eq!(parse_args(&args(&["-x", "--help"])), Ok(Command::Help));
        assert_eq!(
            parse_args(&args(&["-x"])),
            Ok(Command::Run {
                db: None,
                ignored: vec!["-x".to_string()],
            })
        );
    }
}
