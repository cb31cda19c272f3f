//! Startup dump of the `Books` table of the library database to CSV. Has
//! nothing to do with RSVPs.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::FromRow;
use sqlx::MySqlPool;

use crate::configuration::DatabaseSettings;
use crate::configuration::LibrarySettings;
use crate::utils::spawn_blocking_with_tracing;

/// Field order is the CSV column order
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Nothing is connected until the first query. Connections are capped at 10
/// and recycled after 3 minutes (idle or not). Acquiring a connection gives up
/// after `db_cfg.timeout()`, so an unreachable server fails the export quickly.
pub fn get_connection_pool(db_cfg: &DatabaseSettings) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(db_cfg.timeout())
        .max_lifetime(Duration::from_secs(3 * 60))
        .idle_timeout(Duration::from_secs(3 * 60))
        .connect_lazy_with(db_cfg.connection())
}

/// Rows that fail to decode are returned as `Err` so the caller can decide
/// whether to skip them; a failing query fails the whole call.
#[tracing::instrument(name = "Selecting books", skip(pool))]
pub async fn fetch_books(
    pool: &MySqlPool,
    limit: u32,
) -> Result<Vec<Result<Book, sqlx::Error>>, sqlx::Error> {
    // `query_as!` would need a live db at compile time
    let rows = sqlx::query("SELECT id, title, author FROM Books LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })?;
    Ok(rows.iter().map(|row| Book::from_row(row)).collect())
}

/// Drop rows that failed to decode (with a warning), keeping the rest in query
/// order
pub fn keep_decoded(rows: Vec<Result<Book, sqlx::Error>>) -> Vec<Book> {
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "skipping undecodable row");
                None
            }
        })
        .collect()
}

/// One record per book (`id,title,author`), no header row. An existing file
/// is truncated.
pub fn write_csv(
    path: &Path,
    books: &[Book],
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}

/// Startup task: query the library db and write what came back to
/// `export_path`. Returns the number of books written.
#[tracing::instrument(name = "Exporting books to csv", skip(cfg), fields(path = %cfg.export_path.display()))]
pub async fn export_books(cfg: &LibrarySettings) -> Result<usize, anyhow::Error> {
    let pool = get_connection_pool(&cfg.database);

    let rows = fetch_books(&pool, cfg.row_limit).await;
    pool.close().await;
    let books = keep_decoded(rows.context("Failed to query Books table")?);

    let path: PathBuf = cfg.export_path.clone();
    let count = books.len();
    spawn_blocking_with_tracing(move || write_csv(&path, &books))
        .await
        .context("Failed to spawn blocking thread")?
        .context("Failed to write csv")?;

    tracing::info!(count, "Exported books");
    Ok(count)
}
