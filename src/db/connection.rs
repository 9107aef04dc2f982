use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use super::error::CatalogError;

/// Open (or create) the catalog at `path`, turn on foreign key enforcement,
/// and make sure the three tables exist. Safe to call on an existing file.
pub fn open_catalog(path: &Path) -> Result<Connection, CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(CatalogError::storage("failed to create data directory"))?;
    }

    let conn = Connection::open(path)
        .map_err(CatalogError::storage("failed to open SQLite database"))?;
    prepare(&conn)?;
    info!(path = %path.display(), "opened catalog");
    Ok(conn)
}

/// Same schema on a private in-memory database. Nothing survives the
/// connection.
pub fn open_in_memory() -> Result<Connection, CatalogError> {
    let conn = Connection::open_in_memory()
        .map_err(CatalogError::storage("failed to open in-memory database"))?;
    prepare(&conn)?;
    debug!("opened in-memory catalog");
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(CatalogError::storage("failed to enable foreign keys"))?;
    ensure_schema(conn)
}

/// Create the Books, Users and Reservations tables unless they already exist.
/// The column layout is shared with other tools that read the same file, so it
/// must not drift.
pub fn ensure_schema(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Books (
            BookID TEXT PRIMARY KEY,
            Title TEXT,
            Author TEXT,
            ISBN TEXT,
            Status TEXT
        )",
        [],
    )
    .map_err(CatalogError::storage("failed to create Books table"))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Users (
            UserID TEXT PRIMARY KEY,
            Name TEXT,
            Email TEXT
        )",
        [],
    )
    .map_err(CatalogError::storage("failed to create Users table"))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Reservations (
            ReservationID TEXT PRIMARY KEY,
            BookID TEXT,
            UserID TEXT,
            ReservationDate TEXT,
            FOREIGN KEY (BookID) REFERENCES Books (BookID),
            FOREIGN KEY (UserID) REFERENCES Users (UserID)
        )",
        [],
    )
    .map_err(CatalogError::storage("failed to create Reservations table"))?;

    Ok(())
}

/// Release the connection, surfacing anything SQLite reports while closing.
/// Dropping a `Connection` also closes it, so error paths that never reach
/// this call still release the file.
pub fn close_catalog(conn: Connection) -> Result<(), CatalogError> {
    conn.close()
        .map_err(|(_, err)| err)
        .map_err(CatalogError::storage("failed to close SQLite database"))?;
    debug!("closed catalog");
    Ok(())
}
