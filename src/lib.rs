//! Core library surface for the library catalog manager.
//!
//! The catalog lives in a small SQLite file with three tables (Books, Users,
//! Reservations). `db` owns the schema and every query; `ui` is a thin
//! terminal front-end over it, and other front ends can call `db` directly.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;

/// The Command API and connection lifecycle.
pub use db::{
    add_book, close_catalog, delete_book, ensure_schema, find_book_by_id,
    find_reservation_status, list_all_books, open_catalog, open_in_memory, update_book_status,
    CatalogError,
};

pub use models::{Book, BookDetail, BookQuery, Patron, ReservationStatus};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
