//! Persistence module split across logical submodules.

mod books;
mod connection;
mod error;

pub use books::{
    add_book, delete_book, find_book_by_id, find_reservation_status, list_all_books,
    update_book_status,
};
pub use connection::{close_catalog, ensure_schema, open_catalog, open_in_memory};
pub use error::CatalogError;
