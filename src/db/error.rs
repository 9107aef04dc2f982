use std::error::Error as StdError;

use rusqlite::ffi;
use thiserror::Error;

/// Every failure the catalog can report. Lookups that simply find nothing are
/// modelled as `Option`/empty `Vec` where a miss is a normal answer, and as
/// [`CatalogError::NotFound`] where the caller asked for a write.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The store could not be opened, created, or closed. Fatal to the session.
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// Insert collided with an existing primary key.
    #[error("{id} already exists.")]
    DuplicateKey { id: String },
    /// A row referenced a book or user that does not exist.
    #[error("{id} references a missing book or user.")]
    ReferentialViolation {
        id: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Book {id} not found.")]
    NotFound { id: String },
    #[error("catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl CatalogError {
    pub(crate) fn storage<E>(context: &'static str) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |source| CatalogError::Storage {
            context,
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

/// Coerce SQLite constraint errors into the matching catalog variant. `id` is
/// the key of the row being written, echoed back so the caller can show it.
pub(crate) fn classify_write(err: rusqlite::Error, id: &str) -> CatalogError {
    let extended_code = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.extended_code),
        _ => None,
    };

    match extended_code {
        Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) | Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => {
            CatalogError::DuplicateKey { id: id.to_string() }
        }
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => CatalogError::ReferentialViolation {
            id: id.to_string(),
            source: err,
        },
        _ => CatalogError::Query(err),
    }
}
