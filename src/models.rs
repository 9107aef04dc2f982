//! Domain models that mirror the SQLite schema. These stay plain data holders
//! so the persistence layer can fill them and any front end can render them
//! without knowing how the rows were joined.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalog entry. Mirrors one row of the `Books` table.
pub struct Book {
    /// Externally supplied key (`LB001` style). Also the join key for every
    /// reservation lookup.
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Free-text availability marker such as "Available" or "Checked out".
    pub status: String,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            status: status.into(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the Books / Reservations / Users left-join projection.
///
/// Every reservation and user column is nullable on its own. A left join only
/// guarantees the book half, and externally managed rows may carry a
/// reservation without a date or a user without a name, so nothing here is
/// folded into a single "is reserved" flag.
pub struct BookDetail {
    pub book: Book,
    pub reservation_id: Option<String>,
    pub reservation_date: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// Borrowed view of the patron holding a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patron<'a> {
    pub id: Option<&'a str>,
    pub name: &'a str,
    pub email: Option<&'a str>,
}

/// Borrowed view of the reservation attached to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationStatus<'a> {
    pub id: Option<&'a str>,
    pub date: &'a str,
}

impl BookDetail {
    /// A detail row for a book that has no reservation at all.
    pub fn unreserved(book: Book) -> Self {
        Self {
            book,
            reservation_id: None,
            reservation_date: None,
            user_id: None,
            user_name: None,
            user_email: None,
        }
    }

    /// Present iff the joined user name is non-null.
    pub fn reserved_by(&self) -> Option<Patron<'_>> {
        self.user_name.as_deref().map(|name| Patron {
            id: self.user_id.as_deref(),
            name,
            email: self.user_email.as_deref(),
        })
    }

    /// Present iff the joined reservation date is non-null.
    pub fn reservation_status(&self) -> Option<ReservationStatus<'_>> {
        self.reservation_date
            .as_deref()
            .map(|date| ReservationStatus {
                id: self.reservation_id.as_deref(),
                date,
            })
    }
}

impl fmt::Display for Patron<'_> {
    /// `Alice (LU001) - a@x.com`, dropping whichever parts are missing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(id) = self.id {
            write!(f, " ({id})")?;
        }
        if let Some(email) = self.email {
            write!(f, " - {email}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ReservationStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{id} - {}", self.date),
            None => write!(f, "{}", self.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Flexible lookup key for reservation status searches. The caller picks the
/// column explicitly; nothing is inferred from the shape of the value.
pub enum BookQuery {
    ByBookId(String),
    ByUserId(String),
    ByReservationId(String),
    /// Exact (case-sensitive) title match. May return several books.
    ByTitle(String),
}

impl BookQuery {
    /// The raw value being searched for.
    pub fn value(&self) -> &str {
        match self {
            BookQuery::ByBookId(value)
            | BookQuery::ByUserId(value)
            | BookQuery::ByReservationId(value)
            | BookQuery::ByTitle(value) => value,
        }
    }

    /// Short label for the searched column.
    pub fn label(&self) -> &'static str {
        match self {
            BookQuery::ByBookId(_) => "Book ID",
            BookQuery::ByUserId(_) => "User ID",
            BookQuery::ByReservationId(_) => "Reservation ID",
            BookQuery::ByTitle(_) => "Title",
        }
    }
}

impl fmt::Display for BookQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.label(), self.value())
    }
}
