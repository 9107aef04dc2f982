use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::error::{classify_write, CatalogError};
use crate::models::{Book, BookDetail, BookQuery};

/// Shared projection for every book lookup. Reservations and Users are left
/// joined so books without a hold still come back, with nulls on the right.
const DETAIL_SELECT: &str = "SELECT
        Books.BookID, Books.Title, Books.Author, Books.ISBN, Books.Status,
        Reservations.ReservationID, Reservations.ReservationDate,
        Users.UserID, Users.Name, Users.Email
     FROM Books
     LEFT JOIN Reservations ON Books.BookID = Reservations.BookID
     LEFT JOIN Users ON Reservations.UserID = Users.UserID";

/// Insertion order. Tables keep their implicit rowid, so this is stable.
const DETAIL_ORDER: &str = "ORDER BY Books.rowid, Reservations.rowid";

/// Insert a new book row. An existing id is reported as
/// [`CatalogError::DuplicateKey`] and the stored row is left alone.
pub fn add_book(conn: &Connection, book: &Book) -> Result<(), CatalogError> {
    conn.execute(
        "INSERT INTO Books (BookID, Title, Author, ISBN, Status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![book.id, book.title, book.author, book.isbn, book.status],
    )
    .map_err(|err| classify_write(err, &book.id))?;

    info!(book_id = %book.id, title = %book.title, "added book");
    Ok(())
}

/// Look up one book with its reservation and patron, if any. Returns `None`
/// when no book has this id.
pub fn find_book_by_id(conn: &Connection, id: &str) -> Result<Option<BookDetail>, CatalogError> {
    let sql = format!("{DETAIL_SELECT} WHERE Books.BookID = ?1 {DETAIL_ORDER} LIMIT 1");
    let detail = conn
        .query_row(&sql, [id], detail_from_row)
        .optional()?;

    debug!(book_id = %id, found = detail.is_some(), "looked up book");
    Ok(detail)
}

/// Search by whichever column the query names. No match is an empty list.
pub fn find_reservation_status(
    conn: &Connection,
    query: &BookQuery,
) -> Result<Vec<BookDetail>, CatalogError> {
    let filter = match query {
        BookQuery::ByBookId(_) => "Books.BookID = ?1",
        BookQuery::ByUserId(_) => "Users.UserID = ?1",
        BookQuery::ByReservationId(_) => "Reservations.ReservationID = ?1",
        BookQuery::ByTitle(_) => "Books.Title = ?1",
    };
    let sql = format!("{DETAIL_SELECT} WHERE {filter} {DETAIL_ORDER}");

    let details = collect_details(conn, &sql, [query.value()])?;
    debug!(%query, matches = details.len(), "searched reservation status");
    Ok(details)
}

/// Every book in the catalog, in insertion order.
pub fn list_all_books(conn: &Connection) -> Result<Vec<BookDetail>, CatalogError> {
    let sql = format!("{DETAIL_SELECT} {DETAIL_ORDER}");
    let details = collect_details(conn, &sql, [])?;
    debug!(count = details.len(), "listed books");
    Ok(details)
}

/// Overwrite only the status column. The existence check runs first so a
/// missing id is reported instead of silently updating nothing.
pub fn update_book_status(conn: &Connection, id: &str, status: &str) -> Result<(), CatalogError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM Books WHERE BookID = ?1)",
        [id],
        |row| row.get(0),
    )?;

    if !exists {
        warn!(book_id = %id, "status update for unknown book");
        return Err(CatalogError::NotFound { id: id.to_string() });
    }

    conn.execute(
        "UPDATE Books SET Status = ?1 WHERE BookID = ?2",
        params![status, id],
    )
    .map_err(|err| classify_write(err, id))?;

    info!(book_id = %id, %status, "updated book status");
    Ok(())
}

/// Remove a book together with any reservations pointing at it. The schema
/// has no cascade, so reservations go first, and both deletes share one
/// transaction so a failure in between leaves nothing dangling. Unknown ids
/// are a no-op.
pub fn delete_book(conn: &mut Connection, id: &str) -> Result<(), CatalogError> {
    let tx = conn.transaction()?;

    let reservations = tx
        .execute("DELETE FROM Reservations WHERE BookID = ?1", [id])
        .map_err(|err| classify_write(err, id))?;
    let books = tx
        .execute("DELETE FROM Books WHERE BookID = ?1", [id])
        .map_err(|err| classify_write(err, id))?;

    tx.commit()?;

    if books == 0 {
        debug!(book_id = %id, reservations, "delete matched no book");
    } else {
        info!(book_id = %id, reservations, "deleted book");
    }
    Ok(())
}

fn collect_details<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<BookDetail>, CatalogError> {
    let mut stmt = conn.prepare(sql)?;
    let details = stmt
        .query_map(params, detail_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(details)
}

/// Map one projected row. Book columns are nullable in the schema; rows
/// written by other tools may leave them empty, which reads as "".
fn detail_from_row(row: &Row<'_>) -> rusqlite::Result<BookDetail> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(BookDetail {
        book: Book {
            id: text(0)?,
            title: text(1)?,
            author: text(2)?,
            isbn: text(3)?,
            status: text(4)?,
        },
        reservation_id: row.get(5)?,
        reservation_date: row.get(6)?,
        user_id: row.get(7)?,
        user_name: row.get(8)?,
        user_email: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn seed_reservation(conn: &Connection) {
        conn.execute_batch(
            "INSERT INTO Users VALUES ('LU001', 'Alice', 'a@x.com');
             INSERT INTO Reservations VALUES ('LR001', 'LB001', 'LU001', '2024-01-01');",
        )
        .unwrap();
    }

    #[test]
    fn rows_come_back_in_insertion_order() {
        let conn = open_in_memory().unwrap();
        for (id, title) in [("LB003", "Emma"), ("LB001", "Dune"), ("LB002", "Beloved")] {
            add_book(&conn, &Book::new(id, title, "a", "i", "Available")).unwrap();
        }

        let ids: Vec<String> = list_all_books(&conn)
            .unwrap()
            .into_iter()
            .map(|detail| detail.book.id)
            .collect();
        assert_eq!(ids, ["LB003", "LB001", "LB002"]);
    }

    #[test]
    fn null_book_columns_read_as_empty() {
        let conn = open_in_memory().unwrap();
        conn.execute("INSERT INTO Books (BookID) VALUES ('LB009')", [])
            .unwrap();

        let detail = find_book_by_id(&conn, "LB009").unwrap().unwrap();
        assert_eq!(detail.book, Book::new("LB009", "", "", "", ""));
    }

    #[test]
    fn reservation_without_user_keeps_date_only() {
        let conn = open_in_memory().unwrap();
        add_book(&conn, &Book::new("LB001", "Dune", "Herbert", "ISBN1", "Out")).unwrap();
        conn.execute(
            "INSERT INTO Reservations VALUES ('LR002', 'LB001', NULL, '2024-02-02')",
            [],
        )
        .unwrap();

        let detail = find_book_by_id(&conn, "LB001").unwrap().unwrap();
        assert!(detail.reserved_by().is_none());
        assert_eq!(detail.reservation_status().unwrap().date, "2024-02-02");
    }

    #[test]
    fn delete_clears_reservation_inside_one_transaction() {
        let mut conn = open_in_memory().unwrap();
        add_book(&conn, &Book::new("LB001", "Dune", "Herbert", "ISBN1", "Out")).unwrap();
        seed_reservation(&conn);

        delete_book(&mut conn, "LB001").unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM Reservations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(conn.is_autocommit());
    }
}
