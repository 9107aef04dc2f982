use library_catalog::*;
use rusqlite::Connection;

fn dune() -> Book {
    Book::new("LB001", "Dune", "Herbert", "ISBN1", "Available")
}

/// Users and reservations are managed outside the Command API, so tests seed
/// them directly.
fn reserve(conn: &Connection, reservation: &str, book: &str, user: &str, date: &str) {
    conn.execute(
        "INSERT INTO Reservations VALUES (?1, ?2, ?3, ?4)",
        [reservation, book, user, date],
    )
    .unwrap();
}

fn add_user(conn: &Connection, id: &str, name: &str, email: &str) {
    conn.execute("INSERT INTO Users VALUES (?1, ?2, ?3)", [id, name, email])
        .unwrap();
}

fn reservation_count(conn: &Connection, book_id: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM Reservations WHERE BookID = ?1",
        [book_id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn add_then_find_returns_same_fields_and_no_reservation() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    let detail = find_book_by_id(&conn, "LB001").unwrap().unwrap();
    assert_eq!(detail, BookDetail::unreserved(dune()));
}

#[test]
fn find_missing_book_is_none() {
    let conn = open_in_memory().unwrap();
    assert!(find_book_by_id(&conn, "LB404").unwrap().is_none());
}

#[test]
fn duplicate_id_is_rejected_and_original_kept() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    let err = add_book(
        &conn,
        &Book::new("LB001", "Emma", "Austen", "ISBN2", "Out"),
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKey { ref id } if id == "LB001"));

    let detail = find_book_by_id(&conn, "LB001").unwrap().unwrap();
    assert_eq!(detail.book, dune());
}

#[test]
fn update_status_touches_only_status() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    update_book_status(&conn, "LB001", "Checked out").unwrap();

    let book = find_book_by_id(&conn, "LB001").unwrap().unwrap().book;
    assert_eq!(book.status, "Checked out");
    assert_eq!(
        (book.id.as_str(), book.title.as_str(), book.author.as_str(), book.isbn.as_str()),
        ("LB001", "Dune", "Herbert", "ISBN1")
    );
}

#[test]
fn update_status_on_missing_book_is_not_found_without_writes() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    let err = update_book_status(&conn, "LB404", "Lost").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(list_all_books(&conn).unwrap(), vec![BookDetail::unreserved(dune())]);
}

#[test]
fn delete_removes_reservation_then_book() {
    let mut conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();
    add_user(&conn, "LU001", "Alice", "a@x.com");
    reserve(&conn, "LR001", "LB001", "LU001", "2024-01-01");

    delete_book(&mut conn, "LB001").unwrap();

    assert!(find_book_by_id(&conn, "LB001").unwrap().is_none());
    assert_eq!(reservation_count(&conn, "LB001"), 0);
    let by_reservation =
        find_reservation_status(&conn, &BookQuery::ByReservationId("LR001".into())).unwrap();
    assert!(by_reservation.is_empty());
}

#[test]
fn delete_missing_book_is_a_no_op() {
    let mut conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    delete_book(&mut conn, "LB404").unwrap();
    assert_eq!(list_all_books(&conn).unwrap().len(), 1);
}

#[test]
fn failed_delete_rolls_back_the_reservation_removal() {
    let mut conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();
    add_user(&conn, "LU001", "Alice", "a@x.com");
    reserve(&conn, "LR001", "LB001", "LU001", "2024-01-01");
    conn.execute_batch(
        "CREATE TRIGGER keep_books BEFORE DELETE ON Books
         BEGIN SELECT RAISE(ABORT, 'books are read-only'); END;",
    )
    .unwrap();

    let err = delete_book(&mut conn, "LB001").unwrap_err();
    assert!(matches!(err, CatalogError::Query(_)));

    // The reservation delete ran first but must not have been committed.
    assert_eq!(reservation_count(&conn, "LB001"), 1);
    assert!(find_book_by_id(&conn, "LB001").unwrap().is_some());
}

#[test]
fn search_routes_to_the_requested_column() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();
    add_book(&conn, &Book::new("LB002", "Emma", "Austen", "ISBN2", "Out")).unwrap();
    add_book(&conn, &Book::new("LB003", "Dune", "Herbert", "ISBN3", "Available")).unwrap();
    add_user(&conn, "LU001", "Alice", "a@x.com");
    add_user(&conn, "LU002", "Bob", "b@x.com");
    reserve(&conn, "LR001", "LB002", "LU001", "2024-01-01");
    reserve(&conn, "LR002", "LB003", "LU002", "2024-03-05");

    let ids = |query: BookQuery| -> Vec<String> {
        find_reservation_status(&conn, &query)
            .unwrap()
            .into_iter()
            .map(|detail| detail.book.id)
            .collect()
    };

    assert_eq!(ids(BookQuery::ByBookId("LB002".into())), ["LB002"]);
    assert_eq!(ids(BookQuery::ByUserId("LU002".into())), ["LB003"]);
    assert_eq!(ids(BookQuery::ByReservationId("LR001".into())), ["LB002"]);
    assert_eq!(ids(BookQuery::ByTitle("Dune".into())), ["LB001", "LB003"]);
    assert!(ids(BookQuery::ByTitle("Beloved".into())).is_empty());
    // Identifiers are only matched in their own column.
    assert!(ids(BookQuery::ByBookId("LU001".into())).is_empty());
    assert!(ids(BookQuery::ByTitle("LB001".into())).is_empty());
}

#[test]
fn search_results_carry_the_joined_patron() {
    let conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();
    add_user(&conn, "LU001", "Alice", "a@x.com");
    reserve(&conn, "LR001", "LB001", "LU001", "2024-01-01");

    let results = find_reservation_status(&conn, &BookQuery::ByUserId("LU001".into())).unwrap();
    assert_eq!(results.len(), 1);
    let patron = results[0].reserved_by().unwrap();
    assert_eq!(patron.to_string(), "Alice (LU001) - a@x.com");
}

#[test]
fn catalog_walkthrough() {
    let mut conn = open_in_memory().unwrap();
    add_book(&conn, &dune()).unwrap();

    let all = list_all_books(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].reservation_id.is_none());
    assert!(all[0].user_id.is_none());

    add_user(&conn, "LU001", "Alice", "a@x.com");
    reserve(&conn, "LR001", "LB001", "LU001", "2024-01-01");

    let detail = find_book_by_id(&conn, "LB001").unwrap().unwrap();
    assert_eq!(detail.reservation_id.as_deref(), Some("LR001"));
    assert_eq!(detail.reservation_date.as_deref(), Some("2024-01-01"));
    assert_eq!(detail.user_name.as_deref(), Some("Alice"));

    delete_book(&mut conn, "LB001").unwrap();
    let after = find_reservation_status(&conn, &BookQuery::ByReservationId("LR001".into())).unwrap();
    assert!(after.is_empty());
}
