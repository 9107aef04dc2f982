use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, BookDetail, BookQuery};

/// Status prefilled when adding a book.
const DEFAULT_STATUS: &str = "Available";

/// Append a printable character to a text field.
fn push_text(buffer: &mut String, ch: char) -> bool {
    if ch.is_control() {
        false
    } else {
        buffer.push(ch);
        true
    }
}

/// Render `name: value`, highlighting the focused field and dimming blanks.
fn field_line(name: &str, value: &str, placeholder: &str, active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{name}: ")),
        Span::styled(display, style),
    ])
}

/// Fields available within the add-book form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Id,
    Title,
    Author,
    Isbn,
    Status,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Id,
        BookField::Title,
        BookField::Author,
        BookField::Isbn,
        BookField::Status,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Id => "BookID",
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Isbn => "ISBN",
            BookField::Status => "Status",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    fn offset(self, step: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + step).rem_euclid(len);
        Self::ALL[next as usize]
    }
}

/// Internal representation of the "add book" form fields.
#[derive(Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
    pub(crate) status: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            status: DEFAULT_STATUS.to_string(),
            active: BookField::Id,
            error: None,
        }
    }
}

impl BookForm {
    pub(crate) fn next_field(&mut self) {
        self.active = self.active.offset(1);
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.offset(-1);
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Id => &mut self.id,
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Isbn => &mut self.isbn,
            BookField::Status => &mut self.status,
        }
    }

    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Id => &self.id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Isbn => &self.isbn,
            BookField::Status => &self.status,
        }
    }

    /// Append a character to the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let field = self.active;
        push_text(self.value_mut(field), ch)
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return a book ready for persistence. Only the
    /// id and title are mandatory.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(anyhow!("BookID is required."));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        Ok(Book::new(
            id,
            title,
            self.author.trim(),
            self.isbn.trim(),
            self.status.trim(),
        ))
    }

    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let placeholder = match field {
            BookField::Id | BookField::Title => "<required>",
            _ => "",
        };
        field_line(
            field.label(),
            self.value(field),
            placeholder,
            self.active == field,
        )
    }

    /// Character count for the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// Form state for replacing a book's status.
#[derive(Clone, Debug)]
pub(crate) struct StatusForm {
    pub(crate) book_id: String,
    pub(crate) title: String,
    pub(crate) status: String,
    pub(crate) error: Option<String>,
}

impl StatusForm {
    /// Seed the form with the book's current status so small edits are quick.
    pub(crate) fn from_detail(detail: &BookDetail) -> Self {
        Self {
            book_id: detail.book.id.clone(),
            title: detail.book.title.clone(),
            status: detail.book.status.clone(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        push_text(&mut self.status, ch)
    }

    pub(crate) fn backspace(&mut self) {
        self.status.pop();
    }

    pub(crate) fn parse_inputs(&self) -> Result<String> {
        let status = self.status.trim();
        if status.is_empty() {
            Err(anyhow!("Status cannot be empty."))
        } else {
            Ok(status.to_string())
        }
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("Status", &self.status, "<required>", true)
    }
}

/// Single-field prompt for "find by BookID".
#[derive(Clone, Debug, Default)]
pub(crate) struct LookupForm {
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl LookupForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        push_text(&mut self.input, ch)
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn parse_inputs(&self) -> Result<String> {
        let id = self.input.trim();
        if id.is_empty() {
            Err(anyhow!("Enter a BookID."))
        } else {
            Ok(id.to_string())
        }
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("BookID", &self.input, "", true)
    }
}

/// Which column a reservation search runs against. Cycled with Tab.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum SearchKind {
    #[default]
    Title,
    BookId,
    UserId,
    ReservationId,
}

impl SearchKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            SearchKind::Title => "Title",
            SearchKind::BookId => "BookID",
            SearchKind::UserId => "UserID",
            SearchKind::ReservationId => "ReservationID",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            SearchKind::Title => SearchKind::BookId,
            SearchKind::BookId => SearchKind::UserId,
            SearchKind::UserId => SearchKind::ReservationId,
            SearchKind::ReservationId => SearchKind::Title,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            SearchKind::Title => SearchKind::ReservationId,
            SearchKind::BookId => SearchKind::Title,
            SearchKind::UserId => SearchKind::BookId,
            SearchKind::ReservationId => SearchKind::UserId,
        }
    }
}

/// Reservation status search: a column selector plus the value to match.
#[derive(Clone, Debug, Default)]
pub(crate) struct SearchForm {
    pub(crate) kind: SearchKind,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl SearchForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        push_text(&mut self.input, ch)
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    /// Build the typed query. Titles are matched exactly, so the value is
    /// passed through untrimmed; identifiers are trimmed.
    pub(crate) fn to_query(&self) -> Result<BookQuery> {
        if self.input.trim().is_empty() {
            return Err(anyhow!("Enter a {} to search for.", self.kind.label()));
        }
        let id = self.input.trim().to_string();
        Ok(match self.kind {
            SearchKind::Title => BookQuery::ByTitle(self.input.clone()),
            SearchKind::BookId => BookQuery::ByBookId(id),
            SearchKind::UserId => BookQuery::ByUserId(id),
            SearchKind::ReservationId => BookQuery::ByReservationId(id),
        })
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line(self.kind.label(), &self.input, "", true)
    }
}

/// Confirmation state for deleting a book.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) reservation: Option<String>,
}

impl ConfirmBookDelete {
    pub(crate) fn from_detail(detail: &BookDetail) -> Self {
        Self {
            id: detail.book.id.clone(),
            title: detail.book.title.clone(),
            reservation: detail.reservation_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut BookForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn book_form_cycles_fields_and_defaults_status() {
        let mut form = BookForm::default();
        type_into(&mut form, " LB001 ");
        form.next_field();
        type_into(&mut form, "Dune");
        form.next_field();
        type_into(&mut form, "Herbert");
        form.next_field();
        type_into(&mut form, "ISBN1");

        let book = form.parse_inputs().unwrap();
        assert_eq!(book, Book::new("LB001", "Dune", "Herbert", "ISBN1", "Available"));

        form.next_field();
        assert_eq!(form.active, BookField::Status);
        form.next_field();
        assert_eq!(form.active, BookField::Id);
        form.previous_field();
        assert_eq!(form.active, BookField::Status);
    }

    #[test]
    fn book_form_requires_id_and_title() {
        let mut form = BookForm::default();
        assert!(form.parse_inputs().is_err());
        type_into(&mut form, "LB001");
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Title is required.");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut form = LookupForm::default();
        assert!(!form.push_char('\u{7}'));
        assert!(form.push_char('L'));
        form.backspace();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn search_form_builds_the_selected_query() {
        let mut form = SearchForm::default();
        for ch in "LU001".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.to_query().unwrap(), BookQuery::ByTitle("LU001".into()));

        form.kind = form.kind.next().next();
        assert_eq!(form.kind, SearchKind::UserId);
        assert_eq!(form.to_query().unwrap(), BookQuery::ByUserId("LU001".into()));

        form.kind = form.kind.previous().previous().previous();
        assert_eq!(form.kind, SearchKind::ReservationId);
    }

    #[test]
    fn status_form_rejects_blank_status() {
        let detail = BookDetail::unreserved(Book::new("LB001", "Dune", "", "", "Available"));
        let mut form = StatusForm::from_detail(&detail);
        assert_eq!(form.parse_inputs().unwrap(), "Available");
        for _ in 0.."Available".len() {
            form.backspace();
        }
        assert!(form.parse_inputs().is_err());
    }
}
