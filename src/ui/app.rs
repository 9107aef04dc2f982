use std::mem;

use anyhow::{anyhow, Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    add_book, delete_book, find_book_by_id, find_reservation_status, list_all_books,
    update_book_status,
};
use crate::models::BookDetail;

use super::forms::{BookField, BookForm, ConfirmBookDelete, LookupForm, SearchForm, StatusForm};
use super::helpers::{centered_rect, detail_lines, list_label, surface_error};
use super::screens::{BookListScreen, View};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Share of the width given to the book list; the rest shows details.
const LIST_WIDTH_PERCENT: u16 = 45;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Fine-grained modes layered over the book list.
enum Mode {
    Normal,
    AddingBook(BookForm),
    UpdatingStatus(StatusForm),
    ConfirmDelete(ConfirmBookDelete),
    FindingById(LookupForm),
    Searching(SearchForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. Owns the catalog connection for the whole
/// session; every action goes through the `db` functions with it.
pub struct App {
    conn: Connection,
    screen: BookListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Result<Self> {
        let books = list_all_books(&conn).context("failed to load books")?;
        Ok(Self {
            conn,
            screen: BookListScreen::new(View::AllBooks, books),
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Give the connection back so the caller can close it explicitly.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::UpdatingStatus(form) => self.handle_update_status(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::FindingById(form) => self.handle_find_by_id(code, form)?,
            Mode::Searching(form) => self.handle_search(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => *exit = true,
            KeyCode::Esc => {
                if self.screen.view == View::AllBooks {
                    *exit = true;
                } else {
                    self.clear_status();
                    self.show_all_books(None)?;
                }
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.clear_status();
                self.show_all_books(None)?;
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.clear_status();
                return Ok(Mode::FindingById(LookupForm::default()));
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(detail) = self.screen.current() {
                    let form = StatusForm::from_detail(detail);
                    self.clear_status();
                    return Ok(Mode::UpdatingStatus(form));
                }
                self.set_status("No book selected to update.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(detail) = self.screen.current() {
                    let confirm = ConfirmBookDelete::from_detail(detail);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                self.set_status("No book selected to delete.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_update_status(&mut self, code: KeyCode, mut form: StatusForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Update cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_status(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::UpdatingStatus(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Ok(Mode::Normal),
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message, StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_find_by_id(&mut self, code: KeyCode, mut form: LookupForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.clear_status();
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.run_lookup(&form) {
                Ok(_) => keep_open = false,
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::FindingById(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.clear_status();
                keep_open = false;
            }
            KeyCode::Tab => {
                form.kind = form.kind.next();
                form.error = None;
            }
            KeyCode::BackTab => {
                form.kind = form.kind.previous();
                form.error = None;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.run_search(&form) {
                Ok(_) => keep_open = false,
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Searching(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let book = form.parse_inputs()?;
        add_book(&self.conn, &book)?;
        self.show_all_books(Some(&book.id))?;
        self.set_status(format!("Added {}.", book), StatusKind::Info);
        Ok(())
    }

    fn save_status(&mut self, form: &StatusForm) -> Result<()> {
        let status = form.parse_inputs()?;
        update_book_status(&self.conn, &form.book_id, &status)?;
        self.refresh(Some(&form.book_id))?;
        self.set_status(
            format!("Status of {} set to {status}.", form.book_id),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        delete_book(&mut self.conn, &confirm.id)?;
        self.refresh(None)?;
        self.set_status(
            format!("Deleted {} ({}).", confirm.title, confirm.id),
            StatusKind::Info,
        );
        Ok(())
    }

    fn run_lookup(&mut self, form: &LookupForm) -> Result<()> {
        let id = form.parse_inputs()?;
        let detail = find_book_by_id(&self.conn, &id)?
            .ok_or_else(|| anyhow!("Book not found."))?;
        self.screen = BookListScreen::new(View::ById(id), vec![detail]);
        self.clear_status();
        Ok(())
    }

    fn run_search(&mut self, form: &SearchForm) -> Result<()> {
        let query = form.to_query()?;
        let results = find_reservation_status(&self.conn, &query)?;
        if results.is_empty() {
            return Err(anyhow!("No matching records found."));
        }
        let count = results.len();
        self.screen = BookListScreen::new(View::Search(query), results);
        self.set_status(
            format!("{count} matching record{}.", if count == 1 { "" } else { "s" }),
            StatusKind::Info,
        );
        Ok(())
    }

    fn show_all_books(&mut self, focus_id: Option<&str>) -> Result<()> {
        if self.screen.view != View::AllBooks {
            self.screen = BookListScreen::new(View::AllBooks, Vec::new());
        }
        self.refresh(focus_id)
    }

    /// Re-run whatever lookup produced the current list.
    fn refresh(&mut self, focus_id: Option<&str>) -> Result<()> {
        let entries = load_view(&self.conn, &self.screen.view)?;
        self.screen.replace_entries(entries, focus_id);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_catalog(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::UpdatingStatus(form) => {
                let header = Line::from(format!("{} ({})", form.title, form.book_id));
                self.draw_prompt(
                    frame,
                    area,
                    "Update Status",
                    Some(header),
                    form.build_line(),
                    form.error.as_deref(),
                    "Enter to save • Esc to cancel",
                );
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::FindingById(form) => self.draw_prompt(
                frame,
                area,
                "Find Book",
                None,
                form.build_line(),
                form.error.as_deref(),
                "Enter to look up • Esc to cancel",
            ),
            Mode::Searching(form) => self.draw_prompt(
                frame,
                area,
                "Reservation Status",
                Some(Line::from("Search by Title, BookID, UserID or ReservationID")),
                form.build_line(),
                form.error.as_deref(),
                "Enter to search • Tab to change field • Esc to cancel",
            ),
            Mode::Normal => {}
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(LIST_WIDTH_PERCENT),
                Constraint::Percentage(100 - LIST_WIDTH_PERCENT),
            ])
            .split(area);

        let title = format!(
            "{} ({})",
            self.screen.view.heading(),
            self.screen.entries.len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);

        if self.screen.entries.is_empty() {
            let message = match self.screen.view {
                View::AllBooks => "No books found in the database.",
                _ => "No matching records found.",
            };
            let paragraph = Paragraph::new(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(paragraph, columns[0]);
        } else {
            let items: Vec<ListItem> = self
                .screen
                .entries
                .iter()
                .map(|detail| ListItem::new(list_label(detail)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(self.screen.selected));
            frame.render_stateful_widget(list, columns[0], &mut state);
        }

        let detail_block = Block::default().title("Details").borders(Borders::ALL);
        let lines = match self.screen.current() {
            Some(detail) => detail_lines(detail),
            None => vec![Line::from("")],
        };
        let paragraph = Paragraph::new(lines)
            .block(detail_block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, columns[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Normal => {
                let back = if self.screen.view == View::AllBooks {
                    " Quit"
                } else {
                    " All books   "
                };
                let mut spans = vec![
                    Span::styled("[↑↓]", key_style),
                    Span::raw(" Navigate   "),
                    Span::styled("[+]", key_style),
                    Span::raw(" Add   "),
                    Span::styled("[g]", key_style),
                    Span::raw(" Find by ID   "),
                    Span::styled("[f]", key_style),
                    Span::raw(" Reservation search   "),
                    Span::styled("[e]", key_style),
                    Span::raw(" Status   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Delete   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(back),
                ];
                if self.screen.view != View::AllBooks {
                    spans.push(Span::styled("[q]", key_style));
                    spans.push(Span::raw(" Quit"));
                }
                Line::from(spans)
            }
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[n]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Searching(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Search by   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::UpdatingStatus(_) | Mode::FindingById(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(form_hint(
            form.error.as_deref(),
            "Enter to save • Tab to switch field • Esc to cancel",
        ));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = BookField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let prefix = form.active.label().len() as u16 + 2;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    /// Modal with one editable line, an optional header above it, and either
    /// the current error or a usage hint below.
    #[allow(clippy::too_many_arguments)]
    fn draw_prompt(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        header: Option<Line<'static>>,
        field: Line<'static>,
        error: Option<&str>,
        hint: &str,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let cursor_x = inner.x + field.width() as u16;
        let mut lines = Vec::new();
        let mut cursor_y = inner.y;
        if let Some(header) = header {
            lines.push(header);
            lines.push(Line::from(""));
            cursor_y += 2;
        }
        lines.push(field);
        lines.push(Line::from(""));
        lines.push(form_hint(error, hint));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Book").borders(Borders::ALL);
        let mut lines = vec![
            Line::from(format!("Delete {} ({})?", confirm.title, confirm.id)),
            Line::from(""),
        ];
        if let Some(reservation) = &confirm.reservation {
            lines.push(Line::from(Span::styled(
                format!("Reservation {reservation} will be removed as well."),
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from("Press y to confirm or n to cancel."));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn load_view(conn: &Connection, view: &View) -> Result<Vec<BookDetail>> {
    let entries = match view {
        View::AllBooks => list_all_books(conn)?,
        View::ById(id) => find_book_by_id(conn, id)?.into_iter().collect(),
        View::Search(query) => find_reservation_status(conn, query)?,
    };
    Ok(entries)
}

/// Red error text when present, otherwise the grey usage hint.
fn form_hint(error: Option<&str>, hint: &str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::models::Book;

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn app_with_dune() -> App {
        let conn = open_in_memory().unwrap();
        add_book(&conn, &Book::new("LB001", "Dune", "Herbert", "ISBN1", "Available")).unwrap();
        App::new(conn).unwrap()
    }

    #[test]
    fn adding_a_book_through_the_form_selects_it() {
        let mut app = app_with_dune();
        app.handle_key(KeyCode::Char('+')).unwrap();
        type_text(&mut app, "LB002");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "Emma");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.screen.entries.len(), 2);
        assert_eq!(app.screen.current().unwrap().book.id, "LB002");
    }

    #[test]
    fn duplicate_id_keeps_the_form_open() {
        let mut app = app_with_dune();
        app.handle_key(KeyCode::Char('+')).unwrap();
        type_text(&mut app, "LB001");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "Other");
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.mode {
            Mode::AddingBook(form) => {
                assert_eq!(form.error.as_deref(), Some("LB001 already exists."))
            }
            _ => panic!("form should stay open"),
        }
        assert_eq!(app.screen.entries.len(), 1);
    }

    #[test]
    fn status_update_and_delete_flow() {
        let mut app = app_with_dune();
        app.handle_key(KeyCode::Char('e')).unwrap();
        for _ in 0.."Available".len() {
            app.handle_key(KeyCode::Backspace).unwrap();
        }
        type_text(&mut app, "Lost");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.screen.current().unwrap().book.status, "Lost");

        app.handle_key(KeyCode::Char('-')).unwrap();
        app.handle_key(KeyCode::Char('y')).unwrap();
        assert!(app.screen.entries.is_empty());
    }

    #[test]
    fn empty_search_reports_no_match_and_keeps_list() {
        let mut app = app_with_dune();
        app.handle_key(KeyCode::Char('f')).unwrap();
        type_text(&mut app, "Emma");
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.mode {
            Mode::Searching(form) => {
                assert_eq!(form.error.as_deref(), Some("No matching records found."))
            }
            _ => panic!("search should stay open"),
        }
        assert_eq!(app.screen.view, View::AllBooks);

        app.handle_key(KeyCode::Esc).unwrap();
        app.handle_key(KeyCode::Char('g')).unwrap();
        type_text(&mut app, "LB001");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.screen.view, View::ById("LB001".into()));

        let quit = app.handle_key(KeyCode::Esc).unwrap();
        assert!(!quit);
        assert_eq!(app.screen.view, View::AllBooks);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }
}
