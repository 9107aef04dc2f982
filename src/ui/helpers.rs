use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::BookDetail;

/// One-line summary used by the book list.
pub(crate) fn list_label(detail: &BookDetail) -> String {
    let marker = if detail.reservation_status().is_some() || detail.reserved_by().is_some() {
        "*"
    } else {
        " "
    };
    format!("{marker} {}  {}", detail.book.id, detail.book.title)
}

/// Render every field of a book detail. The "Reserved by" and "Reservation
/// status" lines are decided separately: each depends on its own column.
pub(crate) fn detail_lines(detail: &BookDetail) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::raw(value),
        ])
    };

    let book = &detail.book;
    let mut lines = vec![
        field("BookID", book.id.clone()),
        field("Title", book.title.clone()),
        field("Author", book.author.clone()),
        field("ISBN", book.isbn.clone()),
        field("Status", book.status.clone()),
        Line::from(""),
    ];

    if let Some(patron) = detail.reserved_by() {
        lines.push(field("Reserved by", patron.to_string()));
    }
    match detail.reservation_status() {
        Some(status) => lines.push(field("Reservation status", status.to_string())),
        None => lines.push(Line::from(Span::styled(
            "Not reserved",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
