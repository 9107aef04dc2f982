use std::cmp::min;

use crate::models::{BookDetail, BookQuery};

/// What the book list is currently showing. Kept so writes can re-run the
/// same lookup and refresh the list in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum View {
    AllBooks,
    ById(String),
    Search(BookQuery),
}

impl View {
    pub(crate) fn heading(&self) -> String {
        match self {
            View::AllBooks => "All Books".to_string(),
            View::ById(id) => format!("BookID = {id}"),
            View::Search(query) => query.to_string(),
        }
    }
}

/// The scrolling book list plus its selection.
pub(crate) struct BookListScreen {
    pub(crate) view: View,
    pub(crate) entries: Vec<BookDetail>,
    pub(crate) selected: usize,
}

impl BookListScreen {
    pub(crate) fn new(view: View, entries: Vec<BookDetail>) -> Self {
        Self {
            view,
            entries,
            selected: 0,
        }
    }

    /// Swap in fresh rows, keeping the cursor on `focus_id` when it is still
    /// present and otherwise clamping it to the list.
    pub(crate) fn replace_entries(&mut self, entries: Vec<BookDetail>, focus_id: Option<&str>) {
        self.entries = entries;
        if let Some(id) = focus_id {
            if let Some(idx) = self.entries.iter().position(|d| d.book.id == id) {
                self.selected = idx;
                return;
            }
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn current(&self) -> Option<&BookDetail> {
        self.entries.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.entries.len() - 1;
        let target = self.selected as isize + offset;
        self.selected = if target < 0 {
            0
        } else {
            min(target as usize, last)
        };
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }
}
