//! Ratatui front-end. It gathers input, calls into `db`, and renders the
//! `BookDetail` values it gets back; none of the catalog rules live here.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
