//! Terminal UI for the autocomplete widget

mod app;
mod input;
mod ui;

pub use app::run;
