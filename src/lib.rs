//! Spinehead: a CSV table viewer that averages two group columns over the
//! selected rows, and an exporter from per-interval SQLite databases to
//! Excel workbooks.

pub mod app;
pub mod data;
pub mod export;
pub mod state;
pub mod ui;
