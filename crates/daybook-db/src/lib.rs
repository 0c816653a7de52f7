//! Relational persistence of calendar dates for the `PostgreSQL` backend.

pub mod date;
pub mod error;

pub use date::{SqlDate, scan_text, text_form};
