//! Domain types and rules for the project intake service.
//!
//! Nothing in this crate performs I/O. The database, API and event crates
//! build on these types so every layer agrees on choices, validation and
//! display formats.

pub mod budget;
pub mod choices;
pub mod clock;
pub mod error;
pub mod project;
pub mod roles;
pub mod summary;
pub mod types;
