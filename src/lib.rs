//! A small RSVP server: visitors fill in a form, valid responses are kept in
//! memory (and attending guests are appended to a flat file), and everyone
//! can see the list of responses.
//!
//! Two unrelated best-effort tasks run once at startup: a weather fetch, and a
//! CSV dump of a MySQL table. See `main.rs`.

pub mod configuration;
pub mod domain;
pub mod guest_list;
pub mod library;
pub mod routes;
pub mod startup;
pub mod submission_log;
pub mod telemetry;
pub mod templates;
pub mod utils;
pub mod weather;
