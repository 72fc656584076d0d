//! Data models for the course catalog.
//!
//! Field names are camelCase on the wire and in storage so exported files stay
//! interchangeable between the file-backed and slot-backed stores.

mod course;
mod health;
mod module;

pub use course::*;
pub use health::*;
pub use module::*;
