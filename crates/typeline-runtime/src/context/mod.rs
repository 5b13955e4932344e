//! Payload access
//!
//! Resolves field paths against payload values.

mod field_lookup;

pub use field_lookup::{resolve, resolve_str};
