//! Command-line collaborators.
//!
//! Argument parsing and table rendering sit outside the protocol core;
//! the core only sees their products (a validated `DieSet`, a rendered
//! help table).

pub mod args;
pub mod table;

pub use args::Args;
pub use table::render_probability_table;
