//! The dancing links sparse matrix: a toroidal, four-way, circularly
//! doubly-linked representation of an exact cover problem (spec §3–4).

pub mod columns;
pub mod matrix;

pub use columns::{ColumnEntry, ColumnSpec};
pub use matrix::Matrix;
