//! Foundation types for tablesync.
//!
//! Every other tablesync crate depends on `tsync-types`.
//!
//! # Key Types
//!
//! - [`Row`] -- a single `(code, description)` record
//! - [`Table`] -- an ordered sequence of rows; a row's index is its identity
//! - [`parse_code`] / [`parse_code_lenient`] -- row-code parsing from raw cell text
//! - [`rows_to_positional_values`] -- rows as positional `(code, description)` pairs

pub mod code;
pub mod error;
pub mod row;
pub mod table;
pub mod values;

pub use code::{parse_code, parse_code_lenient, RowCode};
pub use error::TypeError;
pub use row::Row;
pub use table::Table;
pub use values::{rows_to_positional_values, PositionalValues};
