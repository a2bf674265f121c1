//! Normalization of diagnostics produced by compilers, linters and API
//! checkers into uniform [`Issue`](issue::Issue) records.
//!
//! Text reports are parsed line by line with a [`PatternAdapter`](parser::PatternAdapter),
//! JSON reports element by element with a [`JsonAdapter`](parser::JsonAdapter).
//! Records that cannot be converted are logged in the [`Report`](issue::Report)
//! and never stop the rest of the input from being parsed.

pub mod config;
pub mod error;
pub mod issue;
pub mod output;
pub mod parser;
pub mod runner;
