//! # sqlit: a tiny SQL-like command interpreter
//!
//! Turns one line of a constrained, SQL-like language into a typed
//! [`Query`](ast::Query), or a classified [`ParseError`](error::ParseError).
//!
//! ## Quick Example
//!
//! ```
//! use sqlit::prelude::*;
//!
//! let query = sqlit::parse("SELECT name age FROM accounts;").unwrap();
//! assert_eq!(query.table(), "accounts");
//! assert_eq!(query.to_sql(), "SELECT name, age FROM accounts");
//!
//! let err = sqlit::parse("update accounts set age=31").unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::NotImplemented);
//! ```
//!
//! ## Grammar
//!
//! | Command  | Shape                                          |
//! |----------|------------------------------------------------|
//! | `select` | `select <field>... from <table>`               |
//! | `insert` | `insert into <table> values (<col>=<val>, ...)` |
//! | `drop`   | `drop table [if exists] <table>`               |
//! | `update`, `delete`, `create` | recognized, not implemented yet |
//!
//! Keywords and identifiers are case-insensitive and stored lowercase. One
//! trailing `;` is allowed. There is no quoting.

pub mod ast;
pub mod config;
pub mod error;
pub mod ffi;
pub mod output;
pub mod parser;
pub mod repl;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::output::{OutputFormat, render};
    pub use crate::parser::{Command, parse, tokenize};
    pub use crate::transpiler::ToSql;
}

/// Parse one command line into a query.
///
/// # Example
///
/// ```
/// use sqlit::parse;
///
/// let query = parse("drop table accounts").unwrap();
/// assert_eq!(query.table(), "accounts");
/// ```
pub fn parse(input: &str) -> Result<ast::Query, error::ParseError> {
    parser::parse(input)
}
