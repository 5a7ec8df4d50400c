//! Abstract Syntax Tree for sqlit commands.
//!
//! A [`Query`] is the typed result of parsing one command line. Every
//! variant targets a table; identifiers are always stored case-folded.
//! Values are built only by the parser and are read-only afterwards.

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::Command;

/// One parsed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
    CreateTable(CreateTableQuery),
    Drop(DropQuery),
}

impl Query {
    /// The table this query targets. Never empty.
    pub fn table(&self) -> &str {
        match self {
            Self::Select(q) => q.table(),
            Self::Insert(q) => q.table(),
            Self::Update(q) => q.table(),
            Self::Delete(q) => q.table(),
            Self::CreateTable(q) => q.table(),
            Self::Drop(q) => q.table(),
        }
    }

    /// The command keyword that produced this query.
    pub fn command(&self) -> Command {
        match self {
            Self::Select(_) => Command::Select,
            Self::Insert(_) => Command::Insert,
            Self::Update(_) => Command::Update,
            Self::Delete(_) => Command::Delete,
            Self::CreateTable(_) => Command::Create,
            Self::Drop(_) => Command::Drop,
        }
    }
}

/// `SELECT <fields> FROM <table>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectQuery {
    table: String,
    fields: Vec<String>,
}

impl SelectQuery {
    pub(crate) fn new(table: String, fields: Vec<String>) -> Self {
        debug_assert!(!table.is_empty());
        Self { table, fields }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Selected fields in source order. May be empty.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// True for `select * from ...` and for an empty field list.
    pub fn is_wildcard(&self) -> bool {
        match self.fields.as_slice() {
            [] => true,
            [only] => only == "*",
            _ => false,
        }
    }
}

/// `INSERT INTO <table> VALUES (<col>=<val>, ...)`
///
/// The column list is not stored separately: [`fields`](Self::fields) is
/// the key order of [`values`](Self::values), so the two can never
/// disagree. Equality ignores column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertQuery {
    table: String,
    values: IndexMap<String, String>,
}

impl InsertQuery {
    pub(crate) fn new(table: String, values: IndexMap<String, String>) -> Self {
        debug_assert!(!table.is_empty());
        Self { table, values }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column names in the order they first appeared.
    pub fn fields(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// The literal for `column`, if one was given.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Raw predicate text of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Filter(String);

impl Filter {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `UPDATE <table> SET ... [WHERE ...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateQuery {
    table: String,
    changes: IndexMap<String, String>,
    filter: Option<Filter>,
}

// TODO: construct from the parser once the update, delete and create
// grammars are defined; until then only the renderer's tests build these.
#[allow(dead_code)]
impl UpdateQuery {
    pub(crate) fn new(
        table: String,
        changes: IndexMap<String, String>,
        filter: Option<Filter>,
    ) -> Self {
        debug_assert!(!table.is_empty());
        Self {
            table,
            changes,
            filter,
        }
    }
}

impl UpdateQuery {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn changes(&self) -> &IndexMap<String, String> {
        &self.changes
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }
}

/// `DELETE FROM <table> [WHERE ...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteQuery {
    table: String,
    filter: Option<Filter>,
}

#[allow(dead_code)]
impl DeleteQuery {
    pub(crate) fn new(table: String, filter: Option<Filter>) -> Self {
        debug_assert!(!table.is_empty());
        Self { table, filter }
    }
}

impl DeleteQuery {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }
}

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Text,
    Real,
    Blob,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Real => "REAL",
            Self::Blob => "BLOB",
        })
    }
}

/// One column of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub autoincrement: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<String>,
}

impl ColumnDef {
    /// A nullable, unconstrained column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            primary_key: false,
            autoincrement: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }
}

/// `CREATE TABLE <table> (...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTableQuery {
    table: String,
    columns: Vec<ColumnDef>,
}

#[allow(dead_code)]
impl CreateTableQuery {
    pub(crate) fn new(table: String, columns: Vec<ColumnDef>) -> Self {
        debug_assert!(!table.is_empty());
        Self { table, columns }
    }
}

impl CreateTableQuery {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }
}

/// `DROP TABLE [IF EXISTS] <table>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropQuery {
    table: String,
    if_exists: bool,
}

impl DropQuery {
    pub(crate) fn new(table: String, if_exists: bool) -> Self {
        debug_assert!(!table.is_empty());
        Self { table, if_exists }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Dropping a missing table is not an error.
    pub fn if_exists(&self) -> bool {
        self.if_exists
    }
}
