//! Output formats for parsed queries.

use serde::{Deserialize, Serialize};

use crate::ast::Query;
use crate::error::{SqlitError, SqlitResult};
use crate::transpiler::ToSql;

/// How a parsed query is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Canonical SQL
    #[default]
    Sql,
    /// Rust debug representation of the AST
    Debug,
    /// Pretty-printed JSON
    Json,
}

/// Render `query` in the given format.
pub fn render(query: &Query, format: OutputFormat) -> SqlitResult<String> {
    match format {
        OutputFormat::Sql => Ok(query.to_sql()),
        OutputFormat::Debug => Ok(format!("{:#?}", query)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(query).map_err(|e| SqlitError::Render(e.to_string()))
        }
    }
}
