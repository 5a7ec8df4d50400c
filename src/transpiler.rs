//! SQL rendering for the sqlit AST.
//!
//! Turns a parsed [`Query`] back into canonical, single-line SQL with
//! uppercase keywords. Identifiers and literals are written as stored.

use crate::ast::*;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Query {
    fn to_sql(&self) -> String {
        match self {
            Self::Select(q) => q.to_sql(),
            Self::Insert(q) => q.to_sql(),
            Self::Update(q) => q.to_sql(),
            Self::Delete(q) => q.to_sql(),
            Self::CreateTable(q) => q.to_sql(),
            Self::Drop(q) => q.to_sql(),
        }
    }
}

impl ToSql for SelectQuery {
    fn to_sql(&self) -> String {
        let columns = if self.fields().is_empty() {
            "*".to_string()
        } else {
            self.fields().join(", ")
        };
        format!("SELECT {} FROM {}", columns, self.table())
    }
}

impl ToSql for InsertQuery {
    fn to_sql(&self) -> String {
        if self.values().is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", self.table());
        }
        let values: Vec<&str> = self.values().values().map(String::as_str).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table(),
            self.fields().join(", "),
            values.join(", ")
        )
    }
}

impl ToSql for UpdateQuery {
    fn to_sql(&self) -> String {
        let assignments: Vec<String> = self
            .changes()
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", self.table(), assignments.join(", "));
        push_where(&mut sql, self.filter());
        sql
    }
}

impl ToSql for DeleteQuery {
    fn to_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table());
        push_where(&mut sql, self.filter());
        sql
    }
}

impl ToSql for ColumnDef {
    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.column_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.autoincrement {
                sql.push_str(" AUTOINCREMENT");
            }
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        sql
    }
}

impl ToSql for CreateTableQuery {
    fn to_sql(&self) -> String {
        let columns: Vec<String> = self.columns().iter().map(ToSql::to_sql).collect();
        format!("CREATE TABLE {} ({})", self.table(), columns.join(", "))
    }
}

impl ToSql for DropQuery {
    fn to_sql(&self) -> String {
        if self.if_exists() {
            format!("DROP TABLE IF EXISTS {}", self.table())
        } else {
            format!("DROP TABLE {}", self.table())
        }
    }
}

fn push_where(sql: &mut String, filter: Option<&Filter>) {
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use indexmap::IndexMap;

    fn pairs(items: &[(&str, &str)]) -> IndexMap<String, String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_select_sql() {
        let q = parse("select name age from accounts").unwrap();
        assert_eq!(q.to_sql(), "SELECT name, age FROM accounts");

        let q = parse("select from accounts").unwrap();
        assert_eq!(q.to_sql(), "SELECT * FROM accounts");
    }

    #[test]
    fn test_insert_sql() {
        let q = parse("insert into accounts values (name=alice, age=30)").unwrap();
        assert_eq!(
            q.to_sql(),
            "INSERT INTO accounts (name, age) VALUES (alice, 30)"
        );

        let q = parse("insert into accounts values ()").unwrap();
        assert_eq!(q.to_sql(), "INSERT INTO accounts DEFAULT VALUES");
    }

    #[test]
    fn test_drop_sql() {
        let q = parse("drop table accounts").unwrap();
        assert_eq!(q.to_sql(), "DROP TABLE accounts");

        let q = parse("DROP TABLE IF EXISTS accounts;").unwrap();
        assert_eq!(q.to_sql(), "DROP TABLE IF EXISTS accounts");
    }

    #[test]
    fn test_update_sql() {
        let q = UpdateQuery::new(
            "accounts".into(),
            pairs(&[("age", "31"), ("name", "bob")]),
            Some(Filter::new("id = 1")),
        );
        assert_eq!(
            q.to_sql(),
            "UPDATE accounts SET age = 31, name = bob WHERE id = 1"
        );
    }

    #[test]
    fn test_delete_sql() {
        let q = DeleteQuery::new("accounts".into(), None);
        assert_eq!(q.to_sql(), "DELETE FROM accounts");

        let q = DeleteQuery::new("accounts".into(), Some(Filter::new("age < 18")));
        assert_eq!(q.to_sql(), "DELETE FROM accounts WHERE age < 18");
    }

    #[test]
    fn test_create_table_sql() {
        let mut id = ColumnDef::new("id", ColumnType::Integer);
        id.primary_key = true;
        id.autoincrement = true;
        let mut name = ColumnDef::new("name", ColumnType::Text);
        name.not_null = true;
        name.unique = true;
        let mut score = ColumnDef::new("score", ColumnType::Real);
        score.default = Some("0.0".into());

        let q = CreateTableQuery::new("players".into(), vec![id, name, score]);
        assert_eq!(
            q.to_sql(),
            "CREATE TABLE players (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL UNIQUE, score REAL DEFAULT 0.0)"
        );
    }
}
