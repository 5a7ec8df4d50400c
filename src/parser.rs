//! sqlit command parser.
//!
//! A line is case-folded, stripped of one trailing `;`, and split on
//! whitespace. The first token picks the command; each command then checks
//! its clause keywords at fixed positions and builds a [`Query`].
//!
//! ```text
//! select name age from accounts
//! ──┬─── ───┬──── ─┬── ───┬────
//!   │       │      │      └── table (last token)
//!   │       │      └── `from` (second to last token)
//!   │       └── fields (everything in between)
//!   └── command
//! ```
//!
//! There is no quoting: a value containing whitespace is split into several
//! tokens and rejoined with single spaces where a clause accepts free text.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use nom::{
    IResult,
    bytes::complete::{take_till1, take_while},
    combinator::all_consuming,
    multi::many0,
    sequence::{preceded, terminated},
};
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::ParseError;

/// A command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
}

impl Command {
    /// Every command, in grammar reference order.
    pub const ALL: [Command; 6] = [
        Command::Select,
        Command::Insert,
        Command::Update,
        Command::Delete,
        Command::Create,
        Command::Drop,
    ];

    /// The lowercase keyword for this command.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Create => "create",
            Self::Drop => "drop",
        }
    }

    /// Whether this command has a grammar.
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::Select | Self::Insert | Self::Drop)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Expects an already case-folded keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.keyword() == s)
            .ok_or_else(|| ParseError::UnrecognizedCommand(s.to_string()))
    }
}

/// Parse one command line into a [`Query`].
pub fn parse(input: &str) -> Result<Query, ParseError> {
    let tokens = tokenize(input)?;
    trace!(?tokens, "tokenized");

    let (command, args) = tokens.split_first().ok_or(ParseError::EmptyInput)?;
    let command: Command = command.parse()?;
    debug!(%command, args = args.len(), "dispatching");

    let result = match command {
        Command::Select => parse_select(args),
        Command::Insert => parse_insert(args),
        Command::Drop => parse_drop(args),
        Command::Update | Command::Delete | Command::Create => {
            Err(ParseError::NotImplemented(command))
        }
    };

    match &result {
        Ok(query) => debug!(%command, table = query.table(), "parsed"),
        Err(err) => debug!(%command, error = %err, "rejected"),
    }
    result
}

/// Normalize a line and split it into tokens.
///
/// The result is never empty: a line with nothing but whitespace or a lone
/// `;` fails with [`ParseError::EmptyInput`].
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let folded = input.to_lowercase();
    let body = folded.strip_suffix(';').unwrap_or(&folded);

    let (_, words) = tokens(body).map_err(|e: nom::Err<nom::error::Error<&str>>| {
        ParseError::UnexpectedToken(e.to_string())
    })?;
    if words.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(words.into_iter().map(str::to_string).collect())
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(preceded(whitespace, many0(terminated(token, whitespace))))(input)
}

/// Require `keyword` in this slot.
fn expect_keyword(slot: Option<&String>, keyword: &'static str) -> Result<(), ParseError> {
    match slot {
        Some(token) if token == keyword => Ok(()),
        _ => Err(ParseError::MissingClause(keyword)),
    }
}

/// Require a table name in this slot, following `keyword`.
fn expect_table(slot: Option<&String>, keyword: &'static str) -> Result<String, ParseError> {
    slot.cloned().ok_or(ParseError::MissingTable(keyword))
}

/// `<fields...> from <table>`
fn parse_select(args: &[String]) -> Result<Query, ParseError> {
    let split = args
        .len()
        .checked_sub(2)
        .ok_or(ParseError::MissingClause("from"))?;
    let (fields, clause) = args.split_at(split);

    expect_keyword(clause.first(), "from")?;
    let table = expect_table(clause.get(1), "from")?;

    Ok(Query::Select(SelectQuery::new(table, fields.to_vec())))
}

/// `into <table> values (<col>=<val>, ...)`
fn parse_insert(args: &[String]) -> Result<Query, ParseError> {
    let mut slots = args.iter();
    expect_keyword(slots.next(), "into")?;
    let table = expect_table(slots.next(), "into")?;
    expect_keyword(slots.next(), "values")?;

    let rest: Vec<&str> = slots.map(String::as_str).collect();
    let values = parse_assignments(&rest.join(" "))?;

    Ok(Query::Insert(InsertQuery::new(table, values)))
}

/// Split `(a=1, b=2)` into an ordered column map.
///
/// The surrounding parentheses are optional. Blank chunks are skipped, and a
/// repeated column keeps its first position but takes the last value. Each
/// chunk splits at its first `=` only, so the value keeps any later `=`
/// (`expr=a=b` gives `a=b`), and `c=` gives an empty value rather than none.
fn parse_assignments(list: &str) -> Result<IndexMap<String, String>, ParseError> {
    let list = list.strip_prefix('(').unwrap_or(list);
    let list = list.strip_suffix(')').unwrap_or(list);

    let mut values = IndexMap::new();
    for chunk in list.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let (column, value) = chunk
            .split_once('=')
            .ok_or_else(|| ParseError::InvalidAssignment(chunk.to_string()))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(ParseError::InvalidAssignment(chunk.to_string()));
        }
        values.insert(column.to_string(), value.trim().to_string());
    }
    Ok(values)
}

/// `table [if exists] <table>`
///
/// A leading `if` is always the start of `if exists`, never a table name.
fn parse_drop(args: &[String]) -> Result<Query, ParseError> {
    let mut slots = args.iter().peekable();
    expect_keyword(slots.next(), "table")?;

    let if_exists = slots.next_if(|token| *token == "if").is_some();
    if if_exists {
        match slots.next() {
            Some(token) if token == "exists" => {}
            Some(_) => return Err(ParseError::MissingClause("exists")),
            None => return Err(ParseError::MissingTable("table")),
        }
    }

    let table = expect_table(slots.next(), "table")?;
    if let Some(extra) = slots.next() {
        return Err(ParseError::UnexpectedToken(extra.clone()));
    }

    Ok(Query::Drop(DropQuery::new(table, if_exists)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn select(query: Query) -> SelectQuery {
        match query {
            Query::Select(q) => q,
            other => panic!("expected select, got {other:?}"),
        }
    }

    fn insert(query: Query) -> InsertQuery {
        match query {
            Query::Insert(q) => q,
            other => panic!("expected insert, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_splits_whitespace_runs() {
        assert_eq!(
            tokenize("  SELECT \t a\n b  FROM t  ").unwrap(),
            vec!["select", "a", "b", "from", "t"]
        );
    }

    #[test]
    fn test_tokenize_strips_one_terminator() {
        assert_eq!(tokenize("drop table t;").unwrap(), vec!["drop", "table", "t"]);
        assert_eq!(tokenize("drop table t ;").unwrap(), vec!["drop", "table", "t"]);
        assert_eq!(tokenize("drop table t;;").unwrap(), vec!["drop", "table", "t;"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize(""), Err(ParseError::EmptyInput));
        assert_eq!(tokenize(" \t\n "), Err(ParseError::EmptyInput));
        assert_eq!(tokenize(" ; "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_command_from_str() {
        assert_eq!("select".parse::<Command>(), Ok(Command::Select));
        assert_eq!("drop".parse::<Command>(), Ok(Command::Drop));
        assert_eq!(
            "merge".parse::<Command>(),
            Err(ParseError::UnrecognizedCommand("merge".into()))
        );
        for command in Command::ALL {
            assert_eq!(command.keyword().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_select_star() {
        let q = select(parse("select * from accounts").unwrap());
        assert_eq!(q.table(), "accounts");
        assert_eq!(q.fields(), ["*"]);
    }

    #[test]
    fn test_select_fields_keep_order() {
        let q = select(parse("SELECT name age FROM Accounts").unwrap());
        assert_eq!(q.table(), "accounts");
        assert_eq!(q.fields(), ["name", "age"]);
    }

    #[test]
    fn test_select_no_fields() {
        let q = select(parse("select from t").unwrap());
        assert!(q.fields().is_empty());
        assert!(q.is_wildcard());
    }

    #[test]
    fn test_select_commas_stay_in_tokens() {
        let q = select(parse("select a, b from t").unwrap());
        assert_eq!(q.fields(), ["a,", "b"]);
    }

    #[test]
    fn test_select_missing_from() {
        assert_eq!(parse("select a b"), Err(ParseError::MissingClause("from")));
        assert_eq!(parse("select a from"), Err(ParseError::MissingClause("from")));
        assert_eq!(parse("select from"), Err(ParseError::MissingClause("from")));
        assert_eq!(parse("select"), Err(ParseError::MissingClause("from")));
    }

    #[test]
    fn test_insert_values() {
        let q = insert(parse("insert into accounts values (name=alice, age=30)").unwrap());
        assert_eq!(q.table(), "accounts");
        assert_eq!(q.fields(), vec!["name", "age"]);
        assert_eq!(q.value("name"), Some("alice"));
        assert_eq!(q.value("age"), Some("30"));
    }

    #[test]
    fn test_insert_spacing_inside_list() {
        let q = insert(parse("insert into t values ( a = 1 ,b=2 )").unwrap());
        assert_eq!(q.fields(), vec!["a", "b"]);
        assert_eq!(q.value("a"), Some("1"));
        assert_eq!(q.value("b"), Some("2"));
    }

    #[test]
    fn test_insert_value_with_spaces_is_rejoined() {
        let q = insert(parse("insert into t values (name=Mary   Ann)").unwrap());
        assert_eq!(q.value("name"), Some("mary ann"));
    }

    #[test]
    fn test_insert_without_parens() {
        let q = insert(parse("insert into t values a=1").unwrap());
        assert_eq!(q.value("a"), Some("1"));
    }

    #[test]
    fn test_insert_duplicate_column_last_wins() {
        let q = insert(parse("insert into t values (a=1, b=2, a=3)").unwrap());
        assert_eq!(q.fields(), vec!["a", "b"]);
        assert_eq!(q.value("a"), Some("3"));
    }

    #[test]
    fn test_insert_empty_list() {
        let q = insert(parse("insert into t values ()").unwrap());
        assert!(q.values().is_empty());
        let q = insert(parse("insert into t values").unwrap());
        assert!(q.values().is_empty());
    }

    #[test]
    fn test_insert_splits_at_first_equals() {
        let q = insert(parse("insert into t values (expr=a=b)").unwrap());
        assert_eq!(q.value("expr"), Some("a=b"));

        let q = insert(parse("insert into t values (expr=a=b, c=)").unwrap());
        assert_eq!(q.fields(), vec!["expr", "c"]);
        assert_eq!(q.value("c"), Some(""));
    }

    #[test]
    fn test_insert_bad_assignment() {
        assert_eq!(
            parse("insert into t values (a=1, b)"),
            Err(ParseError::InvalidAssignment("b".into()))
        );
        assert_eq!(
            parse("insert into t values (=1)"),
            Err(ParseError::InvalidAssignment("=1".into()))
        );
    }

    #[test]
    fn test_insert_missing_clauses() {
        assert_eq!(
            parse("insert accounts values (name=alice)"),
            Err(ParseError::MissingClause("into"))
        );
        assert_eq!(parse("insert"), Err(ParseError::MissingClause("into")));
        assert_eq!(parse("insert into"), Err(ParseError::MissingTable("into")));
        assert_eq!(parse("insert into t"), Err(ParseError::MissingClause("values")));
        assert_eq!(
            parse("insert into t (a=1)"),
            Err(ParseError::MissingClause("values"))
        );
    }

    #[test]
    fn test_drop() {
        assert_eq!(
            parse("DROP TABLE accounts;").unwrap(),
            Query::Drop(DropQuery::new("accounts".into(), false))
        );
    }

    #[test]
    fn test_drop_if_exists() {
        assert_eq!(
            parse("drop table if exists t").unwrap(),
            Query::Drop(DropQuery::new("t".into(), true))
        );
        assert_eq!(parse("drop table if"), Err(ParseError::MissingTable("table")));
        assert_eq!(
            parse("drop table if exists"),
            Err(ParseError::MissingTable("table"))
        );
        assert_eq!(
            parse("drop table if t"),
            Err(ParseError::MissingClause("exists"))
        );
        assert_eq!(
            parse("drop table if exists t u"),
            Err(ParseError::UnexpectedToken("u".into()))
        );
    }

    #[test]
    fn test_drop_requires_table_keyword() {
        assert_eq!(parse("drop accounts"), Err(ParseError::MissingClause("table")));
        assert_eq!(parse("drop table"), Err(ParseError::MissingTable("table")));
        assert_eq!(
            parse("drop table a b"),
            Err(ParseError::UnexpectedToken("b".into()))
        );
    }

    #[test]
    fn test_unimplemented_commands() {
        assert_eq!(
            parse("update accounts set age=31"),
            Err(ParseError::NotImplemented(Command::Update))
        );
        assert_eq!(
            parse("delete from accounts"),
            Err(ParseError::NotImplemented(Command::Delete))
        );
        assert_eq!(
            parse("create table t (id integer)"),
            Err(ParseError::NotImplemented(Command::Create))
        );
    }

    #[test]
    fn test_unrecognized_command() {
        assert_eq!(
            parse("Truncate accounts"),
            Err(ParseError::UnrecognizedCommand("truncate".into()))
        );
    }
}
