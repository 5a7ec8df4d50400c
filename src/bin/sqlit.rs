//! sqlit: the command-line front end
//!
//! # Usage
//!
//! ```bash
//! # Parse one query and print it back as SQL
//! sqlit "select name age from accounts"
//!
//! # Show the parsed structure
//! sqlit explain "insert into accounts values (name=alice, age=30)"
//!
//! # Interactive mode (also the default with no query)
//! sqlit repl
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use sqlit::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlit")]
#[command(version)]
#[command(about = "A tiny SQL-like command interpreter", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlit 'select * from accounts'
    sqlit 'insert into accounts values (name=alice, age=30)' --format json
    sqlit explain 'drop table accounts'
    sqlit repl --config ./sqlit.toml")]
struct Cli {
    /// The query to parse
    query: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Path to a config file
    #[arg(short, long, env = "SQLIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (SQLIT_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and explain its structure
    Explain {
        /// The query to explain
        query: String,
    },
    /// Interactive REPL mode
    Repl,
    /// Show the grammar reference
    Grammar,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("SQLIT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config =
        Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.no_color {
        config.output.color = false;
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Explain { query }) => explain_query(query),
        Some(Commands::Repl) => Ok(sqlit::repl::run_repl(&config)?),
        Some(Commands::Grammar) => {
            show_grammar();
            Ok(())
        }
        None => match &cli.query {
            Some(query) => print_query(query, config.output.format),
            None => Ok(sqlit::repl::run_repl(&config)?),
        },
    }
}

fn print_query(query: &str, format: OutputFormat) -> anyhow::Result<()> {
    let parsed = sqlit::parse(query).with_context(|| format!("failed to parse `{}`", query))?;
    println!("{}", render(&parsed, format)?);
    Ok(())
}

fn explain_query(query: &str) -> anyhow::Result<()> {
    println!("{} {}", "Query:".dimmed(), query.yellow());
    println!();

    let parsed = sqlit::parse(query).with_context(|| format!("failed to parse `{}`", query))?;

    println!("{}", "Parsed Structure:".green().bold());
    println!("  {} {}", "Command:".dimmed(), parsed.command().to_string().cyan());
    println!("  {} {}", "Table:".dimmed(), parsed.table().white());

    match &parsed {
        Query::Select(q) => {
            if q.is_wildcard() {
                println!("  {} {}", "Fields:".dimmed(), "all".cyan());
            } else {
                println!("  {}", "Fields:".dimmed());
                for field in q.fields() {
                    println!("    • {}", field.white());
                }
            }
        }
        Query::Insert(q) => {
            println!("  {}", "Values:".dimmed());
            for (column, value) in q.values() {
                println!("    {} = {}", column.white(), value.yellow());
            }
        }
        Query::Update(q) => {
            println!("  {}", "Changes:".dimmed());
            for (column, value) in q.changes() {
                println!("    {} = {}", column.white(), value.yellow());
            }
            if let Some(filter) = q.filter() {
                println!("  {} {}", "Filter:".dimmed(), filter.as_str().white());
            }
        }
        Query::Delete(q) => {
            if let Some(filter) = q.filter() {
                println!("  {} {}", "Filter:".dimmed(), filter.as_str().white());
            }
        }
        Query::CreateTable(q) => {
            println!("  {}", "Columns:".dimmed());
            for column in q.columns() {
                println!("    • {}", column.to_sql().white());
            }
        }
        Query::Drop(q) => {
            if q.if_exists() {
                println!("  {} {}", "If exists:".dimmed(), "yes".cyan());
            }
        }
    }

    println!();
    println!("{}", "Generated SQL:".green().bold());
    println!("  {}", parsed.to_sql().white());
    Ok(())
}

fn show_grammar() {
    println!("{}", "sqlit Grammar Reference".cyan().bold());
    println!();

    println!(
        "{:8} {:50} {}",
        "Command".white().bold(),
        "Shape".white().bold(),
        "Status".white().bold()
    );
    println!("{}", "─".repeat(72).dimmed());

    for command in Command::ALL {
        let shape = match command {
            Command::Select => "SELECT <field>... FROM <table>",
            Command::Insert => "INSERT INTO <table> VALUES (<col>=<val>, ...)",
            Command::Update => "UPDATE <table> SET ... [WHERE ...]",
            Command::Delete => "DELETE FROM <table> [WHERE ...]",
            Command::Create => "CREATE TABLE <table> (...)",
            Command::Drop => "DROP TABLE [IF EXISTS] <table>",
        };
        let status = if command.is_implemented() {
            "ready".green()
        } else {
            "not implemented".yellow()
        };
        println!("{:8} {:50} {}", command.keyword().cyan().bold(), shape, status);
    }

    println!();
    println!(
        "{}",
        "Keywords are case-insensitive. One trailing `;` is allowed. No quoting.".dimmed()
    );
}
