//! REPL mode for interactive sqlit queries.

use std::io;

use colored::*;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{SqlitError, SqlitResult};
use crate::output::{OutputFormat, render};

/// What the loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Blank line.
    Skip,
    Exit,
    Help,
    Clear,
    /// A parsed query, already rendered.
    Print(String),
    /// A diagnostic; the loop keeps going.
    Fail(String),
}

/// Decide what to do with `line`. Never panics and never exits on bad input.
pub fn evaluate(line: &str, format: OutputFormat) -> Action {
    match line.trim() {
        "" => Action::Skip,
        ".exit" | ".quit" => Action::Exit,
        ".help" => Action::Help,
        ".clear" => Action::Clear,
        line => match crate::parse(line) {
            Ok(query) => match render(&query, format) {
                Ok(out) => Action::Print(out),
                Err(err) => Action::Fail(err.to_string()),
            },
            Err(err) => Action::Fail(format!("failed to parse query: {}", err)),
        },
    }
}

/// Run the interactive REPL until `.exit` or end of input.
pub fn run_repl(config: &Config) -> SqlitResult<()> {
    println!("{}", "sqlit REPL".cyan().bold());
    println!("{}", "Type .help for commands, .exit or Ctrl-D to quit.".dimmed());
    println!();

    let mut rl =
        DefaultEditor::new().map_err(|e| SqlitError::Io(io::Error::other(e.to_string())))?;

    let history = config.repl.history_path();
    if let Some(path) = &history {
        if let Err(e) = rl.load_history(path) {
            debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    let prompt = config.repl.prompt.cyan().bold().to_string();
    let result = loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match evaluate(&line, config.output.format) {
                    Action::Skip => {}
                    Action::Exit => break Ok(()),
                    Action::Help => show_repl_help(),
                    Action::Clear => print!("\x1B[2J\x1B[1;1H"),
                    Action::Print(out) => {
                        println!("{} {}", "→".green(), out.white().bold());
                        println!();
                    }
                    Action::Fail(msg) => {
                        eprintln!("{} {}", "✗".red(), msg.red());
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
            }
            Err(ReadlineError::Eof) => break Ok(()),
            Err(err) => break Err(SqlitError::Io(io::Error::other(err.to_string()))),
        }
    };

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
    println!("{}", "Goodbye!".green());
    result
}

/// Show REPL help information.
pub fn show_repl_help() {
    println!("{}", "sqlit REPL commands:".cyan().bold());
    println!("  {}  - Exit the REPL", ".exit".yellow());
    println!("  {}  - Show this help", ".help".yellow());
    println!("  {} - Clear screen", ".clear".yellow());
    println!();
    println!("{}", "Query examples:".cyan().bold());
    println!("  select * from accounts");
    println!("  select name age from accounts;");
    println!("  insert into accounts values (name=alice, age=30)");
    println!("  drop table accounts");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_dot_commands() {
        assert_eq!(evaluate("", OutputFormat::Sql), Action::Skip);
        assert_eq!(evaluate("   ", OutputFormat::Sql), Action::Skip);
        assert_eq!(evaluate(".exit", OutputFormat::Sql), Action::Exit);
        assert_eq!(evaluate(" .quit ", OutputFormat::Sql), Action::Exit);
        assert_eq!(evaluate(".help", OutputFormat::Sql), Action::Help);
        assert_eq!(evaluate(".clear", OutputFormat::Sql), Action::Clear);
    }

    #[test]
    fn test_query_is_rendered() {
        assert_eq!(
            evaluate("SELECT * FROM accounts;", OutputFormat::Sql),
            Action::Print("SELECT * FROM accounts".into())
        );
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        assert_eq!(
            evaluate("update accounts set age=31", OutputFormat::Sql),
            Action::Fail("failed to parse query: `update` is not implemented yet".into())
        );
        assert_eq!(
            evaluate("frobnicate", OutputFormat::Sql),
            Action::Fail("failed to parse query: unrecognized command `frobnicate`".into())
        );
    }
}
