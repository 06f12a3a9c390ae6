//! Interactive console commands.
//!
//! One command per line: a command word, then an optional argument that
//! runs to the end of the line (`ask how many users signed up today?`).

use crate::types::{ConsoleError, Result};

/// Which buffer `clear` empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    Input,
    Sql,
    Results,
}

/// Parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Set the input and generate SQL
    Ask(String),
    /// Fill the input without sending
    Example(String),
    /// Replace the SQL editor content
    Sql(String),
    Run,
    /// Move by this many pages (`next` = 1, `prev` = -1)
    Step(isize),
    /// Jump to a 1-based page
    Page(usize),
    Show,
    Copy,
    Clear(ClearTarget),
    Schema,
    Health,
    /// Write the page as HTML to this path
    Html(String),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  ask <question>         generate SQL from a question
  example <question>     fill the input without sending
  sql <statement>        replace the SQL editor content
  run                    execute the SQL in the editor
  next | prev            change page
  page <n>               jump to page n
  show                   print the current table
  copy                   print the SQL for copying
  clear input|sql|results
  schema                 list tables and columns
  health                 check that the backend is up
  html <file>            write the page as HTML
  help                   this text
  quit                   leave";

/// Parse one input line.
///
/// # Errors
///
/// Returns `ConsoleError::Validation` for an empty line or a command whose
/// argument is missing or malformed.
pub fn parse(line: &str) -> Result<ConsoleCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ConsoleError::validation("Empty command"));
    }

    let (word, arg) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let arg = arg.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "ask" => ConsoleCommand::Ask(arg.to_string()),
        "example" => ConsoleCommand::Example(arg.to_string()),
        "sql" => ConsoleCommand::Sql(arg.to_string()),
        "run" => ConsoleCommand::Run,
        "next" | "n" => ConsoleCommand::Step(1),
        "prev" | "p" => ConsoleCommand::Step(-1),
        "page" => ConsoleCommand::Page(parse_page(arg)?),
        "show" => ConsoleCommand::Show,
        "copy" => ConsoleCommand::Copy,
        "clear" => ConsoleCommand::Clear(parse_clear_target(arg)?),
        "schema" => ConsoleCommand::Schema,
        "health" => ConsoleCommand::Health,
        "html" => {
            if arg.is_empty() {
                return Err(ConsoleError::validation("Usage: html <file>"));
            }
            ConsoleCommand::Html(arg.to_string())
        }
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(word.to_string()),
    };

    Ok(command)
}

fn parse_page(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(0) => Err(ConsoleError::validation("Page numbers start at 1")),
        Ok(page) => Ok(page),
        Err(_) if arg.is_empty() => Err(ConsoleError::validation("Usage: page <n>")),
        Err(_) => Err(ConsoleError::validation(format!(
            "'{}' is not a page number",
            arg
        ))),
    }
}

fn parse_clear_target(arg: &str) -> Result<ClearTarget> {
    match arg.to_ascii_lowercase().as_str() {
        "input" => Ok(ClearTarget::Input),
        "sql" => Ok(ClearTarget::Sql),
        "results" => Ok(ClearTarget::Results),
        _ => Err(ConsoleError::validation("Usage: clear input|sql|results")),
    }
}
