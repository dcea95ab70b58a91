//! REPL command grammar.

use todolist_core::{ClientState, TodoItem};

pub const HELP: &str = "\
commands:
  add <text>         add a todo
  edit <n> [text]    edit item n in place (optionally set its new text)
  text <text>        replace the text of the item being edited
  save               save the item being edited
  cancel             leave edit mode without saving
  delete <n>         delete item n (asks for confirmation)
  retry              reload the list
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit { index: usize, text: Option<String> },
    Text(String),
    Save,
    Cancel,
    Delete(usize),
    Retry,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not a valid item number")]
    BadIndex(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "edit" | "e" => {
            let (index, text) = match rest.split_once(char::is_whitespace) {
                Some((n, text)) => (n, Some(text.trim().to_string())),
                None => (rest, None),
            };
            Ok(Command::Edit {
                index: index_arg("edit", index)?,
                text,
            })
        }
        "text" | "t" => Ok(Command::Text(rest.to_string())),
        "save" | "s" => Ok(Command::Save),
        "cancel" | "c" => Ok(Command::Cancel),
        "delete" | "del" | "d" => Ok(Command::Delete(index_arg("delete", rest)?)),
        "retry" | "refresh" | "r" => Ok(Command::Retry),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn index_arg(command: &'static str, arg: &str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingIndex(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::BadIndex(arg.to_string())),
    }
}

/// Look up a displayed row by its 1-based number.
pub fn item_at(state: &ClientState, number: usize) -> Option<&TodoItem> {
    number.checked_sub(1).and_then(|i| state.items().get(i))
}
