//! Menu text and line parsing for the console loop.
//!
//! Everything here works on already-read lines, so it can be tested
//! without a terminal.

use std::fmt;

pub const MENU: &str = "\
1. Add
2. Delete
3. Toggle
4. Edit
5. Save
6. Exit";

/// One of the six numbered menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Toggle,
    Edit,
    Save,
    Exit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuChoice::Add),
            2 => Ok(MenuChoice::Delete),
            3 => Ok(MenuChoice::Toggle),
            4 => Ok(MenuChoice::Edit),
            5 => Ok(MenuChoice::Save),
            6 => Ok(MenuChoice::Exit),
            other => Err(InputError::UnknownChoice(other)),
        }
    }
}

/// Why a line of user input was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NotANumber(String),
    UnknownChoice(i64),
    NegativeIndex(i64),
    EmptyTitle,
    NotUtf8,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotANumber(input) => write!(f, "{input:?} is not a number"),
            InputError::UnknownChoice(n) => write!(f, "invalid choice {n}, pick 1-6"),
            InputError::NegativeIndex(n) => write!(f, "index {n} is out of range"),
            InputError::EmptyTitle => write!(f, "title cannot be empty"),
            InputError::NotUtf8 => write!(f, "input is not valid UTF-8"),
        }
    }
}

impl std::error::Error for InputError {}

fn parse_integer(line: &str) -> Result<i64, InputError> {
    let trimmed = line.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

pub fn parse_choice(line: &str) -> Result<MenuChoice, InputError> {
    MenuChoice::try_from(parse_integer(line)?)
}

/// Parses a list index. Upper bounds are the list's business, not ours.
pub fn parse_index(line: &str) -> Result<usize, InputError> {
    let n = parse_integer(line)?;
    usize::try_from(n).map_err(|_| InputError::NegativeIndex(n))
}

/// Keeps the title as typed; only all-blank titles are refused.
pub fn parse_title(line: &str) -> Result<String, InputError> {
    if line.trim().is_empty() {
        Err(InputError::EmptyTitle)
    } else {
        Ok(line.to_string())
    }
}
