//! Command-line parsing for the interactive shell.
//!
//! A line is split into whitespace-separated tokens; double quotes group a
//! token containing spaces and `\"` inside quotes is a literal quote. Form
//! fields are given as `field=value`.

use brickshelf_core::search::SearchForm;
use brickshelf_core::validation::SetForm;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a command line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated quote")]
    UnterminatedQuote,

    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("Unknown field '{field}' for {command}")]
    UnknownField {
        command: &'static str,
        field: String,
    },

    #[error("Expected field=value, got '{0}'")]
    ExpectedFieldValue(String),

    #[error("{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("Expected yes or no, got '{0}'")]
    InvalidFlag(String),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One field assignment on the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetFieldChange {
    Articul(String),
    Name(String),
    PartCount(String),
    Completeness(String),
    ImageUrl(String),
    Series(String),
    Favorite(bool),
}

impl SetFieldChange {
    fn parse(field: &str, value: &str, command: &'static str) -> Result<Self, ParseError> {
        let value = value.to_string();
        Ok(match field.to_ascii_lowercase().as_str() {
            "articul" | "id" => SetFieldChange::Articul(value),
            "name" => SetFieldChange::Name(value),
            "parts" => SetFieldChange::PartCount(value),
            "complete" => SetFieldChange::Completeness(value),
            "image" | "url" => SetFieldChange::ImageUrl(value),
            "series" => SetFieldChange::Series(value),
            "fav" => SetFieldChange::Favorite(parse_flag(&value)?),
            _ => {
                return Err(ParseError::UnknownField {
                    command,
                    field: field.to_string(),
                })
            }
        })
    }

    /// Write this change into `form`.
    pub fn apply(self, form: &mut SetForm) {
        match self {
            SetFieldChange::Articul(v) => form.articul = v,
            SetFieldChange::Name(v) => form.name = v,
            SetFieldChange::PartCount(v) => form.part_count = v,
            SetFieldChange::Completeness(v) => form.completeness = v,
            SetFieldChange::ImageUrl(v) => form.image_url = v,
            SetFieldChange::Series(v) => form.series = v,
            SetFieldChange::Favorite(v) => form.favorite = v,
        }
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(SetForm),
    /// Changes to apply on top of the stored record `key`.
    Edit {
        key: String,
        changes: Vec<SetFieldChange>,
    },
    Search(SearchForm),
    Show(String),
    /// `confirmed` is set by `-y` / `--yes`; otherwise the shell asks first.
    Delete {
        keys: Vec<String>,
        confirmed: bool,
    },
    Favorite(String),
    Gallery {
        favorites_only: bool,
    },
    Stats,
    Series,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "add" => {
            let mut form = SetForm::default();
            for change in parse_changes("add", args)? {
                change.apply(&mut form);
            }
            Command::Add(form)
        }
        "edit" => {
            let (key, rest) = args.split_first().ok_or(ParseError::MissingArgument {
                command: "edit",
                what: "an identifier",
            })?;
            Command::Edit {
                key: key.clone(),
                changes: parse_changes("edit", rest)?,
            }
        }
        "search" | "find" => Command::Search(parse_search(args)?),
        "show" => Command::Show(single_key("show", args)?),
        "delete" | "rm" => parse_delete(args)?,
        "fav" | "favorite" => Command::Favorite(single_key("fav", args)?),
        "gallery" => Command::Gallery {
            favorites_only: parse_gallery(args)?,
        },
        "stats" => no_args(Command::Stats, args)?,
        "series" => no_args(Command::Series, args)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Split a line into tokens, honoring double quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

fn field_value(token: &str) -> Result<(&str, &str), ParseError> {
    token
        .split_once('=')
        .ok_or_else(|| ParseError::ExpectedFieldValue(token.to_string()))
}

fn parse_changes(
    command: &'static str,
    args: &[String],
) -> Result<Vec<SetFieldChange>, ParseError> {
    args.iter()
        .map(|token| {
            let (field, value) = field_value(token)?;
            SetFieldChange::parse(field, value, command)
        })
        .collect()
}

fn parse_search(args: &[String]) -> Result<SearchForm, ParseError> {
    let mut form = SearchForm::default();
    for token in args {
        if token.eq_ignore_ascii_case("fav") {
            form.favorites_only = true;
            continue;
        }
        let (field, value) = field_value(token)?;
        let value = value.to_string();
        match field.to_ascii_lowercase().as_str() {
            "articul" | "id" => form.articul = value,
            "name" => form.name = value,
            "min" => form.min_part_count = value,
            "max" => form.max_part_count = value,
            "complete" => form.completeness = value,
            "series" => form.series = value,
            "fav" => form.favorites_only = parse_flag(&value)?,
            _ => {
                return Err(ParseError::UnknownField {
                    command: "search",
                    field: field.to_string(),
                })
            }
        }
    }
    Ok(form)
}

fn parse_delete(args: &[String]) -> Result<Command, ParseError> {
    let mut keys = Vec::new();
    let mut confirmed = false;
    for token in args {
        match token.as_str() {
            "-y" | "--yes" => confirmed = true,
            key => keys.push(key.to_string()),
        }
    }
    if keys.is_empty() {
        return Err(ParseError::MissingArgument {
            command: "delete",
            what: "at least one identifier",
        });
    }
    Ok(Command::Delete { keys, confirmed })
}

fn parse_gallery(args: &[String]) -> Result<bool, ParseError> {
    match args {
        [] => Ok(false),
        [flag] if flag.eq_ignore_ascii_case("fav") => Ok(true),
        [other, ..] => Err(ParseError::UnexpectedArgument(other.clone())),
    }
}

fn single_key(command: &'static str, args: &[String]) -> Result<String, ParseError> {
    match args {
        [key] => Ok(key.clone()),
        [] => Err(ParseError::MissingArgument {
            command,
            what: "an identifier",
        }),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument(extra.clone())),
    }
}

fn no_args(command: Command, args: &[String]) -> Result<Command, ParseError> {
    match args.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.clone())),
        None => Ok(command),
    }
}

/// Parse a yes/no value.
pub fn parse_flag(value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(ParseError::InvalidFlag(value.to_string())),
    }
}
