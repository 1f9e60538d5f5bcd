//! Command line grammar.
//!
//! ```text
//! create <name>              | create -n <count> <name>...
//! write <name> "<content>"   | write -n <count> (<name> "<content>")...
//! delete <name>              | delete -n <count> <name>...
//! read <name>
//! ls [-l]
//! exit
//! ```
//!
//! Tokens are separated by whitespace. Write content is everything between
//! the first `"` after the name and the next `"`; anything before the opening
//! quote is skipped, an unterminated quote runs to the end of the line, and a
//! write with no quote at all writes empty content. A counted write keeps the
//! pairs that are present and records how many are missing. Trailing tokens
//! after a complete single-name command are ignored.

use crate::error::ParseError;

/// Flag introducing a counted, multi-name form.
const MULTI_FLAG: &str = "-n";

/// Flag selecting the detailed listing.
const LONG_FLAG: &str = "-l";

/// One content replacement requested by a `write` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub name: String,
    pub content: String,
}

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Create(Vec<String>),
    /// `missing` counts the pairs a `write -n` announced but never gave.
    Write {
        requests: Vec<WriteRequest>,
        missing: usize,
    },
    Delete(Vec<String>),
    Read(String),
    List { detailed: bool },
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let mut cursor = Cursor::new(line);
    let Some(verb) = cursor.token() else {
        return Ok(None);
    };

    let command = match verb {
        "create" => ShellCommand::Create(parse_names(&mut cursor)?),
        "write" => parse_writes(&mut cursor)?,
        "delete" => ShellCommand::Delete(parse_names(&mut cursor)?),
        "read" => ShellCommand::Read(cursor.token().ok_or(ParseError::MissingFileName)?.into()),
        "ls" => ShellCommand::List {
            detailed: cursor.token() == Some(LONG_FLAG),
        },
        "exit" => ShellCommand::Exit,
        other => return Err(ParseError::UnknownCommand(other.into())),
    };
    Ok(Some(command))
}

fn parse_names(cursor: &mut Cursor<'_>) -> Result<Vec<String>, ParseError> {
    match cursor.token() {
        None => Err(ParseError::MissingFileName),
        Some(MULTI_FLAG) => {
            let expected = parse_count(cursor)?;
            let names: Vec<String> = std::iter::from_fn(|| cursor.token())
                .map(str::to_string)
                .collect();
            if names.len() != expected {
                return Err(ParseError::CountMismatch {
                    expected,
                    actual: names.len(),
                });
            }
            Ok(names)
        }
        Some(name) => Ok(vec![name.to_string()]),
    }
}

fn parse_writes(cursor: &mut Cursor<'_>) -> Result<ShellCommand, ParseError> {
    match cursor.token() {
        None => Err(ParseError::MissingFileName),
        Some(MULTI_FLAG) => {
            let expected = parse_count(cursor)?;
            let requests: Vec<WriteRequest> = std::iter::from_fn(|| {
                let name = cursor.token()?;
                Some(parse_write(name, cursor))
            })
            .take(expected)
            .collect();
            Ok(ShellCommand::Write {
                missing: expected - requests.len(),
                requests,
            })
        }
        Some(name) => Ok(ShellCommand::Write {
            requests: vec![parse_write(name, cursor)],
            missing: 0,
        }),
    }
}

fn parse_write(name: &str, cursor: &mut Cursor<'_>) -> WriteRequest {
    WriteRequest {
        name: name.to_string(),
        content: cursor.quoted().to_string(),
    }
}

fn parse_count(cursor: &mut Cursor<'_>) -> Result<usize, ParseError> {
    let raw = cursor.token().unwrap_or_default();
    raw.parse()
        .map_err(|_| ParseError::InvalidCount(raw.to_string()))
}

/// Forward-only reader over the remainder of a line.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Next whitespace-delimited token.
    fn token(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(token)
    }

    /// Text between the next `"` and the one after it. Without any quote the
    /// rest of the line is consumed and the text is empty.
    fn quoted(&mut self) -> &'a str {
        let Some(start) = self.rest.find('"') else {
            self.rest = "";
            return "";
        };
        let body = &self.rest[start + 1..];
        match body.find('"') {
            Some(end) => {
                self.rest = &body[end + 1..];
                &body[..end]
            }
            None => {
                self.rest = "";
                body
            }
        }
    }
}
