//! Line-oriented parser for batch commands.
//!
//! Each non-blank line is one command: a name token followed by arguments. Arguments are split
//! on whitespace, except that text between a pair of double quotes is a single (trimmed)
//! argument, so paths may contain spaces:
//!
//! ```text
//! md "/my documents"
//! cp /a "/my documents/a copy"
//! ```

use std::io::{self, BufRead};

use super::command::{Command, CommandName};

const QUOTE: char = '"';

/// Reads [`Command`]s from any buffered reader, one per non-blank line.
///
/// Parse problems do not stop the iteration; they are reported through [`Command::error`].
/// I/O errors are yielded as `Err`. Bytes that are not valid UTF-8 are kept as replacement
/// characters, so they end up in paths like any other character.
pub struct CommandParser<R> {
    reader: R,
    pending: Option<io::Result<Command>>,
}

impl<R: BufRead> CommandParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    /// Whether another command (or read error) is waiting. Blank lines do not count.
    pub fn has_more_input(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.read_command();
        }
        self.pending.is_some()
    }

    fn read_command(&mut self) -> Option<io::Result<Command>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }
            return Some(Ok(parse_line(&line)));
        }
    }
}

impl<R: BufRead> Iterator for CommandParser<R> {
    type Item = io::Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pending.take().or_else(|| self.read_command())
    }
}

/// Parses a single command line.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let (token, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    let name = CommandName::parse(token);
    if name == CommandName::Unknown {
        return Command {
            name,
            arguments: Vec::new(),
            error: Some(format!("Unknown command is met: {token}")),
            raw: line.to_string(),
        };
    }

    let (arguments, error) = parse_arguments(rest);
    Command {
        name,
        arguments,
        error,
        raw: line.to_string(),
    }
}

/// Splits the argument part of a line.
///
/// On error, the arguments parsed before the problem are returned along with the message.
fn parse_arguments(text: &str) -> (Vec<String>, Option<String>) {
    let quotes = text.matches(QUOTE).count();
    let mut arguments = Vec::new();

    for (index, part) in text.split(QUOTE).enumerate() {
        if index % 2 == 0 {
            arguments.extend(part.split_whitespace().map(str::to_string));
            continue;
        }

        if index == quotes {
            // an opening quote with nothing to close it
            return (
                arguments,
                Some(format!("Closing quotes {QUOTE} symbol is not found.")),
            );
        }

        let quoted = part.trim();
        if quoted.is_empty() {
            return (
                arguments,
                Some(format!("Empty argument {QUOTE}{QUOTE} is found.")),
            );
        }
        arguments.push(quoted.to_string());
    }

    (arguments, None)
}
