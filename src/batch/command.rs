use std::fmt;

/// Commands understood by the batch language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandName {
    /// Copy a file or directory.
    Cp,
    /// Make a directory.
    Md,
    /// Make a file.
    Mf,
    /// Move a file or directory.
    Mv,
    /// Remove a file or directory.
    Rm,
    Unknown,
}

impl CommandName {
    /// Maps a command token to a name. Matching is case-sensitive.
    pub fn parse(token: &str) -> CommandName {
        match token {
            "cp" => CommandName::Cp,
            "md" => CommandName::Md,
            "mf" => CommandName::Mf,
            "mv" => CommandName::Mv,
            "rm" => CommandName::Rm,
            _ => CommandName::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Cp => "cp",
            CommandName::Md => "md",
            CommandName::Mf => "mf",
            CommandName::Mv => "mv",
            CommandName::Rm => "rm",
            CommandName::Unknown => "unknown",
        }
    }

    /// Number of arguments the command takes, `None` for [`CommandName::Unknown`].
    pub fn arity(self) -> Option<usize> {
        match self {
            CommandName::Cp | CommandName::Mv => Some(2),
            CommandName::Md | CommandName::Mf | CommandName::Rm => Some(1),
            CommandName::Unknown => None,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: CommandName,
    pub arguments: Vec<String>,
    /// Set when the line could not be parsed; `arguments` then holds what was parsed before the
    /// problem was found.
    pub error: Option<String>,
    /// The line as written, used to attribute log lines.
    pub raw: String,
}

impl Command {
    pub fn is_valid(&self) -> bool {
        self.name != CommandName::Unknown && self.error.is_none()
    }
}
