//! Dispatches parsed commands to a backend, one at a time, stopping at the first failure.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{FsBackend, FsError, Level, Narrator, Outcome};

use super::command::{Command, CommandName};
use super::parser::CommandParser;

/// Overall result of a run, as reported to the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    NoError,
    /// The batch file could not be opened or read.
    CannotOpenDataStream,
    /// Unknown command or malformed arguments.
    CommandParsingError,
    /// Wrong number of arguments.
    CommandArgumentsError,
    /// The command was well-formed but the tree rejected it.
    LogicError,
}

impl ErrorCode {
    /// Process exit code for this result.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::NoError => 0,
            ErrorCode::CannotOpenDataStream => 1,
            ErrorCode::CommandParsingError => 2,
            ErrorCode::CommandArgumentsError => 3,
            ErrorCode::LogicError => 4,
        }
    }
}

/// Why a run stopped early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot open the batch file {} for reading: {source}", path.display())]
    CannotOpenBatchFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read commands: {0}")]
    Input(#[from] io::Error),

    #[error("{message}")]
    CommandParsing { command: String, message: String },

    #[error("{message}")]
    CommandArguments { command: String, message: String },

    #[error("command [{command}] failed: {source}")]
    Logic {
        command: String,
        #[source]
        source: FsError,
    },
}

impl RunError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            RunError::CannotOpenBatchFile { .. } | RunError::Input(_) => {
                ErrorCode::CannotOpenDataStream
            }
            RunError::CommandParsing { .. } => ErrorCode::CommandParsingError,
            RunError::CommandArguments { .. } => ErrorCode::CommandArgumentsError,
            RunError::Logic { .. } => ErrorCode::LogicError,
        }
    }
}

/// Knobs for a [`Runner`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Narrate the final tree once the run is over.
    pub print_tree: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { print_tree: true }
    }
}

/// Feeds commands to an [`FsBackend`].
///
/// ```
/// use std::io::Cursor;
/// use vfs_batch::{MapFS, RecordingNarrator, Runner};
///
/// let narrator = RecordingNarrator::new();
/// let mut runner = Runner::new(MapFS::with_narrator(narrator.clone()), narrator);
///
/// runner.run_reader(Cursor::new("md /a\nmf /a/f.txt\n"), false).unwrap();
/// assert!(runner.backend().exists("/a/f.txt"));
/// ```
pub struct Runner<B> {
    backend: B,
    narrator: Box<dyn Narrator>,
    options: RunOptions,
}

impl<B: FsBackend> Runner<B> {
    pub fn new<N: Narrator + 'static>(backend: B, narrator: N) -> Self {
        Self::with_options(backend, narrator, RunOptions::default())
    }

    pub fn with_options<N: Narrator + 'static>(
        backend: B,
        narrator: N,
        options: RunOptions,
    ) -> Self {
        Self {
            backend,
            narrator: Box::new(narrator),
            options,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Checks the argument count and hands the command to the backend.
    ///
    /// Parse errors carried by `command` are rejected first. Rejections are narrated with the
    /// command text attached; backend failures are narrated by the backend itself.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, RunError> {
        if let Some(message) = &command.error {
            let command_text = match command.name {
                CommandName::Unknown => None,
                _ => Some(command.raw.as_str()),
            };
            self.narrator
                .narrate(Level::Error, message, command_text);
            return Err(RunError::CommandParsing {
                command: command.raw.clone(),
                message: message.clone(),
            });
        }

        let result = match command.name {
            CommandName::Cp => {
                let [source, destination] = self.arguments::<2>(command)?;
                self.backend.cp(source, destination)
            }
            CommandName::Md => {
                let [path] = self.arguments::<1>(command)?;
                self.backend.md(path)
            }
            CommandName::Mf => {
                let [path] = self.arguments::<1>(command)?;
                self.backend.mf(path)
            }
            CommandName::Mv => {
                let [source, destination] = self.arguments::<2>(command)?;
                self.backend.mv(source, destination)
            }
            CommandName::Rm => {
                let [path] = self.arguments::<1>(command)?;
                self.backend.rm(path)
            }
            CommandName::Unknown => {
                let message = format!("Unknown command is met: {}", command.raw);
                self.narrator.error(&message);
                return Err(RunError::CommandParsing {
                    command: command.raw.clone(),
                    message,
                });
            }
        };

        result.map_err(|source| RunError::Logic {
            command: command.raw.clone(),
            source,
        })
    }

    /// Checks that `command` carries exactly `N` arguments.
    fn arguments<'c, const N: usize>(
        &self,
        command: &'c Command,
    ) -> Result<[&'c str; N], RunError> {
        debug_assert_eq!(command.name.arity(), Some(N));

        let passed = command.arguments.len();
        if passed != N {
            let message = format!(
                "Command {} accepts {N} argument(-s) (the number of passed arguments is {passed}).",
                command.name
            );
            self.narrator
                .narrate(Level::Error, &message, Some(&command.raw));
            return Err(RunError::CommandArguments {
                command: command.raw.clone(),
                message,
            });
        }
        Ok(std::array::from_fn(|i| command.arguments[i].as_str()))
    }

    /// Runs every command from `reader`, stopping at the first failure.
    ///
    /// With `echo` set, each command is announced before it runs.
    pub fn run_reader<R: BufRead>(&mut self, reader: R, echo: bool) -> Result<(), RunError> {
        let result = self.run_commands(reader, echo);
        self.finish(&result);
        result
    }

    /// Runs a batch file. Commands are announced as they run.
    pub fn run_file(&mut self, path: &Path) -> Result<(), RunError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                let err = RunError::CannotOpenBatchFile {
                    path: path.to_path_buf(),
                    source,
                };
                self.narrator.error(&err.to_string());
                return Err(err);
            }
        };
        self.run_reader(BufReader::new(file), true)
    }

    /// Runs commands typed on standard input.
    pub fn run_stdin(&mut self) -> Result<(), RunError> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), false)
    }

    fn run_commands<R: BufRead>(&mut self, reader: R, echo: bool) -> Result<(), RunError> {
        for command in CommandParser::new(reader) {
            let command = match command {
                Ok(command) => command,
                Err(e) => {
                    self.narrator.error(&format!("cannot read commands: {e}"));
                    return Err(RunError::Input(e));
                }
            };

            if echo && command.name != CommandName::Unknown {
                self.narrator
                    .info(&format!("Executing command [{}] ...", command.raw));
            }
            self.execute(&command)?;
        }
        Ok(())
    }

    fn finish(&self, result: &Result<(), RunError>) {
        match result {
            Ok(()) => self.narrator.info("The run is over without error."),
            Err(_) => self.narrator.warning("The run is over with error."),
        }
        if self.options.print_tree {
            self.narrator
                .info(&format!("File tree:\n{}", self.backend.render_tree()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordingNarrator;
    use crate::vfs::MapFS;
    use std::io::Cursor;

    fn runner() -> (Runner<MapFS>, RecordingNarrator) {
        let narrator = RecordingNarrator::new();
        let runner = Runner::with_options(
            MapFS::with_narrator(narrator.clone()),
            narrator.clone(),
            RunOptions { print_tree: false },
        );
        (runner, narrator)
    }

    fn command(name: CommandName, args: &[&str]) -> Command {
        Command {
            name,
            arguments: args.iter().map(|a| a.to_string()).collect(),
            error: None,
            raw: format!("{name} {}", args.join(" ")),
        }
    }

    mod execute {
        use super::*;

        #[test]
        fn test_dispatches_each_command() {
            let (mut runner, _) = runner();

            runner.execute(&command(CommandName::Md, &["/a"])).unwrap();
            runner.execute(&command(CommandName::Mf, &["/a/f.txt"])).unwrap();
            runner.execute(&command(CommandName::Cp, &["/a", "/b"])).unwrap();
            runner.execute(&command(CommandName::Mv, &["/b", "/c"])).unwrap();
            runner.execute(&command(CommandName::Rm, &["/a"])).unwrap();

            let fs = runner.backend();
            assert!(!fs.exists("/a"));
            assert!(!fs.exists("/b"));
            assert!(fs.exists("/c/f.txt"));
        }

        #[test]
        fn test_wrong_arity() {
            let (mut runner, narrator) = runner();
            let err = runner
                .execute(&command(CommandName::Md, &["/a", "/b"]))
                .unwrap_err();

            assert_eq!(err.error_code(), ErrorCode::CommandArgumentsError);
            assert!(narrator.contains(
                Level::Error,
                "[md /a /b] Command md accepts 1 argument(-s) (the number of passed arguments is 2)."
            ));
            assert!(!runner.backend().exists("/a"));
        }

        #[test]
        fn test_parse_error_is_rejected() {
            let (mut runner, narrator) = runner();
            let mut cmd = command(CommandName::Cp, &["/a"]);
            cmd.error = Some("Closing quotes \" symbol is not found.".to_string());

            let err = runner.execute(&cmd).unwrap_err();
            assert_eq!(err.error_code(), ErrorCode::CommandParsingError);
            assert!(narrator.contains(Level::Error, "Closing quotes"));
        }

        #[test]
        fn test_unknown_command() {
            let (mut runner, narrator) = runner();
            let cmd = Command {
                name: CommandName::Unknown,
                arguments: Vec::new(),
                error: None,
                raw: "ls".to_string(),
            };
            assert_eq!(
                runner.execute(&cmd).unwrap_err().error_code(),
                ErrorCode::CommandParsingError
            );
            assert!(narrator.contains(Level::Error, "Unknown command is met: ls"));
        }

        #[test]
        fn test_logic_error() {
            let (mut runner, _) = runner();
            let err = runner
                .execute(&command(CommandName::Rm, &["/missing"]))
                .unwrap_err();
            assert_eq!(err.error_code(), ErrorCode::LogicError);
            assert!(matches!(
                err,
                RunError::Logic {
                    source: FsError::NoSuchNode { .. },
                    ..
                }
            ));
        }
    }

    mod run {
        use super::*;

        #[test]
        fn test_stops_at_first_failure() {
            let (mut runner, narrator) = runner();
            let input = "md /a\nmd /a\nmd /b\n";

            let err = runner.run_reader(Cursor::new(input), false).unwrap_err();

            assert_eq!(err.error_code(), ErrorCode::LogicError);
            assert!(runner.backend().exists("/a"));
            assert!(!runner.backend().exists("/b"));
            assert!(narrator.contains(Level::Warning, "The run is over with error."));
        }

        #[test]
        fn test_unknown_command_stops_run() {
            let (mut runner, narrator) = runner();
            let err = runner
                .run_reader(Cursor::new("md /a\nls /\nmd /b\n"), false)
                .unwrap_err();
            assert_eq!(err.error_code(), ErrorCode::CommandParsingError);
            assert!(narrator.contains(Level::Error, "Unknown command is met: ls"));
            assert!(!runner.backend().exists("/b"));
        }

        #[test]
        fn test_invalid_utf8_is_not_a_read_failure() {
            let (mut runner, _) = runner();
            let input: &[u8] = b"md /a\nmd /\xff\xfe\n";

            runner.run_reader(input, false).unwrap();

            assert!(runner.backend().is_dir("/\u{FFFD}\u{FFFD}").unwrap());
        }

        #[test]
        fn test_invalid_utf8_arguments_are_counted() {
            let (mut runner, _) = runner();
            let input: &[u8] = b"md /\xff /b\n";

            let err = runner.run_reader(input, false).unwrap_err();

            assert_eq!(err.error_code(), ErrorCode::CommandArgumentsError);
        }

        #[test]
        fn test_echo_announces_commands() {
            let (mut runner, narrator) = runner();
            runner.run_reader(Cursor::new("md /a\n"), true).unwrap();
            assert!(narrator.contains(Level::Info, "Executing command [md /a] ..."));
            assert!(narrator.contains(Level::Info, "The run is over without error."));
        }

        #[test]
        fn test_no_echo_for_stdin_style_input() {
            let (mut runner, narrator) = runner();
            runner.run_reader(Cursor::new("md /a\n"), false).unwrap();
            assert!(!narrator.contains(Level::Info, "Executing command"));
        }

        #[test]
        fn test_tree_is_printed_when_enabled() {
            let narrator = RecordingNarrator::new();
            let mut runner = Runner::new(MapFS::with_narrator(narrator.clone()), narrator.clone());
            runner.run_reader(Cursor::new("md /a\n"), false).unwrap();
            assert!(narrator.contains(Level::Info, "File tree:\n/  [D]\n|_a  [D]\n"));
        }

        #[test]
        fn test_tree_is_printed_after_failure() {
            let narrator = RecordingNarrator::new();
            let mut runner = Runner::new(MapFS::with_narrator(narrator.clone()), narrator.clone());
            assert!(runner.run_reader(Cursor::new("rm /\n"), false).is_err());
            assert!(narrator.contains(Level::Info, "File tree:\n/  [D]\n"));
        }

        #[test]
        fn test_missing_batch_file() {
            let (mut runner, narrator) = runner();
            let err = runner
                .run_file(Path::new("/definitely/not/here.batch"))
                .unwrap_err();
            assert_eq!(err.error_code(), ErrorCode::CannotOpenDataStream);
            assert_eq!(err.error_code().exit_code(), 1);
            assert!(narrator.contains(Level::Error, "cannot open the batch file"));
        }
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCode::NoError,
            ErrorCode::CannotOpenDataStream,
            ErrorCode::CommandParsingError,
            ErrorCode::CommandArgumentsError,
            ErrorCode::LogicError,
        ]
        .map(ErrorCode::exit_code);
        assert_eq!(codes, [0, 1, 2, 3, 4]);
    }
}
