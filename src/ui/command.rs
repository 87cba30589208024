use std::str::FromStr;
use thiserror::Error;

/// One line of user input, parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    // Navigation
    List,
    Enter(isize),
    Up,
    Pwd,

    // Selection
    Select(String),
    ShowSelection,
    ClearSelection,

    // File operations
    Copy(Option<String>),
    Move(Option<String>),
    Delete,
    Open(isize),

    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not an index")]
    BadIndex(String),
}

pub const HELP: &str = "\
commands:
  ls                 list the current directory
  cd <index>         enter a directory
  up                 go to the parent directory
  pwd                print the current directory
  select <i,j,...>   select entries of the last listing
  selection          show the selection
  clear              clear the selection
  copy [dest]        copy the selection to dest
  move [dest]        move the selection to dest
  delete             delete the selection
  open <index>       open a file with the default application
  help               this text
  quit               leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let rest = (!rest.is_empty()).then(|| rest.to_string());

        match word {
            "" => Err(CommandError::Empty),
            "ls" | "l" => Ok(Command::List),
            "cd" => index_argument("cd", rest).map(Command::Enter),
            "up" | ".." => Ok(Command::Up),
            "pwd" => Ok(Command::Pwd),
            "select" | "s" => rest
                .map(Command::Select)
                .ok_or(CommandError::MissingArgument("select")),
            "selection" => Ok(Command::ShowSelection),
            "clear" => Ok(Command::ClearSelection),
            "copy" | "cp" => Ok(Command::Copy(rest)),
            "move" | "mv" => Ok(Command::Move(rest)),
            "delete" | "rm" => Ok(Command::Delete),
            "open" => index_argument("open", rest).map(Command::Open),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn index_argument(command: &'static str, rest: Option<String>) -> Result<isize, CommandError> {
    let arg = rest.ok_or(CommandError::MissingArgument(command))?;
    arg.parse().map_err(|_| CommandError::BadIndex(arg))
}
