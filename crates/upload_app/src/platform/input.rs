use thiserror::Error;
use upload_core::{Msg, SortField, SortOrder, TaskId};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Dispatch(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}, try `help`")]
    UnknownCommand(String),
    #[error("{command} expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{0:?} is not a valid number")]
    BadNumber(String),
    #[error("unknown sort field {0:?}")]
    BadSortField(String),
    #[error("sort order must be asc or desc, got {0:?}")]
    BadSortOrder(String),
}

pub const HELP: &str = "\
commands:
  connect | disconnect | refresh
  page <n> | size <n> | sort <name|size|updated|created> [asc|desc]
  select <id>... | check <id> | clear
  delete [<id>]          delete one task, or the selection when no id is given
  toggle <id>            pause or resume a locally held upload
  help | quit";

pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let input = match command.to_ascii_lowercase().as_str() {
        "connect" => Input::Dispatch(Msg::ConnectRequested),
        "disconnect" => Input::Dispatch(Msg::DisconnectRequested),
        "refresh" | "r" => Input::Dispatch(Msg::RefreshRequested),
        "page" => Input::Dispatch(Msg::PageChanged(single_number(&args, "page")?)),
        "size" => Input::Dispatch(Msg::PageSizeChanged(single_number(&args, "size")?)),
        "sort" => {
            let field = args.first().ok_or(InputError::MissingArgument {
                command: "sort",
                expected: "a field",
            })?;
            let order = match args.get(1) {
                Some(order) => parse_order(order)?,
                None => SortOrder::Desc,
            };
            Input::Dispatch(Msg::SortChanged {
                by: parse_field(field)?,
                order,
            })
        }
        "select" => Input::Dispatch(Msg::SelectionChanged(ids(&args)?)),
        "check" => Input::Dispatch(Msg::RowToggled(single_number(&args, "check")?)),
        "clear" => Input::Dispatch(Msg::SelectionChanged(Vec::new())),
        "delete" | "rm" => match args.as_slice() {
            [] => Input::Dispatch(Msg::DeleteSelectedRequested),
            [id] => Input::Dispatch(Msg::DeleteRequested(number(id)?)),
            _ => {
                return Err(InputError::MissingArgument {
                    command: "delete",
                    expected: "at most one id (use select + delete for batches)",
                })
            }
        },
        "toggle" | "t" => {
            Input::Dispatch(Msg::ToggleTaskRequested(single_number(&args, "toggle")?))
        }
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, InputError> {
    raw.parse()
        .map_err(|_| InputError::BadNumber(raw.to_string()))
}

fn single_number<T: std::str::FromStr>(
    args: &[&str],
    command: &'static str,
) -> Result<T, InputError> {
    match args {
        [raw] => number(raw),
        _ => Err(InputError::MissingArgument {
            command,
            expected: "one number",
        }),
    }
}

fn ids(args: &[&str]) -> Result<Vec<TaskId>, InputError> {
    args.iter().map(|raw| number(raw)).collect()
}

fn parse_field(raw: &str) -> Result<SortField, InputError> {
    match raw.to_ascii_lowercase().as_str() {
        "name" => Ok(SortField::Name),
        "size" => Ok(SortField::Size),
        "updated" | "updatedat" => Ok(SortField::UpdatedAt),
        "created" | "createdat" => Ok(SortField::CreatedAt),
        _ => Err(InputError::BadSortField(raw.to_string())),
    }
}

fn parse_order(raw: &str) -> Result<SortOrder, InputError> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        _ => Err(InputError::BadSortOrder(raw.to_string())),
    }
}
