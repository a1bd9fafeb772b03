//! Stdin commands standing in for map clicks and transport buttons.

use globetune_core::{Event, TransportCommand};
use std::time::Duration;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  region <key> [display name]   select a region (map click)
  track <index>                 load a track from the list
  playtrack <index>             load and play a track
  play | pause | toggle | stop  transport
  next | prev                   skip
  seek <secs>                   jump to a position
  ff | rew                      step forward / back
  search <text>                 filter the list (empty text clears)
  group <label|all>             region-group filter
  groups                        list region groups
  mapfail <reason>              simulate a map data failure
  help                          show this help
  quit                          exit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}' expects a number, got '{value}'")]
    InvalidNumber {
        command: &'static str,
        value: String,
    },
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forward to the session
    Event(Event),
    /// Print the catalog's region groups
    Groups,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

impl From<TransportCommand> for Input {
    fn from(command: TransportCommand) -> Self {
        Self::Event(Event::Transport(command))
    }
}

/// Parse one line of user input
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands, missing arguments and
/// malformed numbers.
pub fn parse_line(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let input = match command.to_ascii_lowercase().as_str() {
        "" => Input::Nothing,
        "region" => {
            let (key, display_name) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(key, name)| (key, name.trim()));
            if key.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "region",
                    argument: "a region key",
                });
            }
            Input::Event(Event::region_selected(key, display_name))
        }
        "track" => Input::Event(Event::TrackChosen {
            index: parse_index("track", rest)?,
        }),
        "playtrack" => Input::Event(Event::TrackPlayRequested {
            index: parse_index("playtrack", rest)?,
        }),
        "play" => TransportCommand::Play.into(),
        "pause" => TransportCommand::Pause.into(),
        "toggle" => TransportCommand::Toggle.into(),
        "stop" => TransportCommand::Stop.into(),
        "next" => TransportCommand::Next.into(),
        "prev" | "previous" => TransportCommand::Previous.into(),
        "seek" => TransportCommand::Seek(parse_seconds(rest)?).into(),
        "ff" => TransportCommand::SeekForward.into(),
        "rew" => TransportCommand::SeekBackward.into(),
        "search" => Input::Event(Event::SearchInput(rest.to_string())),
        "group" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "group",
                    argument: "a group label or 'all'",
                });
            }
            let group = (!rest.eq_ignore_ascii_case("all")).then(|| rest.to_string());
            Input::Event(Event::RegionGroupFilter(group))
        }
        "groups" => Input::Groups,
        "mapfail" => Input::Event(Event::MapDataFailed {
            reason: if rest.is_empty() {
                "map data unavailable".to_string()
            } else {
                rest.to_string()
            },
        }),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(input)
}

fn parse_index(command: &'static str, value: &str) -> Result<i64, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a track index",
        });
    }
    value.parse().map_err(|_| CommandError::InvalidNumber {
        command,
        value: value.to_string(),
    })
}

fn parse_seconds(value: &str) -> Result<Duration, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "seek",
            argument: "a position in seconds",
        });
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| CommandError::InvalidNumber {
            command: "seek",
            value: value.to_string(),
        })
}
