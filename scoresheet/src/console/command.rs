use handball_common::{
    event_kind::EventKind,
    team::{ParseTeamError, Team},
};
use std::str::FromStr;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  type <CODE>                  select the event type (GOAL, 7M, ASSIST, 2MIN, YELLOW, STEAL, BLOCK, TURNOVER)
  team <A|B>                   select the team
  add <number>                 record the selected event for a shirt number
  event <CODE> <A|B> <number>  record an event in one go
  timeout <A|B>                start a team timeout
  suspension [A|B]             toggle the two-minute suspension
  show                         print the clock and score
  roster <A|B>                 print a team's player table
  ratings                      print player ratings
  log                          print the event log as JSON
  help                         print this message
  quit                         close the match";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectKind(EventKind),
    SelectTeam(Team),
    Add(String),
    Event {
        kind: EventKind,
        team: Team,
        player_input: String,
    },
    Timeout(Team),
    Suspension(Option<Team>),
    Show,
    Roster(Team),
    Ratings,
    Log,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` got more arguments than it takes")]
    TooManyArguments(&'static str),
    #[error(transparent)]
    Team(#[from] ParseTeamError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "type" => {
                let [code] = exact::<1>(&args, "type", "an event code")?;
                Command::SelectKind(EventKind::from(code))
            }
            "team" => {
                let [team] = exact::<1>(&args, "team", "a team (A or B)")?;
                Command::SelectTeam(team.parse()?)
            }
            "add" => {
                let [number] = exact::<1>(&args, "add", "a player number")?;
                Command::Add(number.to_string())
            }
            "event" => {
                let [code, team, number] =
                    exact::<3>(&args, "event", "an event code, a team and a player number")?;
                Command::Event {
                    kind: EventKind::from(code),
                    team: team.parse()?,
                    player_input: number.to_string(),
                }
            }
            "timeout" => {
                let [team] = exact::<1>(&args, "timeout", "a team (A or B)")?;
                Command::Timeout(team.parse()?)
            }
            "suspension" => match args.as_slice() {
                [] => Command::Suspension(None),
                [team] => Command::Suspension(Some(team.parse()?)),
                _ => return Err(CommandError::TooManyArguments("suspension")),
            },
            "roster" => {
                let [team] = exact::<1>(&args, "roster", "a team (A or B)")?;
                Command::Roster(team.parse()?)
            }
            "show" => no_args(&args, "show", Command::Show)?,
            "ratings" => no_args(&args, "ratings", Command::Ratings)?,
            "log" => no_args(&args, "log", Command::Log)?,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };

        Ok(command)
    }
}

fn exact<'a, const N: usize>(
    args: &[&'a str],
    command: &'static str,
    argument: &'static str,
) -> Result<[&'a str; N], CommandError> {
    if args.len() > N {
        return Err(CommandError::TooManyArguments(command));
    }
    args.try_into()
        .map_err(|_| CommandError::MissingArgument { command, argument })
}

fn no_args(args: &[&str], command: &'static str, parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::TooManyArguments(command))
    }
}
