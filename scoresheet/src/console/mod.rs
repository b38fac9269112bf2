use crate::{
    config::MatchInfo,
    match_manager::{MatchManagerError, SuspensionState},
    session::MatchSession,
};
use handball_common::{event_kind::EventKind, match_snapshot::MatchSnapshot, team::Team};
use log::*;
use std::io::{self, Write};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    select,
};

pub mod command;
use command::{Command, HELP_TEXT};

mod entry;
pub use entry::EventEntry;

pub mod render;

/// Reads commands from `input` until `quit` or end of input, printing results
/// and clock transitions to `out`. The session is closed on return.
pub async fn run_live<R, W>(
    session: MatchSession,
    info: &MatchInfo,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut rx = session.subscribe();
    let mut last = rx.borrow_and_update().clone();
    let mut entry = EventEntry::default();

    write!(out, "{}", render::header(info))?;
    writeln!(out, "{}", render::snapshot_line(&last, info))?;
    writeln!(out, "Type `help` for a list of commands")?;
    out.flush()?;

    loop {
        select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&session, &mut entry, info, command, out)?,
                    Err(e) => writeln!(out, "{e}")?,
                }
                out.flush()?;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                for message in transitions(&last, &snapshot) {
                    writeln!(out, "{message}")?;
                }
                out.flush()?;
                last = snapshot;
            }
        }
    }

    session.close();
    Ok(())
}

fn execute<W: Write>(
    session: &MatchSession,
    entry: &mut EventEntry,
    info: &MatchInfo,
    command: Command,
    out: &mut W,
) -> io::Result<()> {
    match command {
        Command::SelectKind(kind) => {
            writeln!(out, "Event type: {} ({kind})", kind.description())?;
            entry.kind = kind;
        }
        Command::SelectTeam(team) => {
            writeln!(out, "Team: {team} ({})", info.team_name(team))?;
            entry.team = team;
        }
        Command::Add(player_input) => {
            entry.player_input = player_input;
            let (kind, team, number) = (
                entry.kind.clone(),
                entry.team,
                entry.player_input.trim().to_string(),
            );
            let result = session.with_manager(|mm| entry.submit(mm));
            report_event(out, &kind, team, &number, result)?;
        }
        Command::Event {
            kind,
            team,
            player_input,
        } => {
            let result = session.with_manager(|mm| mm.record_event(&kind, team, &player_input));
            report_event(out, &kind, team, player_input.trim(), result)?;
        }
        Command::Timeout(team) => match session.with_manager(|mm| mm.start_timeout(team)) {
            Ok(notice) => writeln!(out, "{notice}")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::Suspension(team) => {
            let team = team.unwrap_or(entry.team);
            match session.with_manager(|mm| mm.toggle_suspension(team)) {
                SuspensionState::Active { team, end_time } => {
                    writeln!(out, "2' suspension started for Team {team}, ends at {end_time}s")?
                }
                SuspensionState::None => writeln!(out, "2' suspension cleared")?,
            }
        }
        Command::Show => {
            let snapshot = session.snapshot();
            writeln!(out, "{}", render::snapshot_line(&snapshot, info))?;
            writeln!(out, "{}", render::time_markers(snapshot.period))?;
        }
        Command::Roster(team) => {
            let roster = session.inspect(|mm| mm.roster_snapshot(team));
            write!(out, "{}", render::roster_table(&roster, info.team_name(team)))?;
        }
        Command::Ratings => {
            for team in [Team::A, Team::B] {
                let (total, ratings) =
                    session.inspect(|mm| (mm.team_rating(team), mm.player_ratings(team)));
                write!(
                    out,
                    "{}",
                    render::ratings_table(team, info.team_name(team), total, &ratings)
                )?;
            }
        }
        Command::Log => match session.inspect(|mm| mm.event_log_json()) {
            Ok(json) => writeln!(out, "{json}")?,
            Err(e) => {
                error!("Failed to export the event log: {e}");
                writeln!(out, "Failed to export the event log: {e}")?;
            }
        },
        Command::Help => writeln!(out, "{HELP_TEXT}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn report_event<W: Write, N: core::fmt::Display>(
    out: &mut W,
    kind: &EventKind,
    team: Team,
    number: &str,
    result: Result<Option<N>, MatchManagerError>,
) -> io::Result<()> {
    match result {
        Ok(notice) => {
            if let EventKind::Other(code) = kind {
                writeln!(out, "Unknown event type {code}, nothing recorded")?;
            } else {
                writeln!(out, "{} for Team {team} #{number}", kind.description())?;
            }
            if let Some(notice) = notice {
                writeln!(out, "{notice}")?;
            }
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

/// Messages for clock driven changes between two snapshots
pub fn transitions(prev: &MatchSnapshot, next: &MatchSnapshot) -> Vec<String> {
    let mut messages = Vec::new();
    if next.period != prev.period {
        messages.push(format!(
            "{} reached, now in the {}",
            prev.period.marker_label(),
            next.period
        ));
    }
    if let (Some(timeout), None) = (&prev.timeout, &next.timeout) {
        messages.push(format!("Team {} timeout is over", timeout.team));
    }
    if let (Some(suspension), None) = (&prev.suspension, &next.suspension) {
        messages.push(format!("Team {} 2' suspension is over", suspension.team));
    }
    messages
}
