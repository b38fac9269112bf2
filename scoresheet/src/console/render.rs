use crate::{config::MatchInfo, match_manager::PlayerRating};
use enum_iterator::all;
use handball_common::{
    match_snapshot::{MatchPeriod, MatchSnapshot, RosterSnapshot},
    stats_api::MatchSummary,
    team::Team,
};
use prettytable::{Cell, Row, Table, format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR};
use std::fmt::Write;

pub fn header(info: &MatchInfo) -> String {
    let mut out = format!("{} vs {}\n", info.home_name, info.away_name);
    let details: Vec<&str> = [
        info.match_number.as_str(),
        info.date.as_str(),
        info.city.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !details.is_empty() {
        out.push_str(&details.join(" | "));
        out.push('\n');
    }
    if !info.referees.is_empty() {
        let _ = writeln!(out, "Referees: {}", info.referees.join(", "));
    }
    out
}

/// One line summary of the clock, score and any running timeout or suspension
pub fn snapshot_line(snapshot: &MatchSnapshot, info: &MatchInfo) -> String {
    let mut line = format!(
        "[{} {}] {} {} - {} {} | Timeouts A: {} B: {}",
        snapshot.match_time,
        snapshot.period.code(),
        info.home_name,
        snapshot.scores.a,
        snapshot.scores.b,
        info.away_name,
        snapshot.timeouts_remaining.a,
        snapshot.timeouts_remaining.b,
    );
    if let Some(timeout) = &snapshot.timeout {
        let _ = write!(
            line,
            " | Timeout {} {}",
            timeout.team, timeout.remaining_display
        );
    }
    if let Some(suspension) = &snapshot.suspension {
        let _ = write!(
            line,
            " | 2' suspension {} until {}s",
            suspension.team, suspension.end_time
        );
    }
    line
}

/// Period end markers, with the one ending the current period highlighted
pub fn time_markers(period: MatchPeriod) -> String {
    all::<MatchPeriod>()
        .map(|p| {
            let mark = if p == period { "x" } else { " " };
            format!("[{mark}] {}", p.marker_label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn roster_table(roster: &RosterSnapshot, team_name: &str) -> String {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        ["#", "Name", "G", "A", "2'", "Y", "R", "ST", "BL", "TO"]
            .into_iter()
            .map(Cell::new)
            .collect(),
    ));
    for player in &roster.players {
        table.add_row(Row::new(vec![
            Cell::new(&player.number.to_string()),
            Cell::new(&player.name),
            Cell::new(&player.goals.to_string()),
            Cell::new(&player.assists.to_string()),
            Cell::new(&player.two_minutes.to_string()),
            Cell::new(&player.yellow_cards.to_string()),
            Cell::new(if player.red_card { "R" } else { "" }),
            Cell::new(&player.steals.to_string()),
            Cell::new(&player.blocks.to_string()),
            Cell::new(&player.turnovers.to_string()),
        ]));
    }
    format!("Team {} ({team_name})\n{table}", roster.team)
}

pub fn ratings_table(team: Team, team_name: &str, total: f64, ratings: &[PlayerRating]) -> String {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("#"),
        Cell::new("Name"),
        Cell::new("Flat"),
        Cell::new("Weighted"),
    ]));
    for rating in ratings {
        table.add_row(Row::new(vec![
            Cell::new(&rating.number.to_string()),
            Cell::new(&rating.name),
            Cell::new(&format!("{:.2}", rating.flat)),
            Cell::new(&format!("{:.2}", rating.weighted)),
        ]));
    }
    format!("Team {team} ({team_name}) rating {total:.2}\n{table}")
}

pub fn match_card(summary: &MatchSummary) -> String {
    let mut card = format!(
        "#{} {}\n  {}  {}  {}\n  {}\n",
        summary.id,
        summary.teams_display(),
        summary.score_display(),
        summary.time_display(),
        summary.status,
        summary.date_display(),
    );
    let _ = writeln!(card, "  {} referees assigned", summary.referees.len());
    let _ = writeln!(card, "  {} events recorded", summary.events.len());
    card
}

pub fn dashboard(matches: &[MatchSummary]) -> String {
    if matches.is_empty() {
        return "No matches found\n".to_string();
    }
    matches.iter().map(match_card).collect::<Vec<_>>().join("\n")
}
