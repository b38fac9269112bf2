//! Player ratings built from weighted actions.
//!
//! Two ratings exist: a flat one computed from a player's totals, and an
//! event-weighted one where each action is scaled by how late in the match it
//! happened and how close the score was at the time.

use crate::{config::Match as MatchConfig, event_kind::EventKind, match_snapshot::PlayerRow};

pub const GOAL_WEIGHT: f64 = 1.0;
pub const ASSIST_WEIGHT: f64 = 0.6;
pub const STEAL_WEIGHT: f64 = 0.8;
pub const BLOCK_WEIGHT: f64 = 0.25;
pub const TURNOVER_WEIGHT: f64 = -0.6;
pub const SUSPENSION_WEIGHT: f64 = -0.8;

pub fn flat_rating(row: &PlayerRow) -> f64 {
    f64::from(row.goals) * GOAL_WEIGHT
        + f64::from(row.assists) * ASSIST_WEIGHT
        + f64::from(row.steals) * STEAL_WEIGHT
        + f64::from(row.blocks) * BLOCK_WEIGHT
        + f64::from(row.turnovers) * TURNOVER_WEIGHT
        + f64::from(row.two_minutes) * SUSPENSION_WEIGHT
}

pub fn event_weight(kind: &EventKind) -> f64 {
    match kind {
        EventKind::Goal | EventKind::SevenMeterGoal => GOAL_WEIGHT,
        EventKind::Assist => ASSIST_WEIGHT,
        EventKind::Steal => STEAL_WEIGHT,
        EventKind::Block => BLOCK_WEIGHT,
        EventKind::Turnover => TURNOVER_WEIGHT,
        EventKind::TwoMinutes => SUSPENSION_WEIGHT,
        EventKind::YellowCard | EventKind::Other(_) => 0.0,
    }
}

/// Grows linearly from 0.5 at kick-off to 1.5 at the end of regulation time
pub fn time_factor(elapsed_secs: u32, config: &MatchConfig) -> f64 {
    let duration = f64::from(config.regulation_duration.max(1));
    0.5 + f64::from(elapsed_secs) / duration
}

/// Peaks when the score is level and falls off as the margin grows
pub fn score_factor(goal_difference: i32) -> f64 {
    2.0 / (1.0 + f64::from(goal_difference.unsigned_abs()))
}

pub fn weighted_event_score(
    kind: &EventKind,
    elapsed_secs: u32,
    goal_difference: i32,
    config: &MatchConfig,
) -> f64 {
    event_weight(kind) * time_factor(elapsed_secs, config) * score_factor(goal_difference)
}
