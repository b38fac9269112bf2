use crate::{
    bundles::TeamBundle, config::Match as MatchConfig, drawing_support::MAX_STRINGABLE_SECS,
    team::Team,
};
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MatchSnapshot {
    pub elapsed_secs: u32,
    pub period: MatchPeriod,
    pub match_time: String,
    pub suspension: Option<SuspensionSnapshot>,
    pub timeout: Option<TimeoutSnapshot>,
    pub timeouts_remaining: TeamBundle<u8>,
    pub timeout_displays: TeamBundle<String>,
    pub scores: TeamBundle<u16>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SuspensionSnapshot {
    pub team: Team,
    pub end_time: u32,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TimeoutSnapshot {
    pub team: Team,
    pub start_time: u32,
    pub end_time: u32,
    pub remaining_display: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RosterSnapshot {
    pub team: Team,
    pub players: Vec<PlayerRow>,
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PlayerRow {
    pub id: u32,
    pub name: String,
    pub number: u8,
    pub goals: u16,
    pub assists: u16,
    pub two_minutes: u8,
    pub yellow_cards: u8,
    pub red_card: bool,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize, Sequence)]
pub enum MatchPeriod {
    FirstHalf,
    SecondHalf,
    FirstExtraTime,
    SecondExtraTime,
}

impl MatchPeriod {
    /// The period is derived from the absolute elapsed time only.
    pub fn from_elapsed(elapsed_secs: u32, config: &MatchConfig) -> Self {
        if elapsed_secs < config.half_duration {
            Self::FirstHalf
        } else if elapsed_secs < config.regulation_duration {
            Self::SecondHalf
        } else if elapsed_secs < config.first_extra_time_end {
            Self::FirstExtraTime
        } else {
            Self::SecondExtraTime
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::FirstHalf => "1H",
            Self::SecondHalf => "2H",
            Self::FirstExtraTime => "ET1",
            Self::SecondExtraTime => "ET2",
        }
    }

    /// Label of the time marker that ends this period
    pub fn marker_label(self) -> &'static str {
        match self {
            Self::FirstHalf => "Half-time(30')",
            Self::SecondHalf => "End of 60'",
            Self::FirstExtraTime => "1st extra time",
            Self::SecondExtraTime => "2nd extra time",
        }
    }
}

impl core::fmt::Display for MatchPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            MatchPeriod::FirstHalf => write!(f, "First Half"),
            MatchPeriod::SecondHalf => write!(f, "Second Half"),
            MatchPeriod::FirstExtraTime => write!(f, "First Extra Time"),
            MatchPeriod::SecondExtraTime => write!(f, "Second Extra Time"),
        }
    }
}

/// `MM:SS` of the elapsed time within the current display block.
///
/// The block length applies to every period, including extra time.
pub fn match_time_string(elapsed_secs: u32, config: &MatchConfig) -> String {
    let block = config.display_block.max(1);
    let period_secs = (elapsed_secs % block).min(MAX_STRINGABLE_SECS);
    format!("{:02}:{:02}", period_secs / 60, period_secs % 60)
}

/// `M:SS` countdown, as shown next to a running timeout
pub fn countdown_string(remaining_secs: u32) -> String {
    format!("{}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_period_from_elapsed() {
        let config = MatchConfig::default();
        // (elapsed, period)
        let test_cases = vec![
            (0, MatchPeriod::FirstHalf),
            (1799, MatchPeriod::FirstHalf),
            (1800, MatchPeriod::SecondHalf),
            (3599, MatchPeriod::SecondHalf),
            (3600, MatchPeriod::FirstExtraTime),
            (3899, MatchPeriod::FirstExtraTime),
            (3900, MatchPeriod::SecondExtraTime),
            (100_000, MatchPeriod::SecondExtraTime),
        ];

        for (elapsed, period) in test_cases {
            assert_eq!(
                MatchPeriod::from_elapsed(elapsed, &config),
                period,
                "elapsed {elapsed}"
            );
        }
    }

    #[test]
    fn test_period_codes() {
        let codes: Vec<_> = enum_iterator::all::<MatchPeriod>()
            .map(MatchPeriod::code)
            .collect();
        assert_eq!(codes, vec!["1H", "2H", "ET1", "ET2"]);
    }

    #[test]
    fn test_match_time_string() {
        let config = MatchConfig::default();
        assert_eq!(match_time_string(0, &config), "00:00");
        assert_eq!(match_time_string(65, &config), "01:05");
        assert_eq!(match_time_string(1799, &config), "29:59");
        assert_eq!(match_time_string(1800, &config), "00:00");
        assert_eq!(match_time_string(1801, &config), "00:01");
        // Extra time wraps on the same block
        assert_eq!(match_time_string(3660, &config), "01:00");
        assert_eq!(match_time_string(3900, &config), "05:00");
    }

    #[test]
    fn test_countdown_string() {
        assert_eq!(countdown_string(60), "1:00");
        assert_eq!(countdown_string(59), "0:59");
        assert_eq!(countdown_string(5), "0:05");
        assert_eq!(countdown_string(0), "0:00");
    }
}
