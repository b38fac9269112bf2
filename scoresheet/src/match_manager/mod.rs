use handball_common::{
    bundles::TeamBundle,
    config::Match as MatchConfig,
    drawing_support::{MAX_SHIRT_NUMBER, MIN_SHIRT_NUMBER},
    event_kind::EventKind,
    match_snapshot::{
        MatchPeriod, MatchSnapshot, RosterSnapshot, SuspensionSnapshot, TimeoutSnapshot,
        countdown_string, match_time_string,
    },
    rating::flat_rating,
    team::Team,
};
use derivative::Derivative;
use log::*;
use thiserror::Error;

pub mod roster;
use roster::*;

mod match_stats;
use match_stats::*;

#[derive(Derivative)]
#[derivative(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionState {
    #[derivative(Default)]
    None,
    Active { team: Team, end_time: u32 },
}

impl SuspensionState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

#[derive(Derivative)]
#[derivative(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutState {
    #[derivative(Default)]
    None,
    Team {
        team: Team,
        start_time: u32,
        end_time: u32,
    },
}

impl TimeoutState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Team { .. })
    }
}

/// Everything the once-per-second tick touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub elapsed_secs: u32,
    pub period: MatchPeriod,
    pub suspension: SuspensionState,
    pub timeout: TimeoutState,
    pub timeouts_remaining: TeamBundle<u8>,
}

impl ClockState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            elapsed_secs: 0,
            period: MatchPeriod::from_elapsed(0, config),
            suspension: Default::default(),
            timeout: Default::default(),
            timeouts_remaining: TeamBundle::splat(config.timeouts_per_match),
        }
    }
}

/// Moves the clock to `now` elapsed seconds, deriving the period and expiring
/// any suspension or timeout whose end time has been reached.
pub fn advance(state: &ClockState, now: u32, config: &MatchConfig) -> ClockState {
    let suspension = match state.suspension {
        SuspensionState::Active { end_time, .. } if now >= end_time => SuspensionState::None,
        s => s,
    };
    let timeout = match state.timeout {
        TimeoutState::Team { end_time, .. } if now >= end_time => TimeoutState::None,
        t => t,
    };

    ClockState {
        elapsed_secs: now,
        period: MatchPeriod::from_elapsed(now, config),
        suspension,
        timeout,
        timeouts_remaining: state.timeouts_remaining,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRating {
    pub number: u8,
    pub name: String,
    pub flat: f64,
    pub weighted: f64,
}

#[derive(Debug)]
pub struct MatchManager {
    config: MatchConfig,
    clock: ClockState,
    timeout_displays: TeamBundle<String>,
    rosters: TeamBundle<Roster>,
    stats: MatchStats,
}

impl MatchManager {
    pub fn new(config: MatchConfig, rosters: TeamBundle<Roster>) -> Self {
        Self {
            clock: ClockState::new(&config),
            config,
            timeout_displays: Default::default(),
            rosters,
            stats: MatchStats::new(),
        }
    }

    pub fn with_default_rosters(config: MatchConfig) -> Self {
        Self::new(
            config,
            TeamBundle::new(Roster::default_for(Team::A), Roster::default_for(Team::B)),
        )
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs
    }

    pub fn current_period(&self) -> MatchPeriod {
        self.clock.period
    }

    pub fn roster(&self, team: Team) -> &Roster {
        &self.rosters[team]
    }

    pub fn timeouts_remaining(&self) -> TeamBundle<u8> {
        self.clock.timeouts_remaining
    }

    pub fn scores(&self) -> TeamBundle<u16> {
        TeamBundle::new(self.rosters.a.goals(), self.rosters.b.goals())
    }

    pub fn match_time(&self) -> String {
        match_time_string(self.clock.elapsed_secs, &self.config)
    }

    /// One second of match time
    pub fn tick(&mut self) {
        let now = self.clock.elapsed_secs.saturating_add(1);
        self.advance_to(now);
    }

    pub fn advance_to(&mut self, now: u32) {
        let next = advance(&self.clock, now, &self.config);
        trace!("{} Tick to {now}", self.status_string());

        if next.period != self.clock.period {
            info!("Period changed to {} at {now}s", next.period);
        }
        if let SuspensionState::Active { team, .. } = self.clock.suspension {
            if !next.suspension.is_active() {
                info!("Team {team} suspension expired at {now}s");
            }
        }
        if let TimeoutState::Team { team, .. } = self.clock.timeout {
            if !next.timeout.is_active() {
                info!("Team {team} timeout ended at {now}s");
                self.timeout_displays = Default::default();
            }
        }

        self.clock = next;
    }

    /// Recomputes the countdown shown next to the team that called the active timeout
    pub fn refresh_timeout_display(&mut self) {
        match self.clock.timeout {
            TimeoutState::Team { team, end_time, .. } => {
                let remaining = end_time.saturating_sub(self.clock.elapsed_secs);
                self.timeout_displays[team] = countdown_string(remaining);
            }
            TimeoutState::None => self.timeout_displays = Default::default(),
        }
    }

    pub fn timeout_displays(&self) -> &TeamBundle<String> {
        &self.timeout_displays
    }

    /// Returns `Ok` if timeout can be started, otherwise returns `Err` describing why not
    pub fn can_start_timeout(&self, team: Team) -> Result<()> {
        if self.clock.timeouts_remaining[team] == 0 {
            return Err(MatchManagerError::NoTimeoutsRemaining(team));
        }
        if let TimeoutState::Team { team: active, .. } = self.clock.timeout {
            return Err(MatchManagerError::TimeoutAlreadyActive(active));
        }
        Ok(())
    }

    pub fn start_timeout(&mut self, team: Team) -> Result<Notice> {
        if let Err(e) = self.can_start_timeout(team) {
            warn!("{} Timeout for team {team} rejected: {e}", self.status_string());
            return Err(e);
        }

        let now = self.clock.elapsed_secs;
        self.clock.timeouts_remaining[team] -= 1;
        self.clock.timeout = TimeoutState::Team {
            team,
            start_time: now,
            end_time: now.saturating_add(self.config.timeout_duration),
        };
        self.stats.add_timeout(team, now, self.clock.period);
        info!(
            "{} Team {team} timeout started, remaining: {}",
            self.status_string(),
            self.clock.timeouts_remaining
        );

        Ok(Notice::TimeoutCalled {
            team,
            duration: self.config.timeout_duration,
            remaining: self.clock.timeouts_remaining[team],
        })
    }

    /// Switches the match-wide suspension on for `team`, or off if one is
    /// already running. This flag is not linked to any player's counters.
    pub fn toggle_suspension(&mut self, team: Team) -> SuspensionState {
        let now = self.clock.elapsed_secs;
        self.clock.suspension = match self.clock.suspension {
            SuspensionState::None => {
                let end_time = now.saturating_add(self.config.suspension_duration);
                info!(
                    "{} Team {team} suspension started, ends at {end_time}s",
                    self.status_string()
                );
                self.stats
                    .add_suspension_toggle(team, true, now, self.clock.period);
                SuspensionState::Active { team, end_time }
            }
            SuspensionState::Active { team: active, .. } => {
                info!(
                    "{} Team {active} suspension cleared manually",
                    self.status_string()
                );
                self.stats
                    .add_suspension_toggle(active, false, now, self.clock.period);
                SuspensionState::None
            }
        };
        self.clock.suspension
    }

    /// Validates and applies a single event to one player.
    ///
    /// `player_input` is the raw text entered for the shirt number.
    pub fn record_event(
        &mut self,
        kind: &EventKind,
        team: Team,
        player_input: &str,
    ) -> Result<Option<Notice>> {
        let result = self.try_record_event(kind, team, player_input);
        match &result {
            Ok(Some(notice)) => info!("{} {notice}", self.status_string()),
            Ok(None) => {}
            Err(e) => warn!("{} Event {kind} rejected: {e}", self.status_string()),
        }
        result
    }

    fn try_record_event(
        &mut self,
        kind: &EventKind,
        team: Team,
        player_input: &str,
    ) -> Result<Option<Notice>> {
        let number = parse_player_number(player_input)?;

        let index = self.rosters[team]
            .find_index(number)
            .ok_or(MatchManagerError::PlayerNotFound(number, team))?;

        // Goal difference from this team's point of view, before the event lands
        let scores = self.scores();
        let goal_difference = i32::from(scores[team]) - i32::from(scores[team.other()]);

        let now = self.clock.elapsed_secs;
        let period = self.clock.period;
        let status = self.status_string();

        let player = self.rosters[team]
            .player_mut(index)
            .ok_or(MatchManagerError::PlayerNotFound(number, team))?;

        if player.has_red_card() {
            return Err(MatchManagerError::PlayerHasRedCard {
                name: player.name().to_string(),
                number,
            });
        }

        let (changed, notice) = player.apply(kind);
        if changed {
            info!("{status} {kind} for team {team} player #{number}");
            self.stats
                .add_player_event(kind.clone(), team, number, now, period, goal_difference);
        } else {
            debug!("{status} {kind} for team {team} player #{number} changed nothing");
        }

        Ok(notice)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            elapsed_secs: self.clock.elapsed_secs,
            period: self.clock.period,
            match_time: self.match_time(),
            suspension: match self.clock.suspension {
                SuspensionState::Active { team, end_time } => {
                    Some(SuspensionSnapshot { team, end_time })
                }
                SuspensionState::None => None,
            },
            timeout: match self.clock.timeout {
                TimeoutState::Team {
                    team,
                    start_time,
                    end_time,
                } => Some(TimeoutSnapshot {
                    team,
                    start_time,
                    end_time,
                    remaining_display: self.timeout_displays[team].clone(),
                }),
                TimeoutState::None => None,
            },
            timeouts_remaining: self.clock.timeouts_remaining,
            timeout_displays: self.timeout_displays.clone(),
            scores: self.scores(),
        }
    }

    pub fn roster_snapshot(&self, team: Team) -> RosterSnapshot {
        self.rosters[team].as_snapshot()
    }

    pub fn player_ratings(&self, team: Team) -> Vec<PlayerRating> {
        self.rosters[team]
            .players()
            .iter()
            .map(|p| PlayerRating {
                number: p.number(),
                name: p.name().to_string(),
                flat: flat_rating(&p.as_row()),
                weighted: self.stats.weighted_rating(team, p.number(), &self.config),
            })
            .collect()
    }

    pub fn team_rating(&self, team: Team) -> f64 {
        self.player_ratings(team).iter().map(|r| r.flat).sum()
    }

    pub fn event_log_len(&self) -> usize {
        self.stats.len()
    }

    pub fn event_log_json(&self) -> serde_json::Result<String> {
        self.stats.as_json()
    }

    fn status_string(&self) -> String {
        format!("[{} {}]", self.match_time(), self.clock.period.code())
    }
}

/// Reads an optional sign and the leading run of digits, ignoring anything after
fn parse_player_number(input: &str) -> Result<u8> {
    let invalid = || MatchManagerError::InvalidPlayerNumber(input.to_string());
    let trimmed = input.trim();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if trimmed.len() - unsigned.len() > 1 {
        return Err(invalid());
    }
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let number_end = trimmed.len() - unsigned.len() + digits_end;
    let number: i64 = trimmed[..number_end].parse().map_err(|_| invalid())?;
    let number = u8::try_from(number).map_err(|_| invalid())?;
    if (MIN_SHIRT_NUMBER..=MAX_SHIRT_NUMBER).contains(&number) {
        Ok(number)
    } else {
        Err(invalid())
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum MatchManagerError {
    #[error("Please enter a valid player number ({min}-{max}), got {0:?}", min = MIN_SHIRT_NUMBER, max = MAX_SHIRT_NUMBER)]
    InvalidPlayerNumber(String),
    #[error("Player {0} not found in Team {1}")]
    PlayerNotFound(u8, Team),
    #[error("Player {name} ({number}) already has a red card and cannot participate!")]
    PlayerHasRedCard { name: String, number: u8 },
    #[error("Team {0} has no timeouts remaining!")]
    NoTimeoutsRemaining(Team),
    #[error("A timeout is already active (Team {0})!")]
    TimeoutAlreadyActive(Team),
}

pub type Result<T> = std::result::Result<T, MatchManagerError>;

#[cfg(test)]
pub(crate) mod test {
    use super::MatchManagerError as MMErr;
    use super::*;
    use handball_common::match_snapshot::PlayerRow;
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn initialize() {
        INIT.call_once(|| {
            env_logger::init();
        });
    }

    fn new_manager() -> MatchManager {
        MatchManager::with_default_rosters(MatchConfig::default())
    }

    fn row(mm: &MatchManager, team: Team, number: u8) -> PlayerRow {
        let roster = mm.roster(team);
        roster
            .player(roster.find_index(number).unwrap())
            .unwrap()
            .as_row()
    }

    #[test]
    fn test_initial_state() {
        initialize();
        let mm = new_manager();
        let snapshot = mm.snapshot();
        assert_eq!(snapshot.elapsed_secs, 0);
        assert_eq!(snapshot.period, MatchPeriod::FirstHalf);
        assert_eq!(snapshot.match_time, "00:00");
        assert_eq!(snapshot.suspension, None);
        assert_eq!(snapshot.timeout, None);
        assert_eq!(snapshot.timeouts_remaining, TeamBundle::new(3, 3));
        assert_eq!(snapshot.timeout_displays, TeamBundle::default());
        assert_eq!(snapshot.scores, TeamBundle::new(0, 0));
        assert_eq!(mm.roster_snapshot(Team::A).players.len(), 16);
    }

    #[test]
    fn test_advance_is_pure() {
        initialize();
        let config = MatchConfig::default();
        let state = ClockState {
            elapsed_secs: 10,
            period: MatchPeriod::FirstHalf,
            suspension: SuspensionState::Active {
                team: Team::B,
                end_time: 130,
            },
            timeout: TimeoutState::Team {
                team: Team::A,
                start_time: 10,
                end_time: 70,
            },
            timeouts_remaining: TeamBundle::new(2, 3),
        };

        let next = advance(&state, 69, &config);
        assert_eq!(next.elapsed_secs, 69);
        assert!(next.timeout.is_active());
        assert!(next.suspension.is_active());
        // The input is untouched
        assert_eq!(state.elapsed_secs, 10);

        let next = advance(&state, 70, &config);
        assert_eq!(next.timeout, TimeoutState::None);
        assert!(next.suspension.is_active());
        assert_eq!(next.timeouts_remaining, TeamBundle::new(2, 3));

        let next = advance(&state, 1800, &config);
        assert_eq!(next.period, MatchPeriod::SecondHalf);
        assert_eq!(next.suspension, SuspensionState::None);
        assert_eq!(next.timeout, TimeoutState::None);
    }

    #[test]
    fn test_tick_period_boundaries() {
        initialize();
        let mut mm = new_manager();
        // (elapsed to advance to before the tick, period after the tick)
        let test_cases = vec![
            (0, MatchPeriod::FirstHalf),
            (1798, MatchPeriod::FirstHalf),
            (1799, MatchPeriod::SecondHalf),
            (3598, MatchPeriod::SecondHalf),
            (3599, MatchPeriod::FirstExtraTime),
            (3898, MatchPeriod::FirstExtraTime),
            (3899, MatchPeriod::SecondExtraTime),
            (5000, MatchPeriod::SecondExtraTime),
        ];

        for (before, period) in test_cases {
            mm.advance_to(before);
            mm.tick();
            assert_eq!(mm.elapsed_secs(), before + 1);
            assert_eq!(mm.current_period(), period, "after tick from {before}");
        }
    }

    #[test]
    fn test_match_time_wraps_each_block() {
        initialize();
        let mut mm = new_manager();
        mm.advance_to(1799);
        assert_eq!(mm.match_time(), "29:59");
        mm.tick();
        assert_eq!(mm.match_time(), "00:00");
        mm.advance_to(3725);
        assert_eq!(mm.match_time(), "02:05");
    }

    #[test]
    fn test_three_goals_for_a7() {
        initialize();
        let mut mm = new_manager();
        let before = row(&mm, Team::A, 7);
        for _ in 0..3 {
            assert_eq!(mm.record_event(&EventKind::Goal, Team::A, "7"), Ok(None));
        }
        assert_eq!(
            row(&mm, Team::A, 7),
            PlayerRow {
                goals: 3,
                ..before
            }
        );
        assert_eq!(mm.scores(), TeamBundle::new(3, 0));
        assert_eq!(mm.event_log_len(), 3);
    }

    #[test]
    fn test_seven_meter_counts_as_goal() {
        initialize();
        let mut mm = new_manager();
        assert_eq!(
            mm.record_event(&EventKind::SevenMeterGoal, Team::B, "12"),
            Ok(None)
        );
        assert_eq!(row(&mm, Team::B, 12).goals, 1);
    }

    #[test]
    fn test_three_suspensions_red_card() {
        initialize();
        let mut mm = new_manager();
        assert_eq!(mm.record_event(&EventKind::TwoMinutes, Team::B, "1"), Ok(None));
        assert_eq!(mm.record_event(&EventKind::TwoMinutes, Team::B, "1"), Ok(None));
        assert_eq!(
            mm.record_event(&EventKind::TwoMinutes, Team::B, "1"),
            Ok(Some(Notice::RedCardForSuspensions {
                name: "Player B1".to_string(),
                number: 1
            }))
        );

        let player = row(&mm, Team::B, 1);
        assert_eq!(player.two_minutes, 3);
        assert!(player.red_card);

        assert_eq!(
            mm.record_event(&EventKind::Goal, Team::B, "1"),
            Err(MMErr::PlayerHasRedCard {
                name: "Player B1".to_string(),
                number: 1
            })
        );
        assert_eq!(row(&mm, Team::B, 1), player);
        assert_eq!(row(&mm, Team::B, 1).goals, 0);
    }

    #[test]
    fn test_red_card_blocks_every_kind() {
        initialize();
        let mut mm = new_manager();
        for _ in 0..3 {
            mm.record_event(&EventKind::TwoMinutes, Team::A, "9").unwrap();
        }
        let frozen = row(&mm, Team::A, 9);
        let log_len = mm.event_log_len();

        for kind in EventKind::KNOWN {
            assert!(matches!(
                mm.record_event(&kind, Team::A, "9"),
                Err(MMErr::PlayerHasRedCard { .. })
            ));
        }
        assert!(matches!(
            mm.record_event(&EventKind::Other("FOUL".to_string()), Team::A, "9"),
            Err(MMErr::PlayerHasRedCard { .. })
        ));
        assert_eq!(row(&mm, Team::A, 9), frozen);
        assert_eq!(mm.event_log_len(), log_len);
    }

    #[test]
    fn test_second_yellow_notice_no_red_card() {
        initialize();
        let mut mm = new_manager();
        assert_eq!(mm.record_event(&EventKind::YellowCard, Team::A, "11"), Ok(None));
        assert_eq!(
            mm.record_event(&EventKind::YellowCard, Team::A, "11"),
            Ok(Some(Notice::SecondYellowCard {
                name: "Player A3".to_string(),
                number: 11
            }))
        );
        assert_eq!(mm.record_event(&EventKind::YellowCard, Team::A, "11"), Ok(None));
        let player = row(&mm, Team::A, 11);
        assert_eq!(player.yellow_cards, 2);
        assert!(!player.red_card);
        // The third yellow is not logged since it changed nothing
        assert_eq!(mm.event_log_len(), 2);
    }

    #[test]
    fn test_invalid_player_numbers() {
        initialize();
        let mut mm = new_manager();
        let before = mm.roster_snapshot(Team::A);
        for input in ["", "abc", "0", "100", "-7", "--7", "+", ".5", "256", "99999999999999999999"] {
            assert_eq!(
                mm.record_event(&EventKind::Goal, Team::A, input),
                Err(MMErr::InvalidPlayerNumber(input.to_string())),
                "input {input:?}"
            );
        }
        assert_eq!(mm.roster_snapshot(Team::A), before);
        assert_eq!(mm.event_log_len(), 0);

        assert_eq!(mm.record_event(&EventKind::Goal, Team::A, " 7 "), Ok(None));
    }

    #[test]
    fn test_player_number_leading_digits() {
        initialize();
        let mut mm = new_manager();
        // Anything after the leading digits is ignored
        for input in ["7.5", "+7", "7abc", " 07 "] {
            assert_eq!(
                mm.record_event(&EventKind::Goal, Team::A, input),
                Ok(None),
                "input {input:?}"
            );
        }
        assert_eq!(row(&mm, Team::A, 7).goals, 4);
        assert_eq!(mm.scores(), TeamBundle::new(4, 0));

        assert_eq!(
            mm.record_event(&EventKind::Goal, Team::A, "99.9"),
            Err(MMErr::PlayerNotFound(99, Team::A))
        );
        assert_eq!(
            mm.record_event(&EventKind::Goal, Team::A, "100.0"),
            Err(MMErr::InvalidPlayerNumber("100.0".to_string()))
        );
    }

    #[test]
    fn test_player_not_found() {
        initialize();
        let mut mm = new_manager();
        // Team A has no #1, team B has no #99
        assert_eq!(
            mm.record_event(&EventKind::Goal, Team::A, "1"),
            Err(MMErr::PlayerNotFound(1, Team::A))
        );
        assert_eq!(
            mm.record_event(&EventKind::Goal, Team::B, "99"),
            Err(MMErr::PlayerNotFound(99, Team::B))
        );
        assert_eq!(mm.scores(), TeamBundle::new(0, 0));
    }

    #[test]
    fn test_unknown_kind_is_noop() {
        initialize();
        let mut mm = new_manager();
        let before = mm.roster_snapshot(Team::B);
        assert_eq!(
            mm.record_event(&EventKind::Other("FOUL".to_string()), Team::B, "4"),
            Ok(None)
        );
        assert_eq!(mm.roster_snapshot(Team::B), before);
        assert_eq!(mm.event_log_len(), 0);
    }

    #[test]
    fn test_timeout_lifecycle() {
        initialize();
        let mut mm = new_manager();
        mm.advance_to(100);

        assert_eq!(
            mm.start_timeout(Team::A),
            Ok(Notice::TimeoutCalled {
                team: Team::A,
                duration: 60,
                remaining: 2
            })
        );
        assert_eq!(mm.timeouts_remaining(), TeamBundle::new(2, 3));
        assert_eq!(
            mm.clock().timeout,
            TimeoutState::Team {
                team: Team::A,
                start_time: 100,
                end_time: 160
            }
        );

        mm.refresh_timeout_display();
        assert_eq!(mm.timeout_displays(), &TeamBundle::new("1:00".to_string(), String::new()));

        mm.advance_to(159);
        mm.refresh_timeout_display();
        assert_eq!(mm.timeout_displays().a, "0:01");
        let snapshot = mm.snapshot();
        assert_eq!(
            snapshot.timeout,
            Some(TimeoutSnapshot {
                team: Team::A,
                start_time: 100,
                end_time: 160,
                remaining_display: "0:01".to_string()
            })
        );

        mm.tick();
        assert_eq!(mm.elapsed_secs(), 160);
        assert_eq!(mm.clock().timeout, TimeoutState::None);
        assert_eq!(mm.timeout_displays(), &TeamBundle::default());
        assert_eq!(mm.snapshot().timeout, None);
        assert_eq!(mm.timeouts_remaining(), TeamBundle::new(2, 3));
    }

    #[test]
    fn test_timeout_rejections_leave_state() {
        initialize();
        let mut mm = new_manager();
        mm.start_timeout(Team::A).unwrap();
        let clock = mm.clock().clone();

        assert_eq!(
            mm.start_timeout(Team::B),
            Err(MMErr::TimeoutAlreadyActive(Team::A))
        );
        assert_eq!(
            mm.start_timeout(Team::A),
            Err(MMErr::TimeoutAlreadyActive(Team::A))
        );
        assert_eq!(mm.clock(), &clock);

        mm.advance_to(60);
        mm.start_timeout(Team::A).unwrap();
        mm.advance_to(120);
        mm.start_timeout(Team::A).unwrap();
        mm.advance_to(180);
        assert_eq!(mm.timeouts_remaining(), TeamBundle::new(0, 3));

        let clock = mm.clock().clone();
        assert_eq!(
            mm.start_timeout(Team::A),
            Err(MMErr::NoTimeoutsRemaining(Team::A))
        );
        assert_eq!(mm.clock(), &clock);

        // The other team still has all of theirs
        assert!(mm.can_start_timeout(Team::B).is_ok());
    }

    #[test]
    fn test_no_timeouts_checked_before_active() {
        initialize();
        let mut mm = MatchManager::with_default_rosters(MatchConfig {
            timeouts_per_match: 1,
            ..Default::default()
        });
        mm.start_timeout(Team::A).unwrap();
        assert_eq!(
            mm.start_timeout(Team::A),
            Err(MMErr::NoTimeoutsRemaining(Team::A))
        );
    }

    #[test]
    fn test_suspension_toggle() {
        initialize();
        let mut mm = new_manager();
        mm.advance_to(500);

        assert_eq!(
            mm.toggle_suspension(Team::B),
            SuspensionState::Active {
                team: Team::B,
                end_time: 620
            }
        );
        assert_eq!(
            mm.snapshot().suspension,
            Some(SuspensionSnapshot {
                team: Team::B,
                end_time: 620
            })
        );

        // Manual override long before the end time
        mm.tick();
        assert_eq!(mm.toggle_suspension(Team::A), SuspensionState::None);
        assert_eq!(mm.snapshot().suspension, None);
    }

    #[test]
    fn test_suspension_expires_on_tick() {
        initialize();
        let mut mm = new_manager();
        mm.toggle_suspension(Team::A);
        mm.advance_to(119);
        assert!(mm.clock().suspension.is_active());
        mm.tick();
        assert_eq!(mm.clock().suspension, SuspensionState::None);
    }

    #[test]
    fn test_suspension_flag_is_independent_of_players() {
        initialize();
        let mut mm = new_manager();
        // A player's two-minute counter does not start the match-wide suspension
        mm.record_event(&EventKind::TwoMinutes, Team::A, "7").unwrap();
        assert_eq!(mm.clock().suspension, SuspensionState::None);

        // And toggling the flag touches no player
        let before = mm.roster_snapshot(Team::A);
        mm.toggle_suspension(Team::A);
        assert_eq!(mm.roster_snapshot(Team::A), before);
    }

    #[test]
    fn test_counters_never_decrease() {
        initialize();
        let mut mm = new_manager();
        let kinds = [
            EventKind::Goal,
            EventKind::Assist,
            EventKind::YellowCard,
            EventKind::Steal,
            EventKind::Block,
            EventKind::Turnover,
            EventKind::YellowCard,
            EventKind::TwoMinutes,
            EventKind::Goal,
        ];
        let mut last = row(&mm, Team::B, 5);
        for kind in kinds.iter() {
            mm.record_event(kind, Team::B, "5").unwrap();
            let now = row(&mm, Team::B, 5);
            assert!(now.goals >= last.goals);
            assert!(now.assists >= last.assists);
            assert!(now.two_minutes >= last.two_minutes);
            assert!(now.yellow_cards >= last.yellow_cards);
            assert!(now.steals >= last.steals);
            assert!(now.blocks >= last.blocks);
            assert!(now.turnovers >= last.turnovers);
            last = now;
        }
    }

    #[test]
    fn test_goal_difference_in_ratings() {
        initialize();
        let mut mm = new_manager();
        mm.advance_to(1800);
        // Level score: 1.0 * 1.0 * 2.0
        mm.record_event(&EventKind::Goal, Team::A, "7").unwrap();
        // B is one behind: 1.0 * 1.0 * 1.0
        mm.record_event(&EventKind::Goal, Team::B, "3").unwrap();

        let a = mm.player_ratings(Team::A);
        let seven = a.iter().find(|r| r.number == 7).unwrap();
        assert_eq!(seven.flat, 1.0);
        assert_eq!(seven.weighted, 2.0);

        let b = mm.player_ratings(Team::B);
        let three = b.iter().find(|r| r.number == 3).unwrap();
        assert_eq!(three.weighted, 1.0);

        assert_eq!(mm.team_rating(Team::A), 1.0);
    }
}
