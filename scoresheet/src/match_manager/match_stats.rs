use handball_common::{
    config::Match as MatchConfig, event_kind::EventKind, match_snapshot::MatchPeriod,
    rating::weighted_event_score, team::Team,
};
use serde_derive::Serialize;
use time::{
    OffsetDateTime,
    format_description::well_known::{Iso8601, iso8601},
};

const CONFIG: iso8601::EncodedConfig = iso8601::Config::DEFAULT
    .set_year_is_six_digits(false)
    .encode();
const FORMAT: Iso8601<CONFIG> = Iso8601::<CONFIG>;
time::serde::format_description!(iso8601_short_year, OffsetDateTime, FORMAT);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchStats {
    start_timestamp: OffsetDateTime,
    events: Vec<Event>,
}

impl MatchStats {
    pub(crate) fn new() -> Self {
        Self {
            start_timestamp: OffsetDateTime::now_utc(),
            events: Vec::new(),
        }
    }

    pub(crate) fn add_player_event(
        &mut self,
        kind: EventKind,
        team: Team,
        player_num: u8,
        elapsed: u32,
        period: MatchPeriod,
        goal_difference: i32,
    ) {
        self.events.push(Event::Player {
            kind,
            team,
            player_number: player_num,
            elapsed,
            period,
            goal_difference,
            occurred_on: OffsetDateTime::now_utc(),
        });
    }

    pub(crate) fn add_timeout(&mut self, team: Team, elapsed: u32, period: MatchPeriod) {
        self.events.push(Event::Timeout {
            team,
            elapsed,
            period,
            occurred_on: OffsetDateTime::now_utc(),
        });
    }

    pub(crate) fn add_suspension_toggle(
        &mut self,
        team: Team,
        active: bool,
        elapsed: u32,
        period: MatchPeriod,
    ) {
        self.events.push(Event::Suspension {
            team,
            active,
            elapsed,
            period,
            occurred_on: OffsetDateTime::now_utc(),
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    /// Sum of the event-weighted scores for one player
    pub(crate) fn weighted_rating(&self, team: Team, player_num: u8, config: &MatchConfig) -> f64 {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Player {
                    kind,
                    team: t,
                    player_number,
                    elapsed,
                    goal_difference,
                    ..
                } if *t == team && *player_number == player_num => Some(weighted_event_score(
                    kind,
                    *elapsed,
                    *goal_difference,
                    config,
                )),
                _ => None,
            })
            .sum()
    }

    pub(crate) fn as_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Export<'a> {
            #[serde(with = "iso8601_short_year", rename = "startedOn")]
            started_on: OffsetDateTime,
            events: &'a [Event],
        }

        serde_json::to_string(&Export {
            started_on: self.start_timestamp,
            events: &self.events,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
enum Event {
    #[serde(rename = "player")]
    Player {
        kind: EventKind,
        team: Team,
        #[serde(rename = "playerNumber")]
        player_number: u8,
        elapsed: u32,
        period: MatchPeriod,
        #[serde(rename = "goalDifference")]
        goal_difference: i32,
        #[serde(with = "iso8601_short_year", rename = "occurredOn")]
        occurred_on: OffsetDateTime,
    },
    #[serde(rename = "timeout")]
    Timeout {
        team: Team,
        elapsed: u32,
        period: MatchPeriod,
        #[serde(with = "iso8601_short_year", rename = "occurredOn")]
        occurred_on: OffsetDateTime,
    },
    #[serde(rename = "suspension")]
    Suspension {
        team: Team,
        active: bool,
        elapsed: u32,
        period: MatchPeriod,
        #[serde(with = "iso8601_short_year", rename = "occurredOn")]
        occurred_on: OffsetDateTime,
    },
}
