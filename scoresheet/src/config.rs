use crate::match_manager::roster::{PlayerEntry, Roster, RosterError};
pub use handball_common::config::Match as MatchConfig;
use handball_common::{bundles::TeamBundle, team::Team};
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub url: String,
    /// Sent as a bearer token when not empty
    pub token: String,
    pub timeout_secs: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/api/".to_string(),
            token: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Backend {
    pub fn token(&self) -> Option<&str> {
        Some(self.token.trim()).filter(|t| !t.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Header shown above the live match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub home_name: String,
    pub away_name: String,
    pub date: String,
    pub match_number: String,
    pub referees: Vec<String>,
    pub city: String,
}

impl Default for MatchInfo {
    fn default() -> Self {
        Self {
            home_name: "Team A".to_string(),
            away_name: "Team B".to_string(),
            date: String::new(),
            match_number: String::new(),
            referees: Vec::new(),
            city: String::new(),
        }
    }
}

impl MatchInfo {
    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::A => &self.home_name,
            Team::B => &self.away_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rosters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Vec<PlayerEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<Vec<PlayerEntry>>,
}

impl Rosters {
    /// Uses the default roster for any team that isn't overridden
    pub fn build(&self) -> Result<TeamBundle<Roster>, RosterError> {
        TeamBundle::new(&self.a, &self.b)
            .map(|team, entries| match entries {
                Some(entries) => Roster::new(team, entries),
                None => Ok(Roster::default_for(team)),
            })
            .complete()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "match")]
    pub timing: MatchConfig,
    pub backend: Backend,
    pub info: MatchInfo,
    #[serde(default)]
    pub rosters: Rosters,
}
