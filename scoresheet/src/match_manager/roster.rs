use handball_common::{
    drawing_support::ROSTER_SIZE,
    event_kind::EventKind,
    match_snapshot::{PlayerRow, RosterSnapshot},
    team::Team,
};
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_TWO_MINUTES: u8 = 3;
pub const MAX_YELLOW_CARDS: u8 = 2;

const DEFAULT_A_NUMBERS: [u8; ROSTER_SIZE] = [7, 9, 11, 12, 5, 8, 10, 13, 14, 15, 16, 17, 18, 19, 20, 21];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub number: u8,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Team {0} roster has {1} players, it needs exactly {n}", n = ROSTER_SIZE)]
    WrongSize(Team, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) number: u8,
    pub(crate) goals: u16,
    pub(crate) assists: u16,
    pub(crate) two_minutes: u8,
    pub(crate) yellow_cards: u8,
    pub(crate) red_card: bool,
    pub(crate) steals: u16,
    pub(crate) blocks: u16,
    pub(crate) turnovers: u16,
}

/// Informational messages that accompany a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RedCardForSuspensions { name: String, number: u8 },
    SecondYellowCard { name: String, number: u8 },
    TimeoutCalled { team: Team, duration: u32, remaining: u8 },
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::RedCardForSuspensions { name, number } => write!(
                f,
                "Player {name} ({number}) received a red card for {MAX_TWO_MINUTES} two-minute suspensions!"
            ),
            Self::SecondYellowCard { name, number } => {
                write!(f, "Player {name} ({number}) has received {MAX_YELLOW_CARDS} yellow cards!")
            }
            Self::TimeoutCalled {
                team,
                duration,
                remaining,
            } => write!(
                f,
                "Team {team} called a timeout ({duration}s). Remaining timeouts: {remaining}"
            ),
        }
    }
}

impl Player {
    pub(crate) fn new(id: u32, name: String, number: u8) -> Self {
        Self {
            id,
            name,
            number,
            goals: 0,
            assists: 0,
            two_minutes: 0,
            yellow_cards: 0,
            red_card: false,
            steals: 0,
            blocks: 0,
            turnovers: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn has_red_card(&self) -> bool {
        self.red_card
    }

    /// Applies a single event. Returns whether any counter changed, and the
    /// notice to show if a threshold was reached.
    ///
    /// The red card guard is the caller's job.
    pub(crate) fn apply(&mut self, kind: &EventKind) -> (bool, Option<Notice>) {
        match kind {
            EventKind::Goal | EventKind::SevenMeterGoal => {
                self.goals = self.goals.saturating_add(1);
                (true, None)
            }
            EventKind::Assist => {
                self.assists = self.assists.saturating_add(1);
                (true, None)
            }
            EventKind::TwoMinutes => {
                if self.two_minutes >= MAX_TWO_MINUTES {
                    return (false, None);
                }
                self.two_minutes += 1;
                if self.two_minutes >= MAX_TWO_MINUTES {
                    self.red_card = true;
                    (
                        true,
                        Some(Notice::RedCardForSuspensions {
                            name: self.name.clone(),
                            number: self.number,
                        }),
                    )
                } else {
                    (true, None)
                }
            }
            EventKind::YellowCard => {
                if self.yellow_cards >= MAX_YELLOW_CARDS {
                    return (false, None);
                }
                self.yellow_cards += 1;
                if self.yellow_cards >= MAX_YELLOW_CARDS {
                    (
                        true,
                        Some(Notice::SecondYellowCard {
                            name: self.name.clone(),
                            number: self.number,
                        }),
                    )
                } else {
                    (true, None)
                }
            }
            EventKind::Steal => {
                self.steals = self.steals.saturating_add(1);
                (true, None)
            }
            EventKind::Block => {
                self.blocks = self.blocks.saturating_add(1);
                (true, None)
            }
            EventKind::Turnover => {
                self.turnovers = self.turnovers.saturating_add(1);
                (true, None)
            }
            EventKind::Other(_) => (false, None),
        }
    }

    pub fn as_row(&self) -> PlayerRow {
        PlayerRow {
            id: self.id,
            name: self.name.clone(),
            number: self.number,
            goals: self.goals,
            assists: self.assists,
            two_minutes: self.two_minutes,
            yellow_cards: self.yellow_cards,
            red_card: self.red_card,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    team: Team,
    players: Vec<Player>,
}

impl Roster {
    pub fn new(team: Team, entries: &[PlayerEntry]) -> Result<Self, RosterError> {
        if entries.len() != ROSTER_SIZE {
            return Err(RosterError::WrongSize(team, entries.len()));
        }

        let players = entries
            .iter()
            .zip(1..)
            .map(|(entry, id)| Player::new(id, entry.name.clone(), entry.number))
            .collect();

        Ok(Self { team, players })
    }

    pub fn default_entries(team: Team) -> Vec<PlayerEntry> {
        (0..ROSTER_SIZE)
            .map(|i| PlayerEntry {
                name: format!("Player {team}{}", i + 1),
                number: match team {
                    Team::A => DEFAULT_A_NUMBERS[i],
                    Team::B => i as u8 + 1,
                },
            })
            .collect()
    }

    pub fn default_for(team: Team) -> Self {
        let players = Self::default_entries(team)
            .into_iter()
            .zip(1..)
            .map(|(entry, id)| Player::new(id, entry.name, entry.number))
            .collect();
        Self { team, players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Shirt numbers are not checked for uniqueness, the first match wins
    pub fn find_index(&self, number: u8) -> Option<usize> {
        self.players.iter().position(|p| p.number == number)
    }

    pub(crate) fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn goals(&self) -> u16 {
        self.players
            .iter()
            .fold(0u16, |acc, p| acc.saturating_add(p.goals))
    }

    pub fn as_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            team: self.team,
            players: self.players.iter().map(Player::as_row).collect(),
        }
    }
}
