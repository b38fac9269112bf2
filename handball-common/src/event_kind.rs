use serde::{Deserialize, Serialize};

/// A discrete event recorded against a single player.
///
/// Codes that are not recognised are kept as `Other` so that recording them
/// behaves as a successful no-op rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Goal,
    SevenMeterGoal,
    Assist,
    TwoMinutes,
    YellowCard,
    Steal,
    Block,
    Turnover,
    Other(String),
}

impl EventKind {
    pub const KNOWN: [EventKind; 8] = [
        Self::Goal,
        Self::SevenMeterGoal,
        Self::Assist,
        Self::TwoMinutes,
        Self::YellowCard,
        Self::Steal,
        Self::Block,
        Self::Turnover,
    ];

    pub fn code(&self) -> &str {
        match self {
            Self::Goal => "GOAL",
            Self::SevenMeterGoal => "7M",
            Self::Assist => "ASSIST",
            Self::TwoMinutes => "2MIN",
            Self::YellowCard => "YELLOW",
            Self::Steal => "STEAL",
            Self::Block => "BLOCK",
            Self::Turnover => "TURNOVER",
            Self::Other(code) => code,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Goal => "Goal",
            Self::SevenMeterGoal => "7m Goal",
            Self::Assist => "Assist",
            Self::TwoMinutes => "2' Suspension",
            Self::YellowCard => "Yellow Card",
            Self::Steal => "Steal",
            Self::Block => "Block",
            Self::Turnover => "Turnover",
            Self::Other(_) => "Unknown",
        }
    }
}

impl From<&str> for EventKind {
    fn from(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "GOAL" => Self::Goal,
            "7M" => Self::SevenMeterGoal,
            "ASSIST" => Self::Assist,
            "2MIN" => Self::TwoMinutes,
            "YELLOW" => Self::YellowCard,
            "STEAL" => Self::Steal,
            "BLOCK" => Self::Block,
            "TURNOVER" => Self::Turnover,
            _ => Self::Other(code.trim().to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.code().to_string()
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.code())
    }
}
