use crate::match_manager::{MatchManager, Result, roster::Notice};
use derivative::Derivative;
use handball_common::{event_kind::EventKind, team::Team};

/// The event form: a selected kind and team, plus the typed shirt number
#[derive(Derivative)]
#[derivative(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventEntry {
    #[derivative(Default(value = "EventKind::Goal"))]
    pub kind: EventKind,
    pub team: Team,
    pub player_input: String,
}

impl EventEntry {
    /// Records the entered event. The number field is cleared only on success.
    pub fn submit(&mut self, manager: &mut MatchManager) -> Result<Option<Notice>> {
        let notice = manager.record_event(&self.kind, self.team, &self.player_input)?;
        self.player_input.clear();
        Ok(notice)
    }
}
