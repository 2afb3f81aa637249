//! Chronicle - the kingdom's record of notable happenings

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;
use crate::kingdom::disaster::DisasterReport;
use crate::kingdom::systems::{ElectionOutcome, GameOutcome, RandomEvent};

/// A recorded happening
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChronicleEntry {
    pub id: u32,
    pub turn: Turn,
    pub kind: EntryKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntryKind {
    RandomEvent(RandomEvent),
    Election(ElectionOutcome),
    Disaster(DisasterReport),
    Starvation { deaths: u32 },
    Battle { casualties: u32, survivors: u32 },
    Loan { amount: i64 },
    Repayment { amount: i64 },
    Construction { building: String, total: u32 },
    GameOver(GameOutcome),
}

/// The complete chronicle
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Chronicle {
    pub entries: Vec<ChronicleEntry>,
    next_entry_id: u32,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: Turn, kind: EntryKind) -> u32 {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.entries.push(ChronicleEntry { id, turn, kind });
        id
    }

    pub fn entries_for_turn(&self, turn: Turn) -> impl Iterator<Item = &ChronicleEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }

    pub fn elections(&self) -> impl Iterator<Item = &ElectionOutcome> {
        self.entries.iter().filter_map(|e| match &e.kind {
            EntryKind::Election(outcome) => Some(outcome),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut chronicle = Chronicle::new();
        let a = chronicle.record(1, EntryKind::Loan { amount: 100 });
        let b = chronicle.record(2, EntryKind::Repayment { amount: 100 });
        assert_eq!((a, b), (0, 1));
        assert_eq!(chronicle.len(), 2);
    }

    #[test]
    fn test_entries_for_turn() {
        let mut chronicle = Chronicle::new();
        chronicle.record(3, EntryKind::Loan { amount: 100 });
        chronicle.record(4, EntryKind::Starvation { deaths: 2 });
        chronicle.record(4, EntryKind::GameOver(GameOutcome::Starvation));

        assert_eq!(chronicle.entries_for_turn(4).count(), 2);
        assert_eq!(chronicle.entries_for_turn(5).count(), 0);
    }

    #[test]
    fn test_elections_filter() {
        let mut chronicle = Chronicle::new();
        chronicle.record(5, EntryKind::Election(ElectionOutcome::Retained {
            king: "King_1".into(),
            approval: 60,
        }));
        chronicle.record(5, EntryKind::Loan { amount: 1 });

        assert_eq!(chronicle.elections().count(), 1);
    }
}
