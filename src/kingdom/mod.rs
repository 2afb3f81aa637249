//! Kingdom - the people, the crown, the army and the turn engine

pub mod army;
pub mod chronicle;
pub mod disaster;
pub mod leader;
pub mod persistence;
pub mod population;
pub mod state;
pub mod systems;
pub mod turn;

pub use army::{Army, BattleResult};
pub use chronicle::{Chronicle, ChronicleEntry, EntryKind};
pub use disaster::{DisasterKind, DisasterReport, Disasters};
pub use leader::{Leader, Role};
pub use persistence::{SaveRecord, DEFAULT_SAVE_FILE};
pub use population::{ClassLosses, Population};
pub use state::{Kingdom, KingdomSnapshot, KingdomStatus};
pub use systems::{ElectionOutcome, GameOutcome, RandomEvent, Vitals};
pub use turn::TurnReport;
