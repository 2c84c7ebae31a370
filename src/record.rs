//! The flat versioned record the persistence collaborator saves and loads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Current record layout version.
pub const RECORD_VERSION: u32 = 1;

/// Running session counters.
///
/// Surrendered and busted hands both count as losses; `blackjacks` counts
/// only naturals that actually won.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Hands won.
    pub wins: u64,
    /// Hands lost, including surrenders.
    pub losses: u64,
    /// Winning natural blackjacks.
    pub blackjacks: u64,
    /// Net result across the session (payouts minus wagers).
    pub total_winnings: i64,
    /// Total amount put at risk across all hands.
    pub total_wagered: u64,
    /// Rounds played.
    pub hands_played: u64,
}

/// Flat versioned snapshot of a player's bankroll and counters.
///
/// The core produces and consumes this value; where and how it is stored is
/// entirely the persistence collaborator's concern. A record with an
/// unrecognized version is discarded in favor of defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Layout version, see [`RECORD_VERSION`].
    pub version: u32,
    /// Current bankroll.
    pub balance: u64,
    /// Session counters.
    #[serde(flatten)]
    pub stats: SessionStats,
}

impl PlayerRecord {
    /// Whether this record's layout version is readable.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        self.version == RECORD_VERSION
    }
}

/// Storage abstraction for player records, keyed by player identity.
///
/// Kept trivial on purpose: real hosts put a database or browser storage
/// behind it; tests use [`MemoryStore`].
pub trait RecordStore {
    /// Persists a record under the given key.
    fn save(&mut self, key: &str, record: &PlayerRecord);

    /// Loads the record for the given key, if any.
    fn load(&self, key: &str) -> Option<PlayerRecord>;
}

/// In-memory store for tests and local play.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, PlayerRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn save(&mut self, key: &str, record: &PlayerRecord) {
        self.records.insert(key.to_owned(), record.clone());
    }

    fn load(&self, key: &str) -> Option<PlayerRecord> {
        self.records.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, PlayerRecord, RECORD_VERSION, RecordStore, SessionStats};

    #[test]
    fn store_round_trips_records() {
        let record = PlayerRecord {
            version: RECORD_VERSION,
            balance: 1250,
            stats: SessionStats {
                wins: 3,
                losses: 2,
                blackjacks: 1,
                total_winnings: 250,
                total_wagered: 500,
                hands_played: 5,
            },
        };

        let mut store = MemoryStore::new();
        store.save("guest", &record);
        assert_eq!(store.load("guest"), Some(record));
        assert_eq!(store.load("nobody"), None);
    }

    #[test]
    fn future_versions_are_flagged_incompatible() {
        let record = PlayerRecord {
            version: RECORD_VERSION + 1,
            balance: 0,
            stats: SessionStats::default(),
        };
        assert!(!record.is_compatible());
    }
}
