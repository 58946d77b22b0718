//! High score leaderboard
//!
//! Top-5 table of `{name, score}` entries, loaded once from storage and
//! persisted after every accepted commit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::persistence::{MemoryStorage, Storage};

/// Maximum number of leaderboard entries to keep
pub const MAX_ENTRIES: usize = 5;
/// Maximum player name length (chars)
pub const MAX_NAME_CHARS: usize = 16;
/// Shown for entries stored without a name
pub const ANONYMOUS: &str = "Anonymous";

/// Rejected name submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty or whitespace-only
    Empty,
    /// No qualifying score is waiting for a name
    NoPendingPrompt,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::NoPendingPrompt => write!(f, "no score is waiting for a name"),
        }
    }
}

impl std::error::Error for NameError {}

/// Trim a submitted name and clip it to `MAX_NAME_CHARS`
pub fn normalize_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    Ok(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Name for display; blank names show as "Anonymous"
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            ANONYMOUS
        } else {
            &self.name
        }
    }
}

/// Ranked table, sorted by score descending. Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from arbitrary entries: stable sort, clip names, truncate
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        for entry in &mut entries {
            if entry.name.chars().count() > MAX_NAME_CHARS {
                entry.name = entry.name.chars().take(MAX_NAME_CHARS).collect();
            }
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(self.insertion_index(score) + 1)
    }

    /// Insert an entry, keeping the table sorted and capped.
    /// Returns the rank achieved (1-indexed) or None if it fell off the table.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // Equal scores keep their prior order: the newcomer goes after them
        let pos = self.insertion_index(entry.score);
        if pos >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }

    fn insertion_index(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }
}

/// Owns the leaderboard and its storage collaborator
pub struct LeaderboardManager {
    board: Leaderboard,
    storage: Box<dyn Storage>,
    /// Cleared after the first storage failure; the board then lives in memory only
    persist: bool,
}

impl fmt::Debug for LeaderboardManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaderboardManager")
            .field("board", &self.board)
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}

impl LeaderboardManager {
    /// Storage key holding the JSON array
    pub const STORAGE_KEY: &'static str = "hoop_shot_leaderboard";

    /// Load the leaderboard once from `storage`
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let mut persist = true;
        let board = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
                Ok(entries) => {
                    let board = Leaderboard::from_entries(entries);
                    log::info!("Loaded {} leaderboard entries", board.len());
                    board
                }
                Err(e) => {
                    log::warn!("Ignoring malformed leaderboard: {e}");
                    Leaderboard::new()
                }
            },
            Ok(None) => {
                log::info!("No leaderboard found, starting fresh");
                Leaderboard::new()
            }
            Err(e) => {
                log::warn!("Could not read leaderboard, keeping it in memory: {e}");
                persist = false;
                Leaderboard::new()
            }
        };

        Self {
            board,
            storage,
            persist,
        }
    }

    /// Manager backed by a private in-memory store
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        self.board.entries()
    }

    /// Whether commits still reach storage
    pub fn is_persisting(&self) -> bool {
        self.persist
    }

    pub fn qualifies(&self, score: u32) -> bool {
        self.board.qualifies(score)
    }

    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.board.potential_rank(score)
    }

    /// Record `score` under `name` and persist the table.
    ///
    /// Blank names are rejected without touching the table. Returns the rank
    /// achieved, or None if the score did not make the table.
    pub fn commit(&mut self, name: &str, score: u32) -> Result<Option<usize>, NameError> {
        let name = normalize_name(name)?;
        let rank = self.board.insert(LeaderboardEntry { name, score });
        if rank.is_some() {
            self.save();
        }
        Ok(rank)
    }

    /// Persist the table (best effort)
    fn save(&mut self) {
        if !self.persist {
            return;
        }
        let json = match serde_json::to_string(&self.board) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize leaderboard: {e}");
                return;
            }
        };
        match self.storage.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Leaderboard saved ({} entries)", self.board.len()),
            Err(e) => {
                log::warn!("Could not save leaderboard, keeping it in memory: {e}");
                self.persist = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::persistence::StorageError;

    /// Storage whose writes always fail, counting attempts
    #[derive(Default, Clone)]
    struct BrokenStorage {
        writes: Rc<Cell<u32>>,
        fail_reads: bool,
    }

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                Err(StorageError::Unavailable)
            } else {
                Ok(None)
            }
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            Err(StorageError::Rejected("quota exceeded".into()))
        }
    }

    fn board_of(entries: &[(&str, u32)]) -> Leaderboard {
        Leaderboard::from_entries(
            entries
                .iter()
                .map(|(n, s)| LeaderboardEntry::new(*n, *s))
                .collect(),
        )
    }

    fn scores(board: &Leaderboard) -> Vec<u32> {
        board.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_commit_inserts_in_rank_order() {
        let storage = MemoryStorage::new();
        let mut seed = storage.clone();
        seed.set(
            LeaderboardManager::STORAGE_KEY,
            r#"[{"name":"A","score":50},{"name":"B","score":40}]"#,
        )
        .unwrap();

        let mut manager = LeaderboardManager::load(Box::new(storage.clone()));
        assert_eq!(manager.commit("C", 45), Ok(Some(2)));

        let names: Vec<&str> = manager.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "B"]);
        assert_eq!(
            storage.get(LeaderboardManager::STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"A","score":50},{"name":"C","score":45},{"name":"B","score":40}]"#)
        );
    }

    #[test]
    fn test_qualifies_when_not_full() {
        let board = board_of(&[("A", 10), ("B", 9)]);
        assert!(board.qualifies(1));
        assert_eq!(board.potential_rank(1), Some(3));
        assert_eq!(board.potential_rank(11), Some(1));
    }

    #[test]
    fn test_full_board_requires_beating_lowest() {
        let board = board_of(&[("A", 50), ("B", 40), ("C", 30), ("D", 20), ("E", 10)]);
        assert!(!board.qualifies(10));
        assert!(!board.qualifies(3));
        assert!(board.qualifies(11));
        assert_eq!(board.potential_rank(10), None);
        assert_eq!(board.potential_rank(35), Some(3));
    }

    #[test]
    fn test_ties_keep_prior_order() {
        let mut board = board_of(&[("First", 20), ("Second", 20)]);
        assert_eq!(board.insert(LeaderboardEntry::new("Third", 20)), Some(3));
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_insert_truncates_to_five() {
        let mut board = board_of(&[("A", 50), ("B", 40), ("C", 30), ("D", 20), ("E", 10)]);
        assert_eq!(board.insert(LeaderboardEntry::new("F", 25)), Some(4));
        assert_eq!(scores(&board), [50, 40, 30, 25, 20]);
        assert_eq!(board.insert(LeaderboardEntry::new("G", 5)), None);
        assert_eq!(board.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_blank_name_is_rejected_without_change() {
        let storage = MemoryStorage::new();
        let mut manager = LeaderboardManager::load(Box::new(storage.clone()));
        assert_eq!(manager.commit("   ", 12), Err(NameError::Empty));
        assert_eq!(manager.commit("", 12), Err(NameError::Empty));
        assert!(manager.board().is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_names_are_trimmed_and_clipped() {
        let mut manager = LeaderboardManager::in_memory();
        manager
            .commit("  An Extremely Long Player Name  ", 7)
            .unwrap();
        assert_eq!(manager.entries()[0].name, "An Extremely Lon");
        assert_eq!(manager.entries()[0].name.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_load_normalizes_stored_table() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                LeaderboardManager::STORAGE_KEY,
                r#"[{"name":"low","score":1},{"name":"","score":9},
                    {"name":"b","score":4},{"name":"c","score":3},
                    {"name":"d","score":2},{"name":"e","score":8}]"#,
            )
            .unwrap();

        let manager = LeaderboardManager::load(Box::new(storage));
        assert_eq!(scores(manager.board()), [9, 8, 4, 3, 2]);
        assert_eq!(manager.entries()[0].display_name(), ANONYMOUS);
    }

    #[test]
    fn test_malformed_blob_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set(LeaderboardManager::STORAGE_KEY, "{ nope")
            .unwrap();
        let manager = LeaderboardManager::load(Box::new(storage));
        assert!(manager.board().is_empty());
        assert!(manager.is_persisting());
    }

    #[test]
    fn test_write_failure_falls_back_to_memory() {
        let broken = BrokenStorage::default();
        let writes = broken.writes.clone();
        let mut manager = LeaderboardManager::load(Box::new(broken));

        assert_eq!(manager.commit("A", 5), Ok(Some(1)));
        assert!(!manager.is_persisting());
        assert_eq!(manager.commit("B", 6), Ok(Some(1)));

        // No retry after the first failure
        assert_eq!(writes.get(), 1);
        assert_eq!(scores(manager.board()), [6, 5]);
    }

    #[test]
    fn test_read_failure_never_writes() {
        let broken = BrokenStorage {
            fail_reads: true,
            ..Default::default()
        };
        let writes = broken.writes.clone();
        let mut manager = LeaderboardManager::load(Box::new(broken));
        assert!(!manager.is_persisting());
        manager.commit("A", 5).unwrap();
        assert_eq!(writes.get(), 0);
        assert_eq!(manager.board().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_table_stays_sorted_and_capped(
            commits in proptest::collection::vec(("[a-z]{1,20}", 0u32..200), 0..40)
        ) {
            let mut manager = LeaderboardManager::in_memory();
            for (name, score) in &commits {
                manager.commit(name, *score).unwrap();
                let board = manager.board();
                prop_assert!(board.len() <= MAX_ENTRIES);
                prop_assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
                prop_assert!(board.entries().iter().all(|e| e.name.chars().count() <= MAX_NAME_CHARS));
            }
        }
    }
}
