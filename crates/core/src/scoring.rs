//! Scoring module - running score and persisted best score
//!
//! The running score only ever grows, by the merge value of each accepted
//! move. The best score is read from the store once, when the tracker is
//! built, and written back whenever the running score overtakes it. Storage
//! failures are logged and swallowed: a broken store costs the player a saved
//! high score, never a move.

use tracing::{debug, warn};

use crate::store::BestScoreStore;
use crate::types::{Score, BEST_SCORE_KEY};

pub struct ScoreTracker {
    score: Score,
    best: Score,
    key: String,
    store: Box<dyn BestScoreStore + Send>,
}

impl ScoreTracker {
    /// Build a tracker, loading the best score under [`BEST_SCORE_KEY`].
    pub fn new(store: Box<dyn BestScoreStore + Send>) -> Self {
        Self::with_key(store, BEST_SCORE_KEY)
    }

    pub fn with_key(store: Box<dyn BestScoreStore + Send>, key: &str) -> Self {
        let best = load_best(&*store, key);
        Self {
            score: 0,
            best,
            key: key.to_string(),
            store,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn best(&self) -> Score {
        self.best
    }

    /// Start a new session's score. The best score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Restore a running score (e.g. a resumed session).
    pub fn set_score(&mut self, score: Score) {
        self.score = score;
        self.record_best();
    }

    /// Add a move's merge value. Persists the best score if it improved.
    pub fn add(&mut self, delta: Score) {
        if delta == 0 {
            return;
        }
        self.score = self.score.saturating_add(delta);
        self.record_best();
    }

    /// Compare against the best score and persist on improvement.
    ///
    /// Returns true when the best score moved.
    pub fn record_best(&mut self) -> bool {
        if self.score <= self.best {
            return false;
        }
        self.best = self.score;
        match self.store.set(&self.key, &self.best.to_string()) {
            Ok(()) => debug!(best = self.best, "best score saved"),
            Err(e) => warn!(error = %e, best = self.best, "could not save best score"),
        }
        true
    }
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("score", &self.score)
            .field("best", &self.best)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Missing, unreadable or unparseable values all read as 0.
fn load_best(store: &dyn BestScoreStore, key: &str) -> Score {
    match store.get(key) {
        Ok(None) => 0,
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "stored best score is not a number; using 0");
            0
        }),
        Err(e) => {
            warn!(key, error = %e, "could not read best score; using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl BestScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_loads_best_once() {
        let store = MemoryStore::with_entry(BEST_SCORE_KEY, "512");
        let tracker = ScoreTracker::new(Box::new(store));
        assert_eq!(tracker.best(), 512);
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_garbage_best_reads_as_zero() {
        let store = MemoryStore::with_entry(BEST_SCORE_KEY, "lots");
        assert_eq!(ScoreTracker::new(Box::new(store)).best(), 0);
    }

    #[test]
    fn test_add_persists_only_improvements() {
        let store = MemoryStore::with_entry(BEST_SCORE_KEY, "10");
        let mut tracker = ScoreTracker::new(Box::new(store.clone()));

        tracker.add(8);
        assert_eq!(tracker.best(), 10);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("10"));

        tracker.add(4);
        assert_eq!(tracker.score(), 12);
        assert_eq!(tracker.best(), 12);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryStore::new()));
        tracker.add(32);
        tracker.reset();
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.best(), 32);
    }

    #[test]
    fn test_broken_store_never_blocks_scoring() {
        let mut tracker = ScoreTracker::new(Box::new(BrokenStore));
        assert_eq!(tracker.best(), 0);
        tracker.add(16);
        assert_eq!(tracker.score(), 16);
        assert_eq!(tracker.best(), 16);
    }
}
