//! Best score and lifetime counters
//!
//! Persisted to LocalStorage. The game only talks to the `ScoreStore` trait,
//! so tests and the native demo can run without a browser.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// What the game needs from persistent storage
pub trait ScoreStore {
    /// Best score ever recorded
    fn high_score(&self) -> u32;
    /// Offer a finished run's score. Returns true if it is a new record.
    fn submit_score(&mut self, score: u32) -> bool;
    fn increment_games_played(&mut self);
    /// Add to the lifetime slice counter
    fn add_slices(&mut self, count: u32);
}

/// Player records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    pub best_score: u32,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub total_slices: u64,
    /// Write through to LocalStorage on every change
    #[serde(skip)]
    persist: bool,
}

impl Records {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dish_slash_records";

    /// In-memory records, never saved
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from LocalStorage; later changes are saved back
    pub fn load() -> Self {
        let mut records = match storage::load_json::<Records>(Self::STORAGE_KEY) {
            Some(records) => {
                log::info!(
                    "Loaded records: best {}, {} games",
                    records.best_score,
                    records.games_played
                );
                records
            }
            None => {
                log::info!("No records found, starting fresh");
                Self::new()
            }
        };
        records.persist = true;
        records
    }

    pub fn save(&self) {
        if self.persist {
            storage::save_json(Self::STORAGE_KEY, self);
        }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0 && score > self.best_score
    }
}

impl ScoreStore for Records {
    fn high_score(&self) -> u32 {
        self.best_score
    }

    fn submit_score(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best_score = score;
        self.save();
        true
    }

    fn increment_games_played(&mut self) {
        self.games_played += 1;
        self.save();
    }

    fn add_slices(&mut self, count: u32) {
        self.total_slices += u64::from(count);
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_only_when_beaten() {
        let mut records = Records::new();
        assert!(!records.submit_score(0));
        assert!(records.submit_score(120));
        assert_eq!(records.high_score(), 120);

        assert!(!records.submit_score(120));
        assert!(!records.submit_score(80));
        assert_eq!(records.high_score(), 120);

        assert!(records.submit_score(121));
        assert_eq!(records.high_score(), 121);
    }

    #[test]
    fn test_counters() {
        let mut records = Records::new();
        records.increment_games_played();
        records.increment_games_played();
        records.add_slices(7);
        records.add_slices(5);
        assert_eq!(records.games_played, 2);
        assert_eq!(records.total_slices, 12);
    }

    #[test]
    fn test_json_shape_tolerates_missing_counters() {
        let records: Records = serde_json::from_str(r#"{"best_score":450}"#).unwrap();
        assert_eq!(records.best_score, 450);
        assert_eq!(records.games_played, 0);
        assert_eq!(records.total_slices, 0);
    }

    #[test]
    fn test_load_without_storage_starts_fresh() {
        let records = Records::load();
        assert_eq!(records.best_score, 0);
    }
}
