//! Favorites - exercises the user hearted, newest first, unique by identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::exercises::Exercise;

/// Favorited exercise snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    #[serde(flatten)]
    pub exercise: Exercise,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    items: Vec<FavoriteEntry>,
}

impl FavoritesState {
    /// Favorite an exercise, or unfavorite it if already present.
    /// Returns `true` if the exercise is a favorite afterwards.
    pub fn toggle(&mut self, exercise: &Exercise, clock: &impl Clock) -> bool {
        let id = exercise.id();
        if let Some(index) = self.items.iter().position(|e| e.id == id) {
            self.items.remove(index);
            debug!("Unfavorited {}", id);
            false
        } else {
            debug!("Favorited {}", id);
            self.items.insert(
                0,
                FavoriteEntry {
                    id,
                    exercise: exercise.clone(),
                    added_at: clock.now(),
                },
            );
            true
        }
    }

    /// Remove by id; absent ids are ignored. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// First id that appears more than once, if any
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .map(|e| e.id.as_str())
            .find(|id| !seen.insert(*id))
    }

    pub fn contains(&self, exercise: &Exercise) -> bool {
        self.contains_id(&exercise.id())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|e| e.id == id)
    }

    /// Entries, most recently added first
    pub fn items(&self) -> &[FavoriteEntry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::clock::ManualClock;
    use crate::exercises::sample_exercise;

    fn clock() -> ManualClock {
        ManualClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn ids(state: &FavoritesState) -> Vec<&str> {
        state.items().iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_toggle_adds_at_front() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        assert!(favs.toggle(&sample_exercise("Plank", "abdominals", "strength"), &clock));
        assert!(favs.toggle(&sample_exercise("Pull-up", "lats", "strength"), &clock));
        assert_eq!(
            ids(&favs),
            vec!["pull-up-lats-strength", "plank-abdominals-strength"]
        );
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        let plank = sample_exercise("Plank", "abdominals", "strength");
        favs.toggle(&sample_exercise("Curl", "biceps", "strength"), &clock);
        let before: HashSet<_> = favs.items().iter().map(|e| e.id.clone()).collect();

        assert!(favs.toggle(&plank, &clock));
        assert!(!favs.toggle(&plank, &clock));

        let after: HashSet<_> = favs.items().iter().map(|e| e.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_readd_gets_new_timestamp() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        let plank = sample_exercise("Plank", "abdominals", "strength");
        favs.toggle(&plank, &clock);
        let first = favs.items()[0].added_at;
        favs.toggle(&plank, &clock);
        clock.advance(Duration::minutes(5));
        favs.toggle(&plank, &clock);
        assert_eq!(favs.items()[0].added_at, first + Duration::minutes(5));
    }

    #[test]
    fn test_toggle_matches_by_identity_not_content() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        let a = sample_exercise("Push Ups", "chest", "strength");
        let mut b = sample_exercise("push  ups", "Chest", "strength");
        b.instructions = "different".to_string();

        favs.toggle(&a, &clock);
        assert!(favs.contains(&b));
        assert!(!favs.toggle(&b, &clock));
        assert!(favs.is_empty());
    }

    #[test]
    fn test_distinct_exercises_no_duplicates() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        for i in 0..10 {
            favs.toggle(&sample_exercise(&format!("Move {}", i), "chest", "strength"), &clock);
        }
        let unique: HashSet<_> = favs.items().iter().map(|e| &e.id).collect();
        assert_eq!(favs.len(), 10);
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        favs.toggle(&sample_exercise("Plank", "abdominals", "strength"), &clock);
        assert!(!favs.remove("nope"));
        assert_eq!(favs.len(), 1);
        assert!(favs.remove("plank-abdominals-strength"));
        assert!(favs.is_empty());
    }

    #[test]
    fn test_clear() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        favs.toggle(&sample_exercise("Plank", "abdominals", "strength"), &clock);
        favs.toggle(&sample_exercise("Curl", "biceps", "strength"), &clock);
        favs.clear();
        assert!(favs.is_empty());
    }

    #[test]
    fn test_entry_serializes_flat() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        favs.toggle(&sample_exercise("Plank", "abdominals", "strength"), &clock);
        let json = serde_json::to_value(&favs.items()[0]).unwrap();
        assert_eq!(json["id"], "plank-abdominals-strength");
        assert_eq!(json["name"], "Plank");
        assert_eq!(json["type"], "strength");
    }

    #[test]
    fn test_duplicate_id() {
        let clock = clock();
        let mut favs = FavoritesState::default();
        favs.toggle(&sample_exercise("Plank", "abdominals", "strength"), &clock);
        favs.toggle(&sample_exercise("Curl", "biceps", "strength"), &clock);
        assert_eq!(favs.duplicate_id(), None);

        favs.items.push(favs.items[1].clone());
        assert_eq!(favs.duplicate_id(), Some("plank-abdominals-strength"));
    }
}
