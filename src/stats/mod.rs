//! Stats module - activity rings and weekly workout analytics
//!
//! Everything here is derived from store state and never written back.

use chrono::{Duration, NaiveDate};

use crate::clock::Clock;
use crate::store::{AppStore, HistoryEntry};

/// Daily "move" goal in kcal
pub const MOVE_GOAL_KCAL: u32 = 400;
/// Daily "exercise" goal in minutes
pub const EXERCISE_GOAL_MIN: u32 = 30;

/// Progress toward a goal, in percent, capped at 100 for ring display
pub fn ring_percent(value: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (value as f64 / goal as f64 * 100.0).min(100.0)
}

/// Today's activity at a glance
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    pub date: NaiveDate,
    pub water_ml: u32,
    pub water_goal_ml: u32,
    pub calories: u32,
    pub minutes: u32,
    pub workouts_today: usize,
    pub favorites: usize,
    pub session_running: bool,
}

impl ActivitySummary {
    /// Build from the store; counters left over from an earlier day read as zero
    pub fn from_store<C: Clock>(store: &AppStore<C>) -> Self {
        let today = store.clock().today();
        Self {
            date: today,
            water_ml: store.water.consumed_today(today),
            water_goal_ml: store.water.daily_goal,
            calories: store.workout.calories_today.value_on(today),
            minutes: store.workout.minutes_today.value_on(today),
            workouts_today: store
                .workout
                .history()
                .iter()
                .filter(|h| h.date == today)
                .count(),
            favorites: store.favorites.len(),
            session_running: store.workout.is_running(),
        }
    }

    pub fn water_ring(&self) -> f64 {
        ring_percent(self.water_ml, self.water_goal_ml)
    }

    pub fn move_ring(&self) -> f64 {
        ring_percent(self.calories, MOVE_GOAL_KCAL)
    }

    pub fn exercise_ring(&self) -> f64 {
        ring_percent(self.minutes, EXERCISE_GOAL_MIN)
    }
}

/// Workout history analytics
pub struct Analytics<'a> {
    history: &'a [HistoryEntry],
}

impl<'a> Analytics<'a> {
    pub fn new(history: &'a [HistoryEntry]) -> Self {
        Self { history }
    }

    /// Sessions in the 7 days ending on `today` (inclusive)
    fn last_week(&self, today: NaiveDate) -> impl Iterator<Item = &'a HistoryEntry> {
        let week_start = today - Duration::days(6);
        self.history
            .iter()
            .filter(move |h| h.date >= week_start && h.date <= today)
    }

    pub fn workouts_this_week(&self, today: NaiveDate) -> usize {
        self.last_week(today).count()
    }

    pub fn minutes_this_week(&self, today: NaiveDate) -> u32 {
        self.last_week(today)
            .map(HistoryEntry::minutes)
            .fold(0, u32::saturating_add)
    }

    pub fn calories_this_week(&self, today: NaiveDate) -> u32 {
        self.last_week(today)
            .map(|h| h.calories)
            .fold(0, u32::saturating_add)
    }

    /// Minutes per day for the 7 days ending on `today`, oldest first
    pub fn daily_minutes(&self, today: NaiveDate) -> Vec<(NaiveDate, u32)> {
        (0..7)
            .rev()
            .map(|days_ago| {
                let day = today - Duration::days(days_ago);
                let minutes = self
                    .history
                    .iter()
                    .filter(|h| h.date == day)
                    .map(HistoryEntry::minutes)
                    .fold(0, u32::saturating_add);
                (day, minutes)
            })
            .collect()
    }

    /// Consecutive days with at least one workout, counting back from `today`.
    /// A day without workouts yet today does not break a streak ending yesterday.
    pub fn streak_days(&self, today: NaiveDate) -> u32 {
        let trained = |day: NaiveDate| self.history.iter().any(|h| h.date == day);
        let mut day = if trained(today) {
            today
        } else {
            today - Duration::days(1)
        };
        let mut streak = 0;
        while trained(day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }

    /// Most frequently completed exercise name
    pub fn favorite_workout(&self) -> Option<&'a str> {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for h in self.history {
            *counts.entry(h.name.as_str()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name)
    }
}
