//! Workout tracking - single active session, completed history and today's totals
//!
//! Lifecycle: `Idle` -> `start` -> `Running` -> (`complete` | `cancel`) -> `Idle`.
//! Progress ticks come from an external one-second timer (see [`crate::timer`]).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::counter::DailyCounter;
use crate::clock::Clock;

/// Placeholder linear model: kcal burned per minute of activity
pub const CALORIES_PER_MINUTE: u64 = 5;

/// Calorie estimate for an elapsed time: `floor(elapsed_secs / 60 * 5)`
pub fn estimate_calories(elapsed_secs: u64) -> u32 {
    let calories = elapsed_secs.saturating_mul(CALORIES_PER_MINUTE) / 60;
    u32::try_from(calories).unwrap_or(u32::MAX)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a workout session is already active: {name}")]
    AlreadyActive { name: String },
    #[error("no workout session is running")]
    NotRunning,
}

/// In-progress workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: String,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
    pub calories: u32,
    /// Calendar date the session started on
    pub date: NaiveDate,
}

/// Finalized session, immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Duration in seconds
    pub duration: u64,
    pub calories: u32,
    pub date: NaiveDate,
}

impl HistoryEntry {
    pub fn minutes(&self) -> u32 {
        u32::try_from(self.duration / 60).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutState {
    active: Option<ActiveSession>,
    history: Vec<HistoryEntry>,
    pub calories_today: DailyCounter,
    pub minutes_today: DailyCounter,
}

impl WorkoutState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            active: None,
            history: Vec::new(),
            calories_today: DailyCounter::new(today),
            minutes_today: DailyCounter::new(today),
        }
    }

    /// Begin a session. Refuses to replace a session that is still running.
    pub fn start(&mut self, name: &str, clock: &impl Clock) -> Result<&ActiveSession, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyActive {
                name: active.name.clone(),
            });
        }

        let now = clock.now();
        info!("Workout started: {}", name);
        Ok(&*self.active.insert(ActiveSession {
            id: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            name: name.to_string(),
            started_at: now,
            ended_at: None,
            elapsed_secs: 0,
            calories: 0,
            date: clock.today(),
        }))
    }

    /// Overwrite progress of the running session; no-op when idle
    pub fn tick(&mut self, elapsed_secs: u64, calories: u32) {
        if let Some(active) = self.active.as_mut() {
            active.elapsed_secs = elapsed_secs;
            active.calories = calories;
        }
    }

    /// Finalize the running session into history. Today's totals only count
    /// a session that started on the current date.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<&HistoryEntry, SessionError> {
        let mut session = self.active.take().ok_or(SessionError::NotRunning)?;
        let ended_at = clock.now();
        session.ended_at = Some(ended_at);

        let entry = HistoryEntry {
            id: session.id,
            name: session.name,
            started_at: session.started_at,
            ended_at,
            duration: session.elapsed_secs,
            calories: session.calories,
            date: session.date,
        };

        let today = clock.today();
        if entry.date == today {
            self.calories_today.add(entry.calories, today);
            self.minutes_today.add(entry.minutes(), today);
        }

        info!(
            "Workout completed: {} ({}s, {} kcal)",
            entry.name, entry.duration, entry.calories
        );
        self.history.insert(0, entry);
        Ok(&self.history[0])
    }

    /// Drop the running session without recording anything
    pub fn cancel(&mut self) -> Result<ActiveSession, SessionError> {
        let session = self.active.take().ok_or(SessionError::NotRunning)?;
        info!("Workout cancelled: {}", session.name);
        Ok(session)
    }

    pub fn reset_daily_stats(&mut self, clock: &impl Clock) {
        let today = clock.today();
        self.calories_today.reset(today);
        self.minutes_today.reset(today);
    }

    pub fn clear_history(&mut self, clock: &impl Clock) {
        self.history.clear();
        self.reset_daily_stats(clock);
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Completed sessions, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
