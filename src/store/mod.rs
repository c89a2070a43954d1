//! Application store - every persisted slice behind one explicitly constructed object
//!
//! Front ends build one `AppStore` at startup, rehydrate it through
//! [`crate::persist::PersistenceGateway`] and pass it wherever intents are
//! dispatched. Every mutation is a synchronous reducer call.

pub mod auth;
pub mod counter;
pub mod favorites;
pub mod water;
pub mod workout;

pub use auth::{AuthState, User};
pub use counter::DailyCounter;
pub use favorites::{FavoriteEntry, FavoritesState};
pub use water::{QUICK_ADD_ML, WaterState};
pub use workout::{ActiveSession, HistoryEntry, SessionError, WorkoutState, estimate_calories};

use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::exercises::Exercise;
use crate::persist::Envelope;

/// Root store: all persisted slices plus the clock they read time from
#[derive(Debug)]
pub struct AppStore<C: Clock = SystemClock> {
    clock: C,
    pub auth: AuthState,
    pub favorites: FavoritesState,
    pub water: WaterState,
    pub workout: WorkoutState,
}

impl AppStore<SystemClock> {
    pub fn init() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> AppStore<C> {
    /// Store with every slice at its initial default
    pub fn with_clock(clock: C) -> Self {
        let today = clock.today();
        Self {
            clock,
            auth: AuthState::default(),
            favorites: FavoritesState::default(),
            water: WaterState::new(today),
            workout: WorkoutState::new(today),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // --- favorites ---

    pub fn toggle_favorite(&mut self, exercise: &Exercise) -> bool {
        self.favorites.toggle(exercise, &self.clock)
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        self.favorites.remove(id)
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }

    // --- water ---

    pub fn add_water(&mut self, ml: u32) {
        self.water.add(ml, &self.clock);
    }

    pub fn remove_water(&mut self, ml: u32) {
        self.water.subtract(ml);
    }

    pub fn set_water_goal(&mut self, ml: u32) {
        self.water.set_goal(ml);
    }

    pub fn reset_water(&mut self) {
        self.water.reset_daily(&self.clock);
    }

    // --- workout ---

    pub fn start_workout(&mut self, name: &str) -> Result<&ActiveSession, SessionError> {
        self.workout.start(name, &self.clock)
    }

    pub fn tick_workout(&mut self, elapsed_secs: u64, calories: u32) {
        self.workout.tick(elapsed_secs, calories);
    }

    pub fn complete_workout(&mut self) -> Result<&HistoryEntry, SessionError> {
        self.workout.complete(&self.clock)
    }

    pub fn cancel_workout(&mut self) -> Result<ActiveSession, SessionError> {
        self.workout.cancel()
    }

    pub fn reset_workout_stats(&mut self) {
        self.workout.reset_daily_stats(&self.clock);
    }

    pub fn clear_workout_history(&mut self) {
        self.workout.clear_history(&self.clock);
    }

    // --- auth ---

    pub fn login(&mut self, user: User, token: String) {
        self.auth.set_credentials(user, token);
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    /// Reset every slice to its initial default, as done before a purge
    pub fn clear_all_data(&mut self) {
        let today = self.clock.today();
        self.auth = AuthState::default();
        self.favorites = FavoritesState::default();
        self.water = WaterState::new(today);
        self.workout = WorkoutState::new(today);
        info!("All local data cleared");
    }

    /// Copy of the persisted slices
    pub fn snapshot(&self) -> Envelope {
        Envelope::new(
            self.auth.clone(),
            self.favorites.clone(),
            self.water,
            self.workout.clone(),
        )
    }

    /// Replace the persisted slices with the content of an envelope
    pub fn restore(&mut self, envelope: Envelope) {
        self.auth = envelope.auth;
        self.favorites = envelope.favorites;
        self.water = envelope.water;
        self.workout = envelope.workout;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::ManualClock;
    use crate::exercises::sample_exercise;
    use crate::store::auth::sample_user;

    fn store() -> AppStore<ManualClock> {
        AppStore::with_clock(ManualClock::at_date(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = store();
        assert!(store.favorites.is_empty());
        assert_eq!(store.water.consumed.value, 0);
        assert!(store.workout.active().is_none());
        assert!(!store.auth.is_authenticated());
    }

    #[test]
    fn test_push_ups_scenario() {
        let mut store = store();
        store.start_workout("Push-ups").unwrap();
        store.tick_workout(300, 25);
        store.complete_workout().unwrap();

        let last = &store.workout.history()[0];
        assert_eq!(last.name, "Push-ups");
        assert_eq!(last.duration, 300);
        assert_eq!(last.calories, 25);
        assert!(store.workout.active().is_none());
    }

    #[test]
    fn test_clear_all_data() {
        let mut store = store();
        store.login(sample_user("emilys"), "t".into());
        store.toggle_favorite(&sample_exercise("Plank", "abdominals", "strength"));
        store.add_water(750);
        store.start_workout("Run").unwrap();
        store.tick_workout(120, 10);
        store.complete_workout().unwrap();

        store.clear_all_data();

        let fresh = self::store();
        assert_eq!(store.snapshot(), fresh.snapshot());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut a = store();
        a.toggle_favorite(&sample_exercise("Plank", "abdominals", "strength"));
        a.add_water(500);
        a.set_water_goal(2500);

        let mut b = store();
        b.restore(a.snapshot());
        assert_eq!(b.snapshot(), a.snapshot());
        assert_eq!(b.water.daily_goal, 2500);
    }
}
