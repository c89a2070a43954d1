//! Session ticker - feeds elapsed time and calories into the running workout every second

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clock::Clock;
use crate::store::{AppStore, estimate_calories};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Bring the running session up to date with the clock. Returns `false` when idle.
pub fn tick_now<C: Clock>(store: &mut AppStore<C>) -> bool {
    let Some(started_at) = store.workout.active().map(|s| s.started_at) else {
        return false;
    };
    let elapsed = (store.clock().now() - started_at).num_seconds().max(0) as u64;
    store.tick_workout(elapsed, estimate_calories(elapsed));
    true
}

/// Background task driving `tick` on the active session. The task ends by itself
/// once no session is running; dropping the handle aborts it.
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    pub fn spawn<C>(store: Arc<Mutex<AppStore<C>>>) -> Self
    where
        C: Clock + Send + 'static,
    {
        Self::spawn_with_period(store, TICK_PERIOD)
    }

    pub fn spawn_with_period<C>(store: Arc<Mutex<AppStore<C>>>, period: Duration) -> Self
    where
        C: Clock + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if !tick_now(&mut *store.lock().await) {
                    debug!("No running session, ticker stopping");
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Abort and wait until the task has released the store
    pub async fn shutdown(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::ManualClock;

    const FAST: Duration = Duration::from_millis(10);

    fn shared_store() -> Arc<Mutex<AppStore<ManualClock>>> {
        let clock = ManualClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        Arc::new(Mutex::new(AppStore::with_clock(clock)))
    }

    #[tokio::test]
    async fn test_ticker_updates_running_session() {
        let store = shared_store();
        {
            let mut s = store.lock().await;
            s.start_workout("Plank").unwrap();
            s.clock().advance(chrono::Duration::seconds(120));
        }

        let ticker = SessionTicker::spawn_with_period(store.clone(), FAST);
        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let s = store.lock().await;
            let active = s.workout.active().unwrap();
            assert_eq!(active.elapsed_secs, 120);
            assert_eq!(active.calories, 10);
        }
        ticker.stop();
    }

    #[tokio::test]
    async fn test_ticker_stops_when_session_ends() {
        let store = shared_store();
        store.lock().await.start_workout("Run").unwrap();

        let ticker = SessionTicker::spawn_with_period(store.clone(), FAST);
        tokio::time::sleep(Duration::from_millis(30)).await;
        store.lock().await.cancel_workout().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(ticker.is_finished());
    }

    #[tokio::test]
    async fn test_shutdown_releases_store() {
        let store = shared_store();
        store.lock().await.start_workout("Run").unwrap();
        let ticker = SessionTicker::spawn_with_period(store.clone(), FAST);
        tokio::time::sleep(Duration::from_millis(30)).await;
        ticker.shutdown().await;
        assert_eq!(Arc::strong_count(&store), 1);
    }

    #[test]
    fn test_tick_now() {
        let mut store = AppStore::with_clock(ManualClock::at_date(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ));
        assert!(!tick_now(&mut store));
        store.start_workout("Run").unwrap();
        store.clock().advance(chrono::Duration::seconds(300));
        assert!(tick_now(&mut store));
        let active = store.workout.active().unwrap();
        assert_eq!(active.elapsed_secs, 300);
        assert_eq!(active.calories, 25);
    }

    #[tokio::test]
    async fn test_ticker_on_idle_store_exits() {
        let store = shared_store();
        let ticker = SessionTicker::spawn_with_period(store, FAST);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(ticker.is_finished());
    }
}
