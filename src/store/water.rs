//! Water intake - daily goal plus a self-resetting consumption counter (ml)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::counter::DailyCounter;
use crate::clock::Clock;

/// Default daily goal: 2 liters
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;

/// Quick-add glass sizes offered by the front ends
pub const QUICK_ADD_ML: &[u32] = &[250, 350, 500, 750, 1000];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterState {
    pub daily_goal: u32,
    pub consumed: DailyCounter,
}

impl WaterState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL_ML,
            consumed: DailyCounter::new(today),
        }
    }

    pub fn add(&mut self, ml: u32, clock: &impl Clock) {
        self.consumed.add(ml, clock.today());
    }

    pub fn subtract(&mut self, ml: u32) {
        self.consumed.subtract(ml);
    }

    pub fn set_goal(&mut self, ml: u32) {
        self.daily_goal = ml;
    }

    pub fn reset_daily(&mut self, clock: &impl Clock) {
        self.consumed.reset(clock.today());
    }

    /// Consumed today; a counter left over from an earlier day reads as zero
    pub fn consumed_today(&self, today: NaiveDate) -> u32 {
        self.consumed.value_on(today)
    }

    /// Progress toward the goal in percent. Not clamped: can exceed 100.
    pub fn percent_of_goal(&self, today: NaiveDate) -> f64 {
        if self.daily_goal == 0 {
            return 0.0;
        }
        self.consumed_today(today) as f64 / self.daily_goal as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::ManualClock;

    fn setup() -> (ManualClock, WaterState) {
        let clock = ManualClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let water = WaterState::new(clock.today());
        (clock, water)
    }

    #[test]
    fn test_defaults() {
        let (_, water) = setup();
        assert_eq!(water.daily_goal, 2000);
        assert_eq!(water.consumed.value, 0);
    }

    #[test]
    fn test_add_and_subtract() {
        let (clock, mut water) = setup();
        water.add(500, &clock);
        water.add(250, &clock);
        water.subtract(250);
        assert_eq!(water.consumed.value, 500);
    }

    #[test]
    fn test_subtract_more_than_consumed() {
        let (clock, mut water) = setup();
        water.add(200, &clock);
        water.subtract(1000);
        assert_eq!(water.consumed.value, 0);
    }

    #[test]
    fn test_add_after_midnight_resets() {
        let (clock, mut water) = setup();
        water.add(1800, &clock);
        clock.advance(Duration::days(1));
        water.add(350, &clock);
        assert_eq!(water.consumed.value, 350);
        assert_eq!(water.consumed.last_reset, clock.today());
    }

    #[test]
    fn test_percent_not_clamped() {
        let (clock, mut water) = setup();
        water.set_goal(1000);
        water.add(1500, &clock);
        assert_eq!(water.percent_of_goal(clock.today()), 150.0);
    }

    #[test]
    fn test_percent_zero_goal() {
        let (clock, mut water) = setup();
        water.set_goal(0);
        water.add(100, &clock);
        assert_eq!(water.percent_of_goal(clock.today()), 0.0);
    }

    #[test]
    fn test_reset_daily() {
        let (clock, mut water) = setup();
        water.add(900, &clock);
        clock.advance(Duration::days(2));
        water.reset_daily(&clock);
        assert_eq!(water.consumed.value, 0);
        assert_eq!(water.consumed.last_reset, clock.today());
    }

    #[test]
    fn test_consumed_today_stale() {
        let (clock, mut water) = setup();
        water.add(700, &clock);
        clock.advance(Duration::days(1));
        assert_eq!(water.consumed_today(clock.today()), 0);
    }
}
