//! Daily counter - an accumulator that zeroes itself the first time it is touched on a new day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounter {
    pub value: u32,
    pub last_reset: NaiveDate,
}

impl DailyCounter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            value: 0,
            last_reset: today,
        }
    }

    /// Add `amount`, resetting first if the counter belongs to an earlier day
    pub fn add(&mut self, amount: u32, today: NaiveDate) {
        self.roll_over(today);
        self.value = self.value.saturating_add(amount);
    }

    /// Subtract `amount`, flooring at zero. No date check: this undoes a same-day add.
    pub fn subtract(&mut self, amount: u32) {
        self.value = self.value.saturating_sub(amount);
    }

    /// Manual reset, regardless of date
    pub fn reset(&mut self, today: NaiveDate) {
        self.value = 0;
        self.last_reset = today;
    }

    /// Value as seen on `today`, without mutating. A stale counter reads as zero.
    pub fn value_on(&self, today: NaiveDate) -> u32 {
        if self.last_reset == today { self.value } else { 0 }
    }

    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.last_reset != today
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if self.is_stale(today) {
            self.reset(today);
        }
    }
}
