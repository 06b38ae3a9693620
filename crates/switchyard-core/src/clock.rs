//! Calendar date source for daily quota resets.

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{Datelike, NaiveDate};

/// Supplies "today" to the quota tracker.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date. Quotas refill at local midnight.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    days_from_ce: AtomicI32,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            days_from_ce: AtomicI32::new(date.num_days_from_ce()),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.days_from_ce
            .store(date.num_days_from_ce(), Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i32) {
        self.days_from_ce.fetch_add(days, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.days_from_ce.load(Ordering::SeqCst))
            .unwrap_or_default()
    }
}
