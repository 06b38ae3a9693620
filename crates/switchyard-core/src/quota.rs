//! Daily quota tracking for the fallback router.
//!
//! Each provider has a request counter that resets lazily on the first
//! access after the calendar date changes. There is no background timer.
//! Counters live in a `DashMap` so concurrent routing sweeps can share them;
//! admission and reservation happen under one entry lock, so two sweeps
//! cannot both pass admission and jointly exceed a daily limit.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::clock::Clock;
use crate::provider::registry::ProviderRegistry;

/// Mutable per-provider counters.
#[derive(Debug, Clone)]
struct QuotaEntry {
    requests_today: u32,
    in_flight: u32,
    last_reset: NaiveDate,
}

impl QuotaEntry {
    fn reset_if_stale(&mut self, today: NaiveDate) {
        if self.last_reset < today {
            self.requests_today = 0;
            self.last_reset = today;
        }
    }
}

/// Read-only copy of a provider's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSnapshot {
    /// Successful requests recorded since `last_reset`.
    pub requests_today: u32,
    /// Attempts currently holding a reservation.
    pub in_flight: u32,
    pub last_reset: NaiveDate,
}

/// Per-provider daily usage counters with admission checks.
pub struct QuotaTracker {
    registry: Arc<ProviderRegistry>,
    entries: DashMap<String, QuotaEntry>,
    clock: Arc<dyn Clock>,
}

impl QuotaTracker {
    /// Create a tracker with a zeroed counter for every registered provider.
    pub fn new(registry: Arc<ProviderRegistry>, clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        let entries = registry
            .keys()
            .map(|key| {
                (
                    key.to_string(),
                    QuotaEntry {
                        requests_today: 0,
                        in_flight: 0,
                        last_reset: today,
                    },
                )
            })
            .collect();

        Self {
            registry,
            entries,
            clock,
        }
    }

    /// Zero the provider's counter if its last reset precedes today.
    pub fn check_and_maybe_reset(&self, key: &str) {
        let today = self.clock.today();
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.reset_if_stale(today);
        }
    }

    /// Apply the lazy reset to every provider.
    pub fn check_and_maybe_reset_all(&self) {
        let today = self.clock.today();
        for mut entry in self.entries.iter_mut() {
            entry.reset_if_stale(today);
        }
    }

    /// Whether the provider may be attempted right now.
    ///
    /// False when the provider is unknown, has no credential, or has a
    /// daily limit that is already used up (counting in-flight attempts).
    pub fn is_admissible(&self, key: &str) -> bool {
        let Some(descriptor) = self.registry.get(key) else {
            return false;
        };
        if !descriptor.is_configured() {
            return false;
        }
        let today = self.clock.today();
        let Some(mut entry) = self.entries.get_mut(key) else {
            return false;
        };
        entry.reset_if_stale(today);
        has_headroom(&entry, descriptor.daily_limit)
    }

    /// Count one successful request against today's quota.
    pub fn record_use(&self, key: &str) {
        let today = self.clock.today();
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.reset_if_stale(today);
            entry.requests_today = entry.requests_today.saturating_add(1);
        }
    }

    /// Atomically admit the provider and hold one unit of its quota.
    ///
    /// Returns `None` when the provider is not admissible. The slot is
    /// released when the reservation drops, unless it was committed.
    pub fn try_reserve(&self, key: &str) -> Option<QuotaReservation<'_>> {
        let descriptor = self.registry.get(key)?;
        if !descriptor.is_configured() {
            return None;
        }
        let today = self.clock.today();
        let mut entry = self.entries.get_mut(key)?;
        entry.reset_if_stale(today);
        if !has_headroom(&entry, descriptor.daily_limit) {
            return None;
        }
        entry.in_flight += 1;

        Some(QuotaReservation {
            tracker: self,
            key: key.to_string(),
            settled: false,
        })
    }

    /// Current counters for a provider, after applying the lazy reset.
    pub fn snapshot(&self, key: &str) -> Option<QuotaSnapshot> {
        let today = self.clock.today();
        let mut entry = self.entries.get_mut(key)?;
        entry.reset_if_stale(today);
        Some(QuotaSnapshot {
            requests_today: entry.requests_today,
            in_flight: entry.in_flight,
            last_reset: entry.last_reset,
        })
    }

    fn release(&self, key: &str, consumed: bool) {
        let today = self.clock.today();
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.reset_if_stale(today);
            entry.in_flight = entry.in_flight.saturating_sub(1);
            if consumed {
                entry.requests_today = entry.requests_today.saturating_add(1);
            }
        }
    }
}

impl std::fmt::Debug for QuotaTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaTracker")
            .field("providers", &self.entries.len())
            .field("today", &self.clock.today())
            .finish()
    }
}

fn has_headroom(entry: &QuotaEntry, limit: Option<u32>) -> bool {
    match limit {
        Some(limit) => entry.requests_today.saturating_add(entry.in_flight) < limit,
        None => true,
    }
}

/// One reserved unit of a provider's daily quota.
///
/// Call [`commit`](Self::commit) after the attempt succeeds. Dropping an
/// uncommitted reservation (failure, timeout, cancellation) gives the unit
/// back without touching the consumed count.
#[derive(Debug)]
pub struct QuotaReservation<'a> {
    tracker: &'a QuotaTracker,
    key: String,
    settled: bool,
}

impl QuotaReservation<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Convert the reservation into one recorded use.
    pub fn commit(mut self) {
        self.settled = true;
        self.tracker.release(&self.key, true);
    }
}

impl Drop for QuotaReservation<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.tracker.release(&self.key, false);
        }
    }
}
