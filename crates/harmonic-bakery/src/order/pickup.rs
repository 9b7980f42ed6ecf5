//! The pickup-time rule: orders need a minimum lead time.

use chrono::{DateTime, TimeDelta, Utc};

pub const DEFAULT_LEAD_HOURS: u32 = 24;

/// Minimum distance between "now" and the requested pickup (or delivery) time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupPolicy {
    lead: TimeDelta,
}

impl PickupPolicy {
    pub fn from_hours(hours: u32) -> Self {
        Self {
            lead: TimeDelta::hours(i64::from(hours)),
        }
    }

    pub fn lead(&self) -> TimeDelta {
        self.lead
    }

    pub fn lead_hours(&self) -> i64 {
        self.lead.num_hours()
    }

    /// True iff a time is given and it is at least the lead time after `now`.
    pub fn is_valid(&self, pickup: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        pickup.is_some_and(|at| at - now >= self.lead)
    }

    /// The inline warning for a time that has been entered but is too soon. Nothing is shown
    /// while no time is entered.
    pub fn warning(&self, pickup: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
        match pickup {
            Some(_) if !self.is_valid(pickup, now) => Some(format!(
                "Must be at least {} hours in advance.",
                self.lead_hours()
            )),
            _ => None,
        }
    }
}

impl Default for PickupPolicy {
    fn default() -> Self {
        Self::from_hours(DEFAULT_LEAD_HOURS)
    }
}

/// [`PickupPolicy::is_valid`] with the standard 24 hour lead.
pub fn is_pickup_time_valid(pickup: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    PickupPolicy::default().is_valid(pickup, now)
}
