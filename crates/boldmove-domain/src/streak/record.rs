use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of applying a day of activity to a [`StreakRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityUpdate {
    /// Activity was already recorded for this calendar day; nothing changed
    AlreadyRecorded,
    /// A new streak started at 1 (no prior activity, or a gap of 2+ days)
    Started,
    /// Yesterday was active, so the running streak grew by one day
    Extended,
}

impl ActivityUpdate {
    pub fn is_no_op(&self) -> bool {
        matches!(self, ActivityUpdate::AlreadyRecorded)
    }
}

/// Per-user streak state. One instance per user, mutated at most once per
/// calendar day by [`StreakRecord::record_activity`].
///
/// Invariant: `longest_streak >= current_streak` after every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    current_streak: u32,
    longest_streak: u32,
    last_active_date: Option<NaiveDate>,
    total_active_days: u32,
}

impl StreakRecord {
    /// Zero-valued record for a user with no prior activity
    pub fn new() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_active_date: None,
            total_active_days: 0,
        }
    }

    /// Rebuild a record from persisted state (repository use)
    pub fn restore(
        current_streak: u32,
        longest_streak: u32,
        last_active_date: Option<NaiveDate>,
        total_active_days: u32,
    ) -> Self {
        Self {
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_active_date,
            total_active_days,
        }
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_active_date(&self) -> Option<NaiveDate> {
        self.last_active_date
    }

    pub fn total_active_days(&self) -> u32 {
        self.total_active_days
    }

    /// Apply one qualifying action performed on `today`.
    ///
    /// Consecutive-day activity extends the streak, a gap restarts it at 1,
    /// and a second action on the same day is a no-op.
    pub fn record_activity(&mut self, today: NaiveDate) -> ActivityUpdate {
        let update = match self.last_active_date {
            Some(last) if last == today => return ActivityUpdate::AlreadyRecorded,
            Some(last) if (today - last).num_days() == 1 => {
                self.current_streak += 1;
                ActivityUpdate::Extended
            }
            _ => {
                self.current_streak = 1;
                ActivityUpdate::Started
            }
        };

        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.total_active_days += 1;
        self.last_active_date = Some(today);

        update
    }

    /// True when no activity can still extend the current streak: more than
    /// one day has passed since the last active date.
    pub fn is_streak_broken(&self, today: NaiveDate) -> bool {
        match self.last_active_date {
            Some(last) => (today - last).num_days() > 1,
            None => false,
        }
    }

    /// Self-healing applied when a record is loaded: a streak broken by a
    /// gap of 2+ days collapses to 0 before anything is derived from it.
    /// Longest streak, total days and the last active date are preserved.
    ///
    /// Returns true when the record was changed.
    pub fn self_heal(&mut self, today: NaiveDate) -> bool {
        if self.current_streak > 0 && self.is_streak_broken(today) {
            self.current_streak = 0;
            true
        } else {
            false
        }
    }

    /// Explicit reset back to the zero state (testing/debugging affordance)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for StreakRecord {
    fn default() -> Self {
        Self::new()
    }
}
