use chrono::NaiveDate;
use serde::Serialize;

/// Trailing 7-day activity window ending today. Slot 0 is today, slot 6 is
/// six days ago. Derived on every read, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekActivity {
    days: [bool; 7],
}

impl WeekActivity {
    pub fn days(&self) -> &[bool; 7] {
        &self.days
    }

    pub fn active_count(&self) -> u32 {
        self.days.iter().filter(|&&d| d).count() as u32
    }
}

/// Derive the trailing-week activity bitmap from streak state.
///
/// The most recent `current_streak` days counting back from
/// `last_active_date` are active, clipped to the 7-day window. A streak
/// whose last activity is more than one day old is treated as broken and
/// yields an empty week, matching the self-heal rule applied on load.
pub fn derive_week_activity(
    last_active_date: Option<NaiveDate>,
    current_streak: u32,
    today: NaiveDate,
) -> WeekActivity {
    let mut days = [false; 7];

    let last = match last_active_date {
        Some(last) => last,
        None => return WeekActivity { days },
    };

    let elapsed = (today - last).num_days();
    if !(0..=1).contains(&elapsed) || current_streak == 0 {
        return WeekActivity { days };
    }

    // Slot i holds the day `today - i`; active slots span the streak run
    // [last - streak + 1, last].
    for (i, slot) in days.iter_mut().enumerate() {
        let offset = i as i64;
        *slot = offset >= elapsed && offset < elapsed + current_streak as i64;
    }

    WeekActivity { days }
}
