use serde::{Deserialize, Serialize};

use boldmove_domain::shared::UserId;
use boldmove_domain::streak::{Milestone, StreakRecord, WeekActivity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_days: u32,
    pub last_active_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
}

impl StreakDto {
    pub fn from_record(user_id: &UserId, record: &StreakRecord) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            current_streak: record.current_streak(),
            longest_streak: record.longest_streak(),
            total_active_days: record.total_active_days(),
            last_active_date: record
                .last_active_date()
                .map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Trailing week, index 0 = today
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekActivityDto {
    pub days: Vec<bool>,
    pub active_count: u32,
}

impl From<WeekActivity> for WeekActivityDto {
    fn from(week: WeekActivity) -> Self {
        Self {
            days: week.days().to_vec(),
            active_count: week.active_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneDto {
    pub streak: u32,
    pub title: String,
    pub emblem: String,
}

impl From<&Milestone> for MilestoneDto {
    fn from(milestone: &Milestone) -> Self {
        Self {
            streak: milestone.streak,
            title: milestone.title.to_string(),
            emblem: milestone.emblem.to_string(),
        }
    }
}

/// Result of a record-activity call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcomeDto {
    pub streak: StreakDto,
    pub already_recorded: bool,
    pub milestone: Option<MilestoneDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakStatusDto {
    pub streak: StreakDto,
    pub week: WeekActivityDto,
    pub active_today: bool,
    pub next_milestone: Option<MilestoneDto>,
}
