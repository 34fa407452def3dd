mod streak_dto;

pub use streak_dto::{
    MilestoneDto, RecordOutcomeDto, StreakDto, StreakStatusDto, WeekActivityDto,
};
