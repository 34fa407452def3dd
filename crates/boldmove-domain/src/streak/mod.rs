mod milestone;
mod record;
mod repository;
mod week_activity;


pub use milestone::{check_milestone, next_milestone, Milestone};
pub use record::{ActivityUpdate, StreakRecord};
pub use repository::{RemoteStreakSync, StreakStore};
pub use week_activity::{derive_week_activity, WeekActivity};
