mod streak_sync;

pub use streak_sync::HttpStreakSync;
