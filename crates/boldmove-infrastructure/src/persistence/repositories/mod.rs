mod streak_store;

pub use streak_store::SqliteStreakStore;
