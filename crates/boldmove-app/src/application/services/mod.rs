mod streak_service;

pub use streak_service::StreakService;
