use serde::Serialize;

/// A named streak-length threshold used to trigger celebratory UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub streak: u32,
    pub title: &'static str,
    pub emblem: &'static str,
}

const MILESTONES: [Milestone; 7] = [
    Milestone {
        streak: 3,
        title: "First Spark",
        emblem: "🔥",
    },
    Milestone {
        streak: 7,
        title: "Week Warrior",
        emblem: "⚔️",
    },
    Milestone {
        streak: 14,
        title: "Fortnight Force",
        emblem: "⚡",
    },
    Milestone {
        streak: 21,
        title: "Habit Builder",
        emblem: "🧱",
    },
    Milestone {
        streak: 30,
        title: "Monthly Master",
        emblem: "🏆",
    },
    Milestone {
        streak: 50,
        title: "Halfway Hero",
        emblem: "🌟",
    },
    Milestone {
        streak: 100,
        title: "Century Club",
        emblem: "💯",
    },
];

/// Milestone reached exactly at `current_streak`, if any.
/// Fires once per streak run because it requires an exact match.
pub fn check_milestone(current_streak: u32) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.streak == current_streak)
}

/// Next milestone strictly above `current_streak`, if one remains
pub fn next_milestone(current_streak: u32) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.streak > current_streak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_milestone_exact_thresholds() {
        for streak in [3, 7, 14, 21, 30, 50, 100] {
            let milestone = check_milestone(streak).expect("threshold should match");
            assert_eq!(milestone.streak, streak);
        }
    }

    #[test]
    fn test_check_milestone_misses_between_thresholds() {
        for streak in [0, 1, 2, 4, 6, 8, 15, 29, 31, 99, 101, 500] {
            assert!(check_milestone(streak).is_none(), "streak {}", streak);
        }
    }

    #[test]
    fn test_week_warrior_at_seven() {
        let milestone = check_milestone(7).unwrap();
        assert_eq!(milestone.title, "Week Warrior");
    }

    #[test]
    fn test_next_milestone_progression() {
        assert_eq!(next_milestone(0).unwrap().streak, 3);
        assert_eq!(next_milestone(3).unwrap().streak, 7);
        assert_eq!(next_milestone(42).unwrap().streak, 50);
        assert!(next_milestone(100).is_none());
    }
}
