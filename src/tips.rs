//! Tips module - short wellness advice shown on the dashboard

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipCategory {
    Fitness,
    Nutrition,
    Mental,
    Hydration,
    Sleep,
}

impl TipCategory {
    pub fn emoji(&self) -> &'static str {
        match self {
            TipCategory::Fitness => "🏋️",
            TipCategory::Nutrition => "🥗",
            TipCategory::Mental => "🧘",
            TipCategory::Hydration => "💧",
            TipCategory::Sleep => "😴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TipCategory::Fitness => "Fitness",
            TipCategory::Nutrition => "Nutrition",
            TipCategory::Mental => "Mental",
            TipCategory::Hydration => "Hydration",
            TipCategory::Sleep => "Sleep",
        }
    }
}

impl std::str::FromStr for TipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fitness" => Ok(TipCategory::Fitness),
            "nutrition" => Ok(TipCategory::Nutrition),
            "mental" => Ok(TipCategory::Mental),
            "hydration" => Ok(TipCategory::Hydration),
            "sleep" => Ok(TipCategory::Sleep),
            other => Err(format!("unknown tip category: {}", other)),
        }
    }
}

pub struct Tip {
    pub category: TipCategory,
    pub title: &'static str,
    pub text: &'static str,
}

pub const TIPS: &[Tip] = &[
    Tip {
        category: TipCategory::Hydration,
        title: "Stay Hydrated",
        text: "Around eight glasses of water a day keeps energy up and the body working well.",
    },
    Tip {
        category: TipCategory::Hydration,
        title: "Drink Before You Train",
        text: "A glass of water half an hour before a workout helps you start already hydrated.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Warm Up Properly",
        text: "Spend 5-10 minutes warming up before exercise to prevent injuries and move better.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Rest Between Sets",
        text: "30-90 seconds between sets lets muscles recover while keeping the workout quality high.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Progressive Overload",
        text: "Add a little weight, reps or intensity over time to keep progressing and avoid plateaus.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Rest Days Matter",
        text: "One or two rest days a week give the body time to recover and keep burnout away.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Form Over Weight",
        text: "Get the form right before adding weight. Sloppy form invites injury and wastes effort.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Morning Stretch",
        text: "Five to ten minutes of stretching in the morning improves flexibility and eases stiffness.",
    },
    Tip {
        category: TipCategory::Fitness,
        title: "Track Your Progress",
        text: "A workout log shows how far you have come and keeps motivation up.",
    },
    Tip {
        category: TipCategory::Nutrition,
        title: "Protein After Workout",
        text: "Protein within half an hour after training supports muscle recovery and growth.",
    },
    Tip {
        category: TipCategory::Nutrition,
        title: "Balanced Diet",
        text: "Mix whole foods: fruit, vegetables, lean protein and healthy fats.",
    },
    Tip {
        category: TipCategory::Mental,
        title: "Mindful Breathing",
        text: "Slow, deep breathing lowers stress and sharpens focus during a workout.",
    },
    Tip {
        category: TipCategory::Sleep,
        title: "Quality Sleep",
        text: "Aim for 7-9 hours a night. Sleep is when the body repairs and builds muscle.",
    },
];

/// Random tip
pub fn get_random_tip() -> &'static Tip {
    TIPS.choose(&mut rand::thread_rng()).unwrap_or(&TIPS[0])
}

/// Random tip of a given category
pub fn get_random_tip_by_category(category: TipCategory) -> Option<&'static Tip> {
    let filtered: Vec<_> = TIPS.iter().filter(|t| t.category == category).collect();
    filtered.choose(&mut rand::thread_rng()).copied()
}

/// Same tip for the whole day, rotating through the list
pub fn tip_of_the_day(date: NaiveDate) -> &'static Tip {
    &TIPS[date.num_days_from_ce().unsigned_abs() as usize % TIPS.len()]
}

pub fn format_tip(tip: &Tip) -> String {
    format!(
        "{} {} - {}\n{}",
        tip.category.emoji(),
        tip.category.name(),
        tip.title,
        tip.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TipCategory; 5] = [
        TipCategory::Fitness,
        TipCategory::Nutrition,
        TipCategory::Mental,
        TipCategory::Hydration,
        TipCategory::Sleep,
    ];

    #[test]
    fn test_tip_category_emoji_all_categories() {
        for category in ALL {
            assert!(!category.emoji().is_empty());
        }
    }

    #[test]
    fn test_tips_count() {
        assert_eq!(TIPS.len(), 13);
    }

    #[test]
    fn test_get_random_tip_never_panics() {
        for _ in 0..10 {
            let tip = get_random_tip();
            assert!(!tip.text.is_empty());
        }
    }

    #[test]
    fn test_get_random_tip_by_category_returns_correct_category() {
        for category in ALL {
            let tip = get_random_tip_by_category(category);
            assert!(tip.is_some(), "Category {:?} should have tips", category);
            assert_eq!(tip.unwrap().category, category);
        }
    }

    #[test]
    fn test_tip_of_the_day_stable_and_rotating() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(tip_of_the_day(d).title, tip_of_the_day(d).title);
        let next = d.succ_opt().unwrap();
        assert_ne!(tip_of_the_day(d).title, tip_of_the_day(next).title);
    }

    #[test]
    fn test_format_tip_contains_parts() {
        let tip = &TIPS[0];
        let formatted = format_tip(tip);
        assert!(formatted.contains(tip.category.emoji()));
        assert!(formatted.contains(tip.category.name()));
        assert!(formatted.contains(tip.title));
        assert!(formatted.contains(tip.text));
    }

    #[test]
    fn test_all_tips_have_non_empty_text() {
        for (i, tip) in TIPS.iter().enumerate() {
            assert!(!tip.text.is_empty(), "Tip {} has empty text", i);
            assert!(!tip.title.is_empty(), "Tip {} has empty title", i);
        }
    }

    #[test]
    fn test_tip_category_parse() {
        assert_eq!("Sleep".parse::<TipCategory>(), Ok(TipCategory::Sleep));
        assert_eq!("hydration".parse::<TipCategory>(), Ok(TipCategory::Hydration));
        assert!("cardio".parse::<TipCategory>().is_err());
    }
}
