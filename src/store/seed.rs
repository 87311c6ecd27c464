//! Sample categories and ideas the application starts with.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Category, CategoryColor, Idea, Snapshot};

fn category(id: &str, name: &str, color: CategoryColor) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color,
    }
}

pub fn seed_categories() -> Vec<Category> {
    vec![
        category("1", "Work", CategoryColor::Purple),
        category("2", "Personal", CategoryColor::Blue),
        category("3", "Project", CategoryColor::Green),
        category("4", "Inspiration", CategoryColor::Yellow),
        category("5", "Learning", CategoryColor::Pink),
    ]
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn idea(id: &str, title: &str, content: &str, pinned: bool, categories: &[&str], at: DateTime<Utc>) -> Idea {
    Idea {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        is_pinned: pinned,
        category_ids: categories.iter().map(|c| c.to_string()).collect(),
        created_at: at,
        updated_at: at,
    }
}

pub fn seed_ideas() -> Vec<Idea> {
    vec![
        idea(
            "1",
            "New Marketing Strategy",
            "Develop a content marketing strategy focused on educational blog posts and video tutorials.",
            true,
            &["1"],
            day(2023, 4, 15),
        ),
        idea(
            "2",
            "Learn TypeScript",
            "Find a comprehensive TypeScript course on Udemy or Coursera.",
            false,
            &["5"],
            day(2023, 4, 10),
        ),
        idea(
            "3",
            "New App Idea: Recipe Manager",
            "Create an app that lets users save recipes from websites and organizes them into collections.",
            false,
            &["3", "4"],
            day(2023, 4, 5),
        ),
        idea(
            "4",
            "Birthday Gift for Mom",
            "Find a nice photo frame or custom photo album for her birthday next month.",
            true,
            &["2"],
            day(2023, 3, 28),
        ),
        idea(
            "5",
            "Website Redesign Concepts",
            "Explore minimalist design principles for the upcoming website refresh project.",
            false,
            &["1", "3"],
            day(2023, 3, 20),
        ),
    ]
}

/// Revision 0 snapshot holding the sample data.
pub fn seeded_snapshot(now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        ideas: seed_ideas(),
        categories: seed_categories(),
        ..Snapshot::empty(now)
    }
}
