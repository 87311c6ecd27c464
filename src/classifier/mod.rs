//! Keyword classifier used by the assist and auto-tag actions.
//!
//! This is a fixed lookup table, not a model: inputs are lowercased and
//! checked for substrings, and the outputs are canned. Keyword lists and
//! labels must stay as they are for existing drafts to classify the same way.

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::models::Category;

pub const APPLICATION_PARAGRAPH: &str = "This application idea could address user needs in the current market. Consider researching similar applications to identify unique selling points and potential differentiators. The next steps might include creating wireframes, defining user stories, and planning technical architecture.";

pub const DESIGN_PARAGRAPH: &str = "This design concept should focus on user experience and visual hierarchy. Consider creating a mood board for inspiration and establish a consistent design system. User testing will be crucial to validate the design decisions.";

pub const WRITING_PARAGRAPH: &str = "For this writing project, outline key points to cover and identify the target audience. Research similar articles to find content gaps you can fill. Consider adding unique perspectives or data to make your content stand out.";

pub const MEETING_PARAGRAPH: &str = "This meeting should have a clear agenda with time allocations for each topic. Prepare relevant materials in advance and consider who needs to attend. Send a summary of decisions and action items afterward.";

pub const GENERIC_PARAGRAPH: &str = "This idea has potential for development. Consider defining specific goals, timelines, and resources needed. Breaking it down into smaller tasks might help with implementation. Researching similar concepts could provide valuable insights.";

/// Title keyword groups in priority order. First match wins.
const CONTENT_RULES: &[(&[&str], &str)] = &[
    (&["app", "application"], APPLICATION_PARAGRAPH),
    (&["design", "ui", "ux"], DESIGN_PARAGRAPH),
    (&["blog", "article", "write"], WRITING_PARAGRAPH),
    (&["meeting", "team", "project"], MEETING_PARAGRAPH),
];

/// Auto-tag table: category label -> keywords searched in title and content.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("work", &["client", "meeting", "deadline", "presentation", "report"]),
    ("personal", &["family", "home", "personal", "health", "hobby"]),
    (
        "project",
        &["develop", "build", "create", "launch", "project", "app", "website"],
    ),
    (
        "inspiration",
        &["idea", "inspiration", "creative", "concept", "innovative", "vision"],
    ),
    (
        "learning",
        &["learn", "study", "course", "tutorial", "training", "skill"],
    ),
];

/// Quick-capture assist table: category label -> keywords searched in the title only.
const TITLE_CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("work", &["work", "meeting", "client", "project"]),
    ("learning", &["learn", "study", "course"]),
    ("project", &["app", "design", "develop", "build"]),
    ("inspiration", &["idea", "creative", "innovation"]),
];

const REMINDER_KEYWORDS: &[&str] = &["email", "send"];
const REMINDER_HOUR: u32 = 9;

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Canned paragraph for a draft title.
pub fn suggest_content(title: &str) -> &'static str {
    let title = title.to_lowercase();
    CONTENT_RULES
        .iter()
        .find(|(keywords, _)| contains_any(&title, keywords))
        .map(|(_, paragraph)| *paragraph)
        .unwrap_or(GENERIC_PARAGRAPH)
}

/// Ids of the categories whose label keywords occur in `title` or `content`.
///
/// Only categories named after one of the five known labels (case-insensitive)
/// are candidates. Result follows category order and has no duplicates.
pub fn suggest_categories(title: &str, content: &str, categories: &[Category]) -> Vec<String> {
    let text = format!("{} {}", title, content).to_lowercase();

    categories
        .iter()
        .filter(|category| {
            let name = category.name.to_lowercase();
            CATEGORY_RULES
                .iter()
                .any(|(label, keywords)| *label == name && contains_any(&text, keywords))
        })
        .map(|category| category.id.clone())
        .collect()
}

/// Title-only suggestion used by the assist action.
///
/// Each matching label resolves to the first category carrying that name.
pub fn suggest_title_categories(title: &str, categories: &[Category]) -> Vec<String> {
    let title = title.to_lowercase();
    let mut ids: Vec<String> = Vec::new();

    for (label, keywords) in TITLE_CATEGORY_RULES {
        if !contains_any(&title, keywords) {
            continue;
        }
        if let Some(category) = categories.iter().find(|c| c.name.to_lowercase() == *label) {
            if !ids.contains(&category.id) {
                ids.push(category.id.clone());
            }
        }
    }

    ids
}

/// Suggest a reminder at 09:00 the next day when the content reads like an errand.
pub fn suggest_reminder<Tz: TimeZone>(content: &str, now: &DateTime<Tz>) -> Option<NaiveDateTime> {
    if !contains_any(&content.to_lowercase(), REMINDER_KEYWORDS) {
        return None;
    }
    now.date_naive().succ_opt()?.and_hms_opt(REMINDER_HOUR, 0, 0)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::CategoryColor;
    use crate::store::seed::seed_categories;

    #[test]
    fn test_suggest_content_application() {
        assert_eq!(suggest_content("New App Idea"), APPLICATION_PARAGRAPH);
    }

    #[test]
    fn test_suggest_content_fallback() {
        assert_eq!(suggest_content("Random thought"), GENERIC_PARAGRAPH);
    }

    #[test]
    fn test_suggest_content_priority_order() {
        // "design" and "team" both match; design is listed first.
        assert_eq!(suggest_content("Team design sync"), DESIGN_PARAGRAPH);
        assert_eq!(suggest_content("Blog about the project"), WRITING_PARAGRAPH);
        assert_eq!(suggest_content("Quarterly TEAM offsite"), MEETING_PARAGRAPH);
    }

    #[test]
    fn test_suggest_categories_work() {
        let categories = seed_categories();
        let ids = suggest_categories("Team meeting with client", "", &categories);
        assert_eq!(ids, vec!["1".to_string()]);
    }

    #[test]
    fn test_suggest_categories_learning() {
        let categories = seed_categories();
        let ids = suggest_categories("Learn TypeScript with a course", "", &categories);
        assert_eq!(ids, vec!["5".to_string()]);
    }

    #[test]
    fn test_suggest_categories_uses_content() {
        let categories = seed_categories();
        let ids = suggest_categories(
            "Weekend",
            "Build a treehouse with the family",
            &categories,
        );
        assert_eq!(ids, vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_suggest_categories_ignores_unknown_labels() {
        let categories = vec![
            Category {
                id: "x".to_string(),
                name: "Errands".to_string(),
                color: CategoryColor::Orange,
            },
            Category {
                id: "y".to_string(),
                name: "WORK".to_string(),
                color: CategoryColor::Red,
            },
        ];
        let ids = suggest_categories("client deadline", "errands", &categories);
        assert_eq!(ids, vec!["y".to_string()]);
    }

    #[test]
    fn test_suggest_categories_none() {
        let categories = seed_categories();
        assert!(suggest_categories("Random thought", "", &categories).is_empty());
    }

    #[test]
    fn test_suggest_title_categories() {
        let categories = seed_categories();
        let ids = suggest_title_categories("Creative app for the client", &categories);
        assert_eq!(ids, vec!["1".to_string(), "3".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_suggest_reminder() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 17, 30, 0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        assert_eq!(suggest_reminder("Send the invoice", &now), Some(expected));
        assert_eq!(suggest_reminder("Reply to EMAIL", &now), Some(expected));
        assert_eq!(suggest_reminder("Just a note", &now), None);
    }
}
