use crate::models::SkillGoal;

// Platforms with a strong topical identity; an exact platform match wins
// over any keyword found in the text fields.
const PLATFORM_HINTS: &[(&str, &str)] = &[
    ("YouTube", "Frontend"),
    ("Udemy", "Languages"),
    ("Coursera", "AI/ML"),
    ("edX", "AI/ML"),
];

// Scanned in order; the first category with any matching keyword wins, so
// earlier entries take priority when a text matches several categories.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Frontend",
        &["react", "vue", "angular", "svelte", "css", "html", "frontend", "tailwind"],
    ),
    (
        "Backend",
        &["backend", "api", "node", "django", "flask", "spring", "server"],
    ),
    ("Data", &["data", "pandas", "numpy", "analytics", "etl", "spark"]),
    (
        "AI/ML",
        &["machine learning", "deep learning", "neural", "tensorflow", "pytorch", "nlp", "llm"],
    ),
    (
        "Databases",
        &["sql", "database", "postgres", "mysql", "mongodb", "redis", "sqlite"],
    ),
    (
        "DevOps",
        &["docker", "kubernetes", "devops", "terraform", "ansible", "aws", "linux"],
    ),
    ("Mobile", &["android", "ios", "flutter", "swift", "kotlin"]),
    (
        "Testing",
        &["testing", "selenium", "cypress", "junit", "pytest", "tdd"],
    ),
    (
        "Languages",
        &["python", "rust", "golang", "java", "typescript", "c++", "haskell"],
    ),
];

const GENERIC_RESOURCE_WORDS: &[&str] = &["course", "video"];

/// Infer a topical category from a skill's free-text fields.
///
/// Deliberately crude substring matching: deterministic and explainable, not
/// a classifier. Total over any input and always returns a non-empty label.
pub fn categorize(skill_name: &str, platform: &str, notes: &str) -> &'static str {
    for &(hint_platform, category) in PLATFORM_HINTS {
        if platform == hint_platform {
            return category;
        }
    }

    let text = format!("{} {} {}", skill_name, platform, notes).to_lowercase();

    for &(category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return category;
        }
    }

    // A bare "course"/"video" with no recognizable topic is usually a
    // general programming resource.
    if GENERIC_RESOURCE_WORDS.iter().any(|w| text.contains(w)) {
        return "Languages";
    }

    "General"
}

pub fn categorize_skill(skill: &SkillGoal) -> &'static str {
    categorize(
        &skill.skill_name,
        &skill.platform,
        skill.notes.as_deref().unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    mod platform_hint_tests {
        use super::*;

        #[test]
        fn hinted_platforms_win_regardless_of_text() {
            assert_eq!(categorize("Docker deep dive", "YouTube", ""), "Frontend");
            assert_eq!(categorize("React for beginners", "Udemy", ""), "Languages");
            assert_eq!(categorize("", "Coursera", "sql everywhere"), "AI/ML");
            assert_eq!(categorize("Anything at all", "edX", ""), "AI/ML");
        }

        #[test]
        fn hint_requires_exact_platform_match() {
            // "youtube" (lowercased) is not in the hint table; the keyword
            // scan takes over instead.
            assert_eq!(categorize("Docker deep dive", "youtube", ""), "DevOps");
        }
    }

    mod keyword_tests {
        use super::*;

        #[test]
        fn matches_single_category() {
            assert_eq!(categorize("React hooks in depth", "", ""), "Frontend");
            assert_eq!(categorize("Django REST patterns", "", ""), "Backend");
            assert_eq!(categorize("Kubernetes networking", "", ""), "DevOps");
            assert_eq!(categorize("Flutter widgets", "", ""), "Mobile");
        }

        #[test]
        fn earlier_category_wins_the_tie() {
            // Both Frontend ("react") and Backend ("api") match; Frontend is
            // listed first.
            assert_eq!(categorize("React API integration", "", ""), "Frontend");
            // Backend ("server") beats DevOps ("linux").
            assert_eq!(categorize("Linux server administration", "", ""), "Backend");
        }

        #[test]
        fn matching_is_case_insensitive() {
            assert_eq!(categorize("PYTORCH FUNDAMENTALS", "", ""), "AI/ML");
            assert_eq!(categorize("PostgreSQL Internals", "", ""), "Databases");
        }

        #[test]
        fn keywords_found_in_notes_and_platform_too() {
            assert_eq!(categorize("Weekly study", "", "working through a Rust book"), "Languages");
            assert_eq!(categorize("Certification prep", "AWS Skill Builder", ""), "DevOps");
        }

        #[test]
        fn python_is_a_language_before_the_course_fallback() {
            assert_eq!(categorize("Intro to Python course", "", ""), "Languages");
        }
    }

    mod fallback_tests {
        use super::*;

        #[test]
        fn course_or_video_falls_back_to_languages() {
            assert_eq!(categorize("A wonderful course", "", ""), "Languages");
            assert_eq!(categorize("", "", "long video series"), "Languages");
        }

        #[test]
        fn empty_input_is_general() {
            assert_eq!(categorize("", "", ""), "General");
        }

        #[test]
        fn unrecognized_text_is_general() {
            assert_eq!(categorize("Watercolor painting", "Skillshare", ""), "General");
        }
    }

    mod skill_helper_tests {
        use super::*;
        use crate::models::{ResourceType, SkillStatus};

        #[test]
        fn categorize_skill_uses_all_text_fields() {
            let skill = SkillGoal {
                id: 1,
                skill_name: "Weekly study".to_string(),
                resource_type: ResourceType::Article,
                platform: "blog".to_string(),
                status: SkillStatus::Started,
                hours_spent: 0.0,
                notes: Some("mostly about terraform modules".to_string()),
                difficulty_rating: 1,
                created_at: String::new(),
                updated_at: String::new(),
            };
            assert_eq!(categorize_skill(&skill), "DevOps");
        }

        #[test]
        fn categorize_skill_with_no_notes() {
            let skill = SkillGoal {
                id: 1,
                skill_name: "Birdwatching".to_string(),
                resource_type: ResourceType::Video,
                platform: "blog".to_string(),
                status: SkillStatus::Started,
                hours_spent: 0.0,
                notes: None,
                difficulty_rating: 1,
                created_at: String::new(),
                updated_at: String::new(),
            };
            assert_eq!(categorize_skill(&skill), "General");
        }
    }
}
