use serde::{Deserialize, Serialize};
use thiserror::Error;

// Status of a skill goal (codes match the stored column values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillStatus {
    Started = 1,
    InProgress = 2,
    Completed = 3,
}

impl SkillStatus {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(v: i32) -> Self {
        match v {
            2 => SkillStatus::InProgress,
            3 => SkillStatus::Completed,
            _ => SkillStatus::Started,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillStatus::Started => "Started",
            SkillStatus::InProgress => "In Progress",
            SkillStatus::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "started" | "start" | "1" => Some(SkillStatus::Started),
            "in-progress" | "in_progress" | "inprogress" | "progress" | "2" => {
                Some(SkillStatus::InProgress)
            }
            "completed" | "complete" | "done" | "3" => Some(SkillStatus::Completed),
            _ => None,
        }
    }
}

// Kind of learning resource the skill is studied from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Video = 1,
    Course = 2,
    Article = 3,
}

impl ResourceType {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(v: i32) -> Self {
        match v {
            2 => ResourceType::Course,
            3 => ResourceType::Article,
            _ => ResourceType::Video,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Video => "Video",
            ResourceType::Course => "Course",
            ResourceType::Article => "Article",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "video" | "v" | "1" => Some(ResourceType::Video),
            "course" | "c" | "2" => Some(ResourceType::Course),
            "article" | "a" | "3" => Some(ResourceType::Article),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGoal {
    pub id: i64,
    pub skill_name: String,
    pub resource_type: ResourceType,
    pub platform: String,
    pub status: SkillStatus,
    pub hours_spent: f64,
    pub notes: Option<String>,
    pub difficulty_rating: i32,
    pub created_at: String,
    pub updated_at: String,
}

// Fields for a skill goal that does not exist yet
#[derive(Debug, Clone)]
pub struct NewSkill {
    pub skill_name: String,
    pub resource_type: ResourceType,
    pub platform: String,
    pub status: SkillStatus,
    pub hours_spent: f64,
    pub notes: Option<String>,
    pub difficulty_rating: i32,
}

// A proposed update to a skill goal; None means "leave unchanged"
#[derive(Debug, Clone, Default)]
pub struct SkillChanges {
    pub status: Option<SkillStatus>,
    pub hours_spent: Option<f64>,
    pub notes: Option<String>,
    pub difficulty_rating: Option<i32>,
}

impl SkillChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.hours_spent.is_none()
            && self.notes.is_none()
            && self.difficulty_rating.is_none()
    }
}

// A stored timeline event belonging to one skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningActivity {
    pub id: i64,
    pub skill_id: i64,
    pub date: String,
    pub title: String,
    pub hours: f64,
    pub notes: Option<String>,
}

// An activity to be created (by the deriver or an explicit log entry)
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub date: chrono::NaiveDate,
    pub title: String,
    pub hours: f64,
    pub notes: Option<String>,
}

// Timeline row denormalized with the owning skill's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: i64,
    pub skill_id: i64,
    pub skill_name: String,
    pub date: String,
    pub title: String,
    pub hours: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid status '{0}'. Use: started, in-progress, or completed")]
    InvalidStatus(String),
    #[error("invalid resource type '{0}'. Use: video, course, or article")]
    InvalidResourceType(String),
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod skill_status_tests {
        use super::*;

        #[test]
        fn as_i32_returns_stored_codes() {
            assert_eq!(SkillStatus::Started.as_i32(), 1);
            assert_eq!(SkillStatus::InProgress.as_i32(), 2);
            assert_eq!(SkillStatus::Completed.as_i32(), 3);
        }

        #[test]
        fn from_i32_round_trips() {
            assert_eq!(SkillStatus::from_i32(1), SkillStatus::Started);
            assert_eq!(SkillStatus::from_i32(2), SkillStatus::InProgress);
            assert_eq!(SkillStatus::from_i32(3), SkillStatus::Completed);
        }

        #[test]
        fn from_i32_unknown_defaults_to_started() {
            assert_eq!(SkillStatus::from_i32(0), SkillStatus::Started);
            assert_eq!(SkillStatus::from_i32(99), SkillStatus::Started);
        }

        #[test]
        fn label_is_human_readable() {
            assert_eq!(SkillStatus::Started.label(), "Started");
            assert_eq!(SkillStatus::InProgress.label(), "In Progress");
            assert_eq!(SkillStatus::Completed.label(), "Completed");
        }

        #[test]
        fn from_str_accepts_variants() {
            assert_eq!(SkillStatus::from_str("started"), Some(SkillStatus::Started));
            assert_eq!(
                SkillStatus::from_str("in-progress"),
                Some(SkillStatus::InProgress)
            );
            assert_eq!(
                SkillStatus::from_str("IN_PROGRESS"),
                Some(SkillStatus::InProgress)
            );
            assert_eq!(SkillStatus::from_str("done"), Some(SkillStatus::Completed));
            assert_eq!(SkillStatus::from_str("3"), Some(SkillStatus::Completed));
        }

        #[test]
        fn from_str_invalid_returns_none() {
            assert!(SkillStatus::from_str("invalid").is_none());
            assert!(SkillStatus::from_str("").is_none());
        }
    }

    mod resource_type_tests {
        use super::*;

        #[test]
        fn codes_round_trip() {
            for rt in [ResourceType::Video, ResourceType::Course, ResourceType::Article] {
                assert_eq!(ResourceType::from_i32(rt.as_i32()), rt);
            }
        }

        #[test]
        fn from_i32_unknown_defaults_to_video() {
            assert_eq!(ResourceType::from_i32(0), ResourceType::Video);
            assert_eq!(ResourceType::from_i32(7), ResourceType::Video);
        }

        #[test]
        fn from_str_accepts_variants() {
            assert_eq!(ResourceType::from_str("video"), Some(ResourceType::Video));
            assert_eq!(ResourceType::from_str("c"), Some(ResourceType::Course));
            assert_eq!(ResourceType::from_str("Article"), Some(ResourceType::Article));
            assert_eq!(ResourceType::from_str("2"), Some(ResourceType::Course));
        }

        #[test]
        fn from_str_invalid_returns_none() {
            assert!(ResourceType::from_str("podcast").is_none());
        }
    }

    mod skill_changes_tests {
        use super::*;

        #[test]
        fn default_is_empty() {
            assert!(SkillChanges::default().is_empty());
        }

        #[test]
        fn any_field_makes_it_non_empty() {
            let changes = SkillChanges {
                hours_spent: Some(2.0),
                ..Default::default()
            };
            assert!(!changes.is_empty());

            let changes = SkillChanges {
                notes: Some("note".to_string()),
                ..Default::default()
            };
            assert!(!changes.is_empty());
        }
    }

    mod json_output_tests {
        use super::*;

        #[test]
        fn ok_carries_data() {
            let output = JsonOutput::ok(42);
            assert!(output.success);
            assert_eq!(output.data, Some(42));
            assert!(output.error.is_none());
        }

        #[test]
        fn err_carries_message() {
            let output = JsonOutput::<()>::err("something went wrong");
            assert!(!output.success);
            assert!(output.data.is_none());
            assert_eq!(output.error, Some("something went wrong".to_string()));
        }

        #[test]
        fn serializes_ok_correctly() {
            let output = JsonOutput::ok("test");
            let json = serde_json::to_string(&output).unwrap();
            assert!(json.contains("\"success\":true"));
            assert!(json.contains("\"data\":\"test\""));
            assert!(json.contains("\"error\":null"));
        }
    }

    mod input_error_tests {
        use super::*;

        #[test]
        fn messages_name_the_bad_value() {
            let e = InputError::InvalidStatus("flying".to_string());
            assert!(e.to_string().contains("flying"));

            let e = InputError::InvalidResourceType("podcast".to_string());
            assert!(e.to_string().contains("podcast"));
        }
    }
}
