use chrono::NaiveDate;

use crate::models::{NewActivity, NewSkill, SkillChanges, SkillGoal};

// Non-finite hours are treated as 0 so a bad value can never poison the
// delta or fail the update.
fn hours_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// The single activity logged whenever a skill goal is created.
pub fn creation_activity(skill: &NewSkill, date: NaiveDate) -> NewActivity {
    NewActivity {
        date,
        title: "Created Skill".to_string(),
        hours: hours_or_zero(skill.hours_spent).max(0.0),
        notes: skill.notes.clone(),
    }
}

/// Decide which timeline activities a skill update should log.
///
/// Rules are evaluated independently, so a single update can emit more than
/// one activity. Emission order is hours, then status, then notes.
pub fn derive_update_activities(
    before: &SkillGoal,
    changes: &SkillChanges,
    date: NaiveDate,
) -> Vec<NewActivity> {
    let mut activities = Vec::new();

    if let Some(new_hours) = changes.hours_spent {
        let delta = hours_or_zero(new_hours) - hours_or_zero(before.hours_spent);
        if delta != 0.0 {
            let mut notes = format!("Hours spent is now {}", hours_or_zero(new_hours));
            if let Some(extra) = changes.notes.as_deref().filter(|s| !s.is_empty()) {
                notes.push_str(". ");
                notes.push_str(extra);
            }
            activities.push(NewActivity {
                date,
                title: "Updated Hours".to_string(),
                // A decrease still gets logged, but never with negative hours.
                hours: delta.max(0.0),
                notes: Some(notes),
            });
        }
    }

    if let Some(new_status) = changes.status {
        if new_status != before.status {
            activities.push(NewActivity {
                date,
                title: format!("Status: {}", new_status.label()),
                hours: 0.0,
                notes: changes.notes.clone(),
            });
        }
    }

    // Notes on their own are worth a timeline entry; notes accompanying an
    // hours or status change are already carried by those activities.
    if changes.notes.is_some() && changes.status.is_none() && changes.hours_spent.is_none() {
        activities.push(NewActivity {
            date,
            title: "Notes Updated".to_string(),
            hours: 0.0,
            notes: changes.notes.clone(),
        });
    }

    activities
}
