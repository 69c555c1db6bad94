use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Result};
use std::path::Path;

use crate::activity::{creation_activity, derive_update_activities};
use crate::models::{
    LearningActivity, NewActivity, NewSkill, ResourceType, SkillChanges, SkillGoal, SkillStatus,
    TimelineEntry,
};

// Hard cap on timeline query results to bound response size.
const TIMELINE_LIMIT: i64 = 500;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        // SQLite ships with foreign keys off; the activity cascade depends
        // on them.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS skill_goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                skill_name TEXT NOT NULL,
                resource_type INTEGER NOT NULL,
                platform TEXT NOT NULL,
                status INTEGER NOT NULL DEFAULT 1,
                hours_spent REAL NOT NULL DEFAULT 0,
                notes TEXT,
                difficulty_rating INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS learning_activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                skill_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                hours REAL NOT NULL DEFAULT 0,
                notes TEXT,
                FOREIGN KEY (skill_id) REFERENCES skill_goals(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_skill_goals_status ON skill_goals(status);
            CREATE INDEX IF NOT EXISTS idx_skill_goals_platform ON skill_goals(platform);
            CREATE INDEX IF NOT EXISTS idx_activities_skill ON learning_activities(skill_id);
            CREATE INDEX IF NOT EXISTS idx_activities_date ON learning_activities(date);
            "#,
        )?;

        Ok(())
    }

    // Skill operations
    pub fn create_skill(&self, skill: &NewSkill) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO skill_goals (skill_name, resource_type, platform, status, hours_spent, notes, difficulty_rating)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                skill.skill_name,
                skill.resource_type.as_i32(),
                skill.platform,
                skill.status.as_i32(),
                skill.hours_spent,
                skill.notes,
                skill.difficulty_rating
            ],
        )?;
        let skill_id = self.conn.last_insert_rowid();

        // Best-effort side channel: a failed activity insert must never fail
        // the creation itself.
        let created = creation_activity(skill, Local::now().date_naive());
        let _ = self.insert_activity(skill_id, &created);

        Ok(skill_id)
    }

    pub fn get_skill(&self, id: i64) -> Result<Option<SkillGoal>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, skill_name, resource_type, platform, status, hours_spent,
                   notes, difficulty_rating, created_at, updated_at
            FROM skill_goals
            WHERE id = ?1
            "#,
        )?;

        let skill = stmt.query_row(params![id], Self::skill_from_row);

        match skill {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn list_skills(&self, platform_filter: Option<&str>) -> Result<Vec<SkillGoal>> {
        let base_query = r#"
            SELECT id, skill_name, resource_type, platform, status, hours_spent,
                   notes, difficulty_rating, created_at, updated_at
            FROM skill_goals
        "#;

        let (query, params_vec): (String, Vec<Box<dyn rusqlite::ToSql>>) =
            if let Some(platform) = platform_filter {
                (
                    format!("{} WHERE platform = ?1 ORDER BY id", base_query),
                    vec![Box::new(platform.to_string())],
                )
            } else {
                (format!("{} ORDER BY id", base_query), vec![])
            };

        let mut stmt = self.conn.prepare(&query)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|b| b.as_ref()).collect();

        let rows = stmt.query_map(params_refs.as_slice(), Self::skill_from_row)?;
        rows.collect()
    }

    /// Apply a set of field changes to a skill and log the derived timeline
    /// activities. Returns the updated record, or None if the skill does not
    /// exist. Activity logging is best-effort and never fails the update.
    pub fn update_skill(&self, id: i64, changes: &SkillChanges) -> Result<Option<SkillGoal>> {
        let Some(current) = self.get_skill(id)? else {
            return Ok(None);
        };

        // Derive against the state loaded before the write so the diff sees
        // the actual prior values.
        let derived = derive_update_activities(&current, changes, Local::now().date_naive());

        let status = changes.status.unwrap_or(current.status);
        let hours_spent = changes.hours_spent.unwrap_or(current.hours_spent);
        let notes = changes.notes.clone().or_else(|| current.notes.clone());
        let difficulty_rating = changes.difficulty_rating.unwrap_or(current.difficulty_rating);

        self.conn.execute(
            r#"
            UPDATE skill_goals
            SET status = ?1,
                hours_spent = ?2,
                notes = ?3,
                difficulty_rating = ?4,
                updated_at = datetime('now')
            WHERE id = ?5
            "#,
            params![
                status.as_i32(),
                hours_spent,
                notes,
                difficulty_rating,
                id
            ],
        )?;

        for activity in &derived {
            let _ = self.insert_activity(id, activity);
        }

        self.get_skill(id)
    }

    pub fn delete_skill(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM skill_goals WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Activity operations
    pub fn insert_activity(&self, skill_id: i64, activity: &NewActivity) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO learning_activities (skill_id, date, title, hours, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                skill_id,
                activity.date.format("%Y-%m-%d").to_string(),
                activity.title,
                activity.hours,
                activity.notes
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_activities_for_skill(&self, skill_id: i64) -> Result<Vec<LearningActivity>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, skill_id, date, title, hours, notes
            FROM learning_activities
            WHERE skill_id = ?1
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map(params![skill_id], |row| {
            Ok(LearningActivity {
                id: row.get(0)?,
                skill_id: row.get(1)?,
                date: row.get(2)?,
                title: row.get(3)?,
                hours: row.get(4)?,
                notes: row.get(5)?,
            })
        })?;
        rows.collect()
    }

    /// Timeline query: all filters optional and independent, date bounds
    /// inclusive, newest first with descending id as the tie-break.
    pub fn query_timeline(
        &self,
        skill_id: Option<i64>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<TimelineEntry>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(id) = skill_id {
            params_vec.push(Box::new(id));
            conditions.push(format!("a.skill_id = ?{}", params_vec.len()));
        }
        if let Some(from) = from {
            params_vec.push(Box::new(from.format("%Y-%m-%d").to_string()));
            conditions.push(format!("a.date >= ?{}", params_vec.len()));
        }
        if let Some(to) = to {
            params_vec.push(Box::new(to.format("%Y-%m-%d").to_string()));
            conditions.push(format!("a.date <= ?{}", params_vec.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            r#"
            SELECT a.id, a.skill_id, s.skill_name, a.date, a.title, a.hours, a.notes
            FROM learning_activities a
            JOIN skill_goals s ON a.skill_id = s.id
            {}
            ORDER BY a.date DESC, a.id DESC
            LIMIT {}
            "#,
            where_clause, TIMELINE_LIMIT
        );

        let mut stmt = self.conn.prepare(&query)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|b| b.as_ref()).collect();

        let rows = stmt.query_map(params_refs.as_slice(), |row| {
            Ok(TimelineEntry {
                id: row.get(0)?,
                skill_id: row.get(1)?,
                skill_name: row.get(2)?,
                date: row.get(3)?,
                title: row.get(4)?,
                hours: row.get(5)?,
                notes: row.get(6)?,
            })
        })?;
        rows.collect()
    }

    pub fn get_summary(&self) -> Result<DashboardSummary> {
        let total_skills: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM skill_goals", [], |row| row.get(0))?;

        let total_hours: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(hours_spent), 0) FROM skill_goals",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT status, COUNT(*) FROM skill_goals GROUP BY status ORDER BY status",
        )?;
        let rows = stmt.query_map([], |row| {
            let status: i32 = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((SkillStatus::from_i32(status).label().to_string(), count))
        })?;
        let by_status = rows.collect::<Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT platform, COUNT(*) FROM skill_goals GROUP BY platform ORDER BY COUNT(*) DESC, platform",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        let by_platform = rows.collect::<Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT skill_name, COUNT(*) as freq
            FROM skill_goals
            GROUP BY skill_name
            ORDER BY freq DESC, skill_name
            LIMIT 5
            "#,
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        let top_skills = rows.collect::<Result<Vec<_>>>()?;

        Ok(DashboardSummary {
            total_skills,
            total_hours,
            by_status,
            by_platform,
            top_skills,
        })
    }

    fn skill_from_row(row: &rusqlite::Row) -> Result<SkillGoal> {
        let resource_type: i32 = row.get(2)?;
        let status: i32 = row.get(4)?;
        Ok(SkillGoal {
            id: row.get(0)?,
            skill_name: row.get(1)?,
            resource_type: ResourceType::from_i32(resource_type),
            platform: row.get(3)?,
            status: SkillStatus::from_i32(status),
            hours_spent: row.get(5)?,
            notes: row.get(6)?,
            difficulty_rating: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

/// Parse a user-supplied date filter. Invalid input is treated as absent,
/// not as an error.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_skills: i64,
    pub total_hours: f64,
    pub by_status: Vec<(String, i64)>,
    pub by_platform: Vec<(String, i64)>,
    pub top_skills: Vec<(String, i64)>,
}
