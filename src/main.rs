mod activity;
mod categorize;
mod db;
mod models;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use db::{parse_date, Database};
use models::{InputError, JsonOutput, NewActivity, NewSkill, ResourceType, SkillChanges, SkillStatus};

const DEFAULT_DB_NAME: &str = "skilltrack.db";

#[derive(Parser)]
#[command(name = "skilltrack")]
#[command(about = "Track skill-learning goals, hours and a timeline of learning events")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Manage skill goals
    #[command(subcommand)]
    Skill(SkillCommands),

    /// Log an explicit timeline entry for a skill
    Log {
        /// Skill ID
        skill_id: i64,

        /// Entry title
        title: String,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long, short)]
        date: Option<String>,

        /// Hours spent
        #[arg(long)]
        hours: Option<f64>,

        /// Optional notes
        #[arg(long, short)]
        notes: Option<String>,
    },

    /// Show the activity timeline
    Timeline {
        /// Restrict to one skill's activities
        #[arg(long, short)]
        skill: Option<i64>,

        /// Inclusive lower date bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive upper date bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the dashboard summary
    Dashboard,

    /// Launch interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum SkillCommands {
    /// List all skill goals
    List {
        /// Filter by platform
        #[arg(long, short)]
        platform: Option<String>,
    },

    /// Add a new skill goal
    Add {
        /// Skill name
        name: String,

        /// Resource type: video/course/article
        #[arg(long, short)]
        resource: String,

        /// Platform the resource lives on
        #[arg(long, short)]
        platform: String,

        /// Initial status: started/in-progress/completed
        #[arg(long, short)]
        status: Option<String>,

        /// Initial hours spent
        #[arg(long)]
        hours: Option<f64>,

        /// Optional notes
        #[arg(long, short)]
        notes: Option<String>,

        /// Difficulty rating (1-5)
        #[arg(long, short)]
        difficulty: Option<i32>,
    },

    /// Show skill details and its timeline
    Show {
        /// Skill ID
        id: i64,
    },

    /// Update a skill's progress
    Update {
        /// Skill ID
        id: i64,

        /// New status: started/in-progress/completed
        #[arg(long, short)]
        status: Option<String>,

        /// New hours-spent total
        #[arg(long)]
        hours: Option<f64>,

        /// New notes
        #[arg(long, short)]
        notes: Option<String>,

        /// New difficulty rating
        #[arg(long, short)]
        difficulty: Option<i32>,
    },

    /// Delete a skill (and its timeline entries)
    Delete {
        /// Skill ID
        id: i64,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("SKILLTRACK_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skilltrack");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_db_path();
    let db = Database::open(&db_path)?;

    match cli.command {
        Commands::Init => {
            db.init()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else {
                println!("Database initialized at: {}", db_path.display());
            }
        }

        Commands::Skill(skill_cmd) => match skill_cmd {
            SkillCommands::List { platform } => {
                let skills = db.list_skills(platform.as_deref())?;
                if cli.json {
                    let data: Vec<_> = skills
                        .iter()
                        .map(|s| {
                            serde_json::json!({
                                "skill": s,
                                "category": categorize::categorize_skill(s)
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string(&JsonOutput::ok(data))?);
                } else if skills.is_empty() {
                    println!("No skills found.");
                } else {
                    println!(
                        "{:<5} {:<30} {:<12} {:<14} {:<8} {}",
                        "ID", "NAME", "CATEGORY", "STATUS", "HOURS", "PLATFORM"
                    );
                    println!("{}", "-".repeat(85));
                    for skill in skills {
                        println!(
                            "{:<5} {:<30} {:<12} {:<14} {:<8} {}",
                            skill.id,
                            truncate(&skill.skill_name, 28),
                            categorize::categorize_skill(&skill),
                            skill.status.label(),
                            format!("{:.1}", skill.hours_spent),
                            skill.platform
                        );
                    }
                }
            }

            SkillCommands::Add {
                name,
                resource,
                platform,
                status,
                hours,
                notes,
                difficulty,
            } => {
                let resource_type = ResourceType::from_str(&resource)
                    .ok_or(InputError::InvalidResourceType(resource))?;
                let status = match status {
                    Some(s) => SkillStatus::from_str(&s).ok_or(InputError::InvalidStatus(s))?,
                    None => SkillStatus::Started,
                };

                let new = NewSkill {
                    skill_name: name.clone(),
                    resource_type,
                    platform,
                    status,
                    hours_spent: hours.unwrap_or(0.0),
                    notes,
                    difficulty_rating: difficulty.unwrap_or(1),
                };
                let id = db.create_skill(&new)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "id": id,
                            "name": name
                        })))?
                    );
                } else {
                    println!("Added skill '{}' with ID: {}", name, id);
                }
            }

            SkillCommands::Show { id } => {
                if let Some(skill) = db.get_skill(id)? {
                    let category = categorize::categorize_skill(&skill);
                    let activities = db.get_activities_for_skill(id)?;

                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                                "skill": skill,
                                "category": category,
                                "timeline": activities
                            })))?
                        );
                    } else {
                        println!("Skill: {}", skill.skill_name);
                        println!("ID: {}", skill.id);
                        println!("Category: {}", category);
                        println!("Resource: {}", skill.resource_type.label());
                        println!("Platform: {}", skill.platform);
                        println!("Status: {}", skill.status.label());
                        println!("Hours spent: {:.1}", skill.hours_spent);
                        println!("Difficulty: {}/5", skill.difficulty_rating);
                        if let Some(notes) = &skill.notes {
                            println!("Notes: {}", notes);
                        }
                        println!("Created: {}", skill.created_at);

                        if !activities.is_empty() {
                            println!();
                            println!("--- Timeline ---");
                            for a in activities {
                                let hours = if a.hours > 0.0 {
                                    format!(" ({:.1}h)", a.hours)
                                } else {
                                    String::new()
                                };
                                println!("{}  {}{}", a.date, a.title, hours);
                                if let Some(notes) = &a.notes {
                                    if !notes.is_empty() {
                                        println!("            {}", notes);
                                    }
                                }
                            }
                        }
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Skill not found"))?
                    );
                } else {
                    println!("Skill not found.");
                }
            }

            SkillCommands::Update {
                id,
                status,
                hours,
                notes,
                difficulty,
            } => {
                let status = match status {
                    Some(s) => Some(SkillStatus::from_str(&s).ok_or(InputError::InvalidStatus(s))?),
                    None => None,
                };

                let changes = SkillChanges {
                    status,
                    hours_spent: hours,
                    notes,
                    difficulty_rating: difficulty,
                };

                if changes.is_empty() {
                    return Err("nothing to update: pass at least one of --status, --hours, --notes, --difficulty".into());
                }

                if let Some(updated) = db.update_skill(id, &changes)? {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                                "skill": updated,
                                "category": categorize::categorize_skill(&updated)
                            })))?
                        );
                    } else {
                        println!("Skill {} updated.", id);
                        println!("Status: {}", updated.status.label());
                        println!("Hours spent: {:.1}", updated.hours_spent);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Skill not found"))?
                    );
                } else {
                    println!("Skill not found.");
                }
            }

            SkillCommands::Delete { id } => {
                if db.delete_skill(id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Skill {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Skill not found"))?
                    );
                } else {
                    println!("Skill not found.");
                }
            }
        },

        Commands::Log {
            skill_id,
            title,
            date,
            hours,
            notes,
        } => {
            if db.get_skill(skill_id)?.is_none() {
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Skill not found"))?
                    );
                } else {
                    println!("Skill not found.");
                }
                return Ok(());
            }

            let entry = NewActivity {
                date: date
                    .as_deref()
                    .and_then(parse_date)
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
                title: title.clone(),
                hours: hours.unwrap_or(0.0).max(0.0),
                notes,
            };
            let id = db.insert_activity(skill_id, &entry)?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "id": id,
                        "title": title
                    })))?
                );
            } else {
                println!("Logged '{}' with ID: {}", title, id);
            }
        }

        Commands::Timeline { skill, from, to } => {
            // Bad date filters are ignored, not errors.
            let from = from.as_deref().and_then(parse_date);
            let to = to.as_deref().and_then(parse_date);

            let entries = db.query_timeline(skill, from, to)?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&entries))?);
            } else if entries.is_empty() {
                println!("No timeline entries found.");
            } else {
                println!(
                    "{:<12} {:<25} {:<20} {:<7} NOTES",
                    "DATE", "SKILL", "TITLE", "HOURS"
                );
                println!("{}", "-".repeat(85));
                for entry in entries {
                    println!(
                        "{:<12} {:<25} {:<20} {:<7} {}",
                        entry.date,
                        truncate(&entry.skill_name, 23),
                        truncate(&entry.title, 18),
                        format!("{:.1}", entry.hours),
                        entry.notes.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        Commands::Dashboard => {
            let summary = db.get_summary()?;
            if cli.json {
                let by_status: Vec<_> = summary
                    .by_status
                    .iter()
                    .map(|(status, count)| serde_json::json!({"status": status, "count": count}))
                    .collect();
                let by_platform: Vec<_> = summary
                    .by_platform
                    .iter()
                    .map(|(platform, count)| {
                        serde_json::json!({"platform": platform, "count": count})
                    })
                    .collect();
                let top_skills: Vec<_> = summary
                    .top_skills
                    .iter()
                    .map(|(name, count)| serde_json::json!({"skill_name": name, "count": count}))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "total_skills": summary.total_skills,
                        "total_hours": summary.total_hours,
                        "by_status": by_status,
                        "by_platform": by_platform,
                        "top_skills": top_skills
                    })))?
                );
            } else {
                println!("=== Skill Dashboard ===");
                println!("Total skills: {}", summary.total_skills);
                println!("Total hours: {:.1}", summary.total_hours);

                if !summary.by_status.is_empty() {
                    println!();
                    println!("By status:");
                    for (status, count) in &summary.by_status {
                        println!("  {:<14} {}", status, count);
                    }
                }
                if !summary.by_platform.is_empty() {
                    println!();
                    println!("By platform:");
                    for (platform, count) in &summary.by_platform {
                        println!("  {:<20} {}", platform, count);
                    }
                }
                if !summary.top_skills.is_empty() {
                    println!();
                    println!("Top skills:");
                    for (name, count) in &summary.top_skills {
                        println!("  {:<30} {}", truncate(name, 28), count);
                    }
                }
            }
        }

        Commands::Tui => {
            tui::run(db)?;
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    mod truncate_tests {
        use super::*;

        #[test]
        fn truncate_short_string() {
            assert_eq!(truncate("hello", 10), "hello");
        }

        #[test]
        fn truncate_exact_length() {
            assert_eq!(truncate("hello", 5), "hello");
        }

        #[test]
        fn truncate_long_string() {
            assert_eq!(truncate("hello world", 8), "hello...");
        }

        #[test]
        fn truncate_empty_string() {
            assert_eq!(truncate("", 10), "");
        }

        #[test]
        fn truncate_minimum_length() {
            // With max_len = 4, we get 1 char + "..."
            assert_eq!(truncate("hello", 4), "h...");
        }

        #[test]
        fn truncate_multibyte_string() {
            // Cutting must land on a char boundary, not a byte offset.
            let name = "é".repeat(15);
            assert_eq!(truncate(&name, 28), name);
            assert_eq!(truncate(&name, 10), format!("{}...", "é".repeat(7)));
        }
    }

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn parse_init_command() {
            let cli = Cli::try_parse_from(["skilltrack", "init"]).unwrap();
            assert!(!cli.json);
            assert!(matches!(cli.command, Commands::Init));
        }

        #[test]
        fn parse_init_with_json() {
            let cli = Cli::try_parse_from(["skilltrack", "--json", "init"]).unwrap();
            assert!(cli.json);
            assert!(matches!(cli.command, Commands::Init));
        }

        #[test]
        fn parse_skill_list() {
            let cli = Cli::try_parse_from(["skilltrack", "skill", "list"]).unwrap();
            match cli.command {
                Commands::Skill(SkillCommands::List { platform }) => {
                    assert!(platform.is_none());
                }
                _ => panic!("expected skill list"),
            }
        }

        #[test]
        fn parse_skill_list_with_platform() {
            let cli =
                Cli::try_parse_from(["skilltrack", "skill", "list", "--platform", "Udemy"])
                    .unwrap();
            match cli.command {
                Commands::Skill(SkillCommands::List { platform }) => {
                    assert_eq!(platform.as_deref(), Some("Udemy"));
                }
                _ => panic!("expected skill list"),
            }
        }

        #[test]
        fn parse_skill_add() {
            let cli = Cli::try_parse_from([
                "skilltrack",
                "skill",
                "add",
                "Rust async",
                "--resource",
                "course",
                "--platform",
                "Udemy",
                "--hours",
                "2.5",
            ])
            .unwrap();
            match cli.command {
                Commands::Skill(SkillCommands::Add {
                    name,
                    resource,
                    platform,
                    hours,
                    ..
                }) => {
                    assert_eq!(name, "Rust async");
                    assert_eq!(resource, "course");
                    assert_eq!(platform, "Udemy");
                    assert_eq!(hours, Some(2.5));
                }
                _ => panic!("expected skill add"),
            }
        }

        #[test]
        fn parse_timeline_with_bounds() {
            let cli = Cli::try_parse_from([
                "skilltrack",
                "timeline",
                "--skill",
                "3",
                "--from",
                "2026-01-01",
                "--to",
                "2026-01-31",
            ])
            .unwrap();
            match cli.command {
                Commands::Timeline { skill, from, to } => {
                    assert_eq!(skill, Some(3));
                    assert_eq!(from.as_deref(), Some("2026-01-01"));
                    assert_eq!(to.as_deref(), Some("2026-01-31"));
                }
                _ => panic!("expected timeline"),
            }
        }

        #[test]
        fn parse_log_command() {
            let cli = Cli::try_parse_from([
                "skilltrack",
                "log",
                "3",
                "Read chapter 4",
                "--hours",
                "1.5",
            ])
            .unwrap();
            match cli.command {
                Commands::Log {
                    skill_id,
                    title,
                    hours,
                    ..
                } => {
                    assert_eq!(skill_id, 3);
                    assert_eq!(title, "Read chapter 4");
                    assert_eq!(hours, Some(1.5));
                }
                _ => panic!("expected log"),
            }
        }

        #[test]
        fn reject_unknown_command() {
            assert!(Cli::try_parse_from(["skilltrack", "bogus"]).is_err());
        }
    }
}
