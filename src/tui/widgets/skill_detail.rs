use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::categorize::categorize_skill;
use crate::models::SkillStatus;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(skill) = &app.selected_skill else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Skill Detail ");
        let paragraph = Paragraph::new("No skill selected").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header info
            Constraint::Length(4), // Progress
            Constraint::Min(0),    // Timeline
        ])
        .split(area);

    draw_header(f, skill, chunks[0]);
    draw_progress(f, skill, chunks[1]);
    draw_timeline(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, skill: &crate::models::SkillGoal, area: Rect) {
    let notes = skill.notes.as_deref().unwrap_or("No notes");

    let text = vec![
        Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::Gray)),
            Span::styled(categorize_skill(skill), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled("Resource: ", Style::default().fg(Color::Gray)),
            Span::styled(skill.resource_type.label(), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled("Platform: ", Style::default().fg(Color::Gray)),
            Span::styled(&skill.platform, Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Notes: ", Style::default().fg(Color::Gray)),
            Span::styled(notes, Style::default().fg(Color::White)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", skill.skill_name))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_progress(f: &mut Frame, skill: &crate::models::SkillGoal, area: Rect) {
    let status_color = match skill.status {
        SkillStatus::Completed => Color::Green,
        SkillStatus::InProgress => Color::Yellow,
        SkillStatus::Started => Color::White,
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(skill.status.label(), Style::default().fg(status_color)),
            Span::raw("  "),
            Span::styled("Hours: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}", skill.hours_spent),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::styled("Difficulty: ", Style::default().fg(Color::Gray)),
            Span::styled(
                difficulty_bar(skill.difficulty_rating),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Gray)),
            Span::styled(&skill.created_at, Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Progress ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_timeline(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .selected_skill_timeline
        .iter()
        .take(20)
        .map(|a| {
            let hours = if a.hours > 0.0 {
                format!("{:.1}h", a.hours)
            } else {
                String::new()
            };
            let notes = a
                .notes
                .as_deref()
                .map(|n| format!("\"{}\"", truncate(n, 36)))
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", a.date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<20}", truncate(&a.title, 18)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{:<7}", hours), Style::default().fg(Color::Green)),
                Span::styled(notes, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let title = if app.selected_skill_timeline.is_empty() {
        " Timeline (none) ".to_string()
    } else {
        format!(" Timeline ({}) ", app.selected_skill_timeline.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Magenta));

    if items.is_empty() {
        let paragraph = Paragraph::new("No timeline entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}

fn difficulty_bar(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    let empty = 5 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}
