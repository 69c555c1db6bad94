use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::categorize::categorize_skill;
use crate::models::SkillStatus;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let title = if let Some(platform) = &app.filter_platform {
        format!(" Skills (platform: {}) ", platform)
    } else {
        " Skills ".to_string()
    };

    let items: Vec<ListItem> = app
        .skills
        .items
        .iter()
        .map(|skill| {
            let status_color = match skill.status {
                SkillStatus::Completed => Color::Green,
                SkillStatus::InProgress => Color::Yellow,
                SkillStatus::Started => Color::White,
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<28}", truncate(&skill.skill_name, 26)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<12}", categorize_skill(skill)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<13}", skill.status.label()),
                    Style::default().fg(status_color),
                ),
                Span::styled(
                    format!("{:>6.1}h ", skill.hours_spent),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    truncate(&skill.platform, 16),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Cyan));

    // Header
    let header = Line::from(vec![
        Span::styled(
            format!("{:<28}", "Name"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<12}", "Category"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<13}", "Status"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:>7} ", "Hours"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Platform",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.skills.selected);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(ratatui::widgets::Paragraph::new(header), header_area);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    f.render_stateful_widget(list, list_area, &mut state);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}
