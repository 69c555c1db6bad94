use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Totals + breakdowns row
            Constraint::Min(0),    // Recent activity
        ])
        .split(area);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_totals(f, app, top_chunks[0]);
    draw_breakdowns(f, app, top_chunks[1]);
    draw_recent_activity(f, app, chunks[1]);
}

fn draw_totals(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;

    let mut text = vec![
        Line::from(vec![
            Span::styled("Skills: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", summary.total_skills),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Hours: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}", summary.total_hours),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    for (name, count) in summary.top_skills.iter().take(4) {
        text.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(truncate(name, 22), Style::default().fg(Color::White)),
            Span::styled(format!("  x{}", count), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Totals ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_breakdowns(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let mut text = Vec::new();

    for (status, count) in &summary.by_status {
        let color = match status.as_str() {
            "Completed" => Color::Green,
            "In Progress" => Color::Yellow,
            _ => Color::White,
        };
        text.push(Line::from(vec![
            Span::styled(format!("{:<14}", status), Style::default().fg(color)),
            Span::styled(format!("{}", count), Style::default().fg(Color::White)),
        ]));
    }

    if !summary.by_platform.is_empty() {
        text.push(Line::from(""));
        for (platform, count) in summary.by_platform.iter().take(4) {
            text.push(Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate(platform, 13)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{}", count), Style::default().fg(Color::White)),
            ]));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" By Status / Platform ")
        .title_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_recent_activity(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .recent_activity
        .iter()
        .map(|entry| {
            let hours = if entry.hours > 0.0 {
                format!("{:.1}h", entry.hours)
            } else {
                String::new()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", entry.date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<22}", truncate(&entry.skill_name, 20)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<20}", truncate(&entry.title, 18)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(hours, Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Activity ")
        .title_style(Style::default().fg(Color::Magenta));

    if items.is_empty() {
        let paragraph = Paragraph::new("No activity yet. Add a skill to get started!")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}
