use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .timeline
        .iter()
        .map(|entry| {
            let hours = if entry.hours > 0.0 {
                format!("{:.1}h", entry.hours)
            } else {
                String::new()
            };
            let notes = entry
                .notes
                .as_deref()
                .map(|n| truncate(n, 30))
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", entry.date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<24}", truncate(&entry.skill_name, 22)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<20}", truncate(&entry.title, 18)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{:<7}", hours), Style::default().fg(Color::Green)),
                Span::styled(notes, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let title = format!(" Timeline ({}) ", app.timeline.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Magenta));

    // Header
    let header = Line::from(vec![
        Span::styled(
            format!("{:<12}", "Date"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<24}", "Skill"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<20}", "Title"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Hours",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    if items.is_empty() {
        let paragraph = Paragraph::new("No timeline entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items).block(block);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(Paragraph::new(header), header_area);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    f.render_widget(list, list_area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}
