mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::db::{Database, DashboardSummary};
use crate::models::{LearningActivity, SkillGoal, TimelineEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Skills,
    SkillDetail,
    Timeline,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Dashboard => View::Skills,
            View::Skills => View::Timeline,
            View::SkillDetail => View::Skills,
            View::Timeline => View::Dashboard,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Dashboard => View::Timeline,
            View::Skills => View::Dashboard,
            View::SkillDetail => View::Skills,
            View::Timeline => View::Skills,
        }
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

pub struct App {
    db: Database,
    pub view: View,
    pub skills: StatefulList<SkillGoal>,
    pub selected_skill: Option<SkillGoal>,
    pub selected_skill_timeline: Vec<LearningActivity>,
    pub summary: DashboardSummary,
    pub recent_activity: Vec<TimelineEntry>,
    pub timeline: Vec<TimelineEntry>,
    pub filter_platform: Option<String>,
    pub filter_input: String,
    pub filter_mode: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self, Box<dyn std::error::Error>> {
        let summary = db.get_summary()?;
        let skills = db.list_skills(None)?;
        let timeline = db.query_timeline(None, None, None)?;
        let recent_activity = timeline.iter().take(8).cloned().collect();

        Ok(Self {
            db,
            view: View::Dashboard,
            skills: StatefulList::with_items(skills),
            selected_skill: None,
            selected_skill_timeline: Vec::new(),
            summary,
            recent_activity,
            timeline,
            filter_platform: None,
            filter_input: String::new(),
            filter_mode: false,
            should_quit: false,
        })
    }

    pub fn refresh_data(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.summary = self.db.get_summary()?;
        self.skills = StatefulList::with_items(
            self.db.list_skills(self.filter_platform.as_deref())?,
        );
        self.timeline = self.db.query_timeline(None, None, None)?;
        self.recent_activity = self.timeline.iter().take(8).cloned().collect();
        Ok(())
    }

    fn apply_filter(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.filter_input.is_empty() {
            self.filter_platform = None;
        } else {
            self.filter_platform = Some(self.filter_input.clone());
        }
        self.skills = StatefulList::with_items(
            self.db.list_skills(self.filter_platform.as_deref())?,
        );
        Ok(())
    }

    fn select_skill(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(skill) = self.skills.selected_item() {
            self.selected_skill = Some(skill.clone());
            self.selected_skill_timeline = self.db.get_activities_for_skill(skill.id)?;
            self.view = View::SkillDetail;
        }
        Ok(())
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Filter mode input (vim-like / search by platform)
        if self.filter_mode {
            match key {
                KeyCode::Esc => {
                    self.filter_mode = false;
                    self.filter_input.clear();
                }
                KeyCode::Enter => {
                    self.filter_mode = false;
                    self.apply_filter()?;
                }
                KeyCode::Backspace => {
                    self.filter_input.pop();
                }
                KeyCode::Char(c) => {
                    self.filter_input.push(c);
                }
                _ => {}
            }
            return Ok(());
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_data()?;
            }

            KeyCode::Char('/') if self.view == View::Skills => {
                self.filter_mode = true;
                self.filter_input.clear();
            }

            KeyCode::Esc => match self.view {
                View::SkillDetail => {
                    self.view = View::Skills;
                    self.selected_skill = None;
                }
                View::Skills if self.filter_platform.is_some() => {
                    self.filter_platform = None;
                    self.filter_input.clear();
                    self.apply_filter()?;
                }
                _ => {}
            },

            KeyCode::Char('h') | KeyCode::Left => match self.view {
                View::SkillDetail => {
                    self.view = View::Skills;
                    self.selected_skill = None;
                }
                _ => self.view = self.view.prev(),
            },
            KeyCode::Char('l') | KeyCode::Right => match self.view {
                View::Skills => self.select_skill()?,
                _ => self.view = self.view.next(),
            },

            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.view = self.view.prev();
                } else {
                    self.view = self.view.next();
                }
            }
            KeyCode::BackTab => {
                self.view = self.view.prev();
            }

            KeyCode::Char('j') | KeyCode::Down => {
                if self.view == View::Skills {
                    self.skills.next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.view == View::Skills {
                    self.skills.previous();
                }
            }

            KeyCode::Char('g') => {
                if self.view == View::Skills && !self.skills.items.is_empty() {
                    self.skills.selected = Some(0);
                }
            }
            KeyCode::Char('G') => {
                if self.view == View::Skills && !self.skills.items.is_empty() {
                    self.skills.selected = Some(self.skills.items.len() - 1);
                }
            }

            KeyCode::Enter => {
                if self.view == View::Skills {
                    self.select_skill()?;
                }
            }

            _ => {}
        }
        Ok(())
    }
}

pub fn run(db: Database) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(db)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
