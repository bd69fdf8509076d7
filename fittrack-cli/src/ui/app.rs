use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

use crate::api::ApiClient;
use crate::models::{Achievement, CalendarMonth, DashboardSummary, Trends};

/// Everything the dashboard shows, fetched from the backend in one pass
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub calendar: CalendarMonth,
    pub trends: Trends,
    pub achievements: Vec<Achievement>,
}

impl DashboardData {
    /// Fetch each view in turn
    pub async fn fetch(client: &ApiClient, today: NaiveDate, trend_period: &str) -> Result<Self> {
        let summary = client.dashboard_summary().await?;
        let calendar = client.dashboard_calendar(today.year(), today.month()).await?;
        let trends = client.dashboard_trends(trend_period).await?;
        let achievements = client.achievements().await?;

        Ok(Self {
            summary,
            calendar,
            trends,
            achievements,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Summary,
    Calendar,
    Trends,
    Achievements,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Summary, Tab::Calendar, Tab::Trends, Tab::Achievements];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Calendar => "Calendar",
            Tab::Trends => "Trends",
            Tab::Achievements => "Achievements",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Currently selected tab
    pub selected_tab: Tab,
    /// Selected row in list-style tabs
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Caller should re-fetch `data`
    pub refresh_requested: bool,
    /// Transient message for the status bar
    pub status: Option<String>,
    pub data: DashboardData,
}

impl App {
    pub fn new(data: DashboardData) -> Self {
        Self {
            should_quit: false,
            selected_tab: Tab::Summary,
            selected_index: 0,
            show_help: false,
            refresh_requested: false,
            status: None,
            data,
        }
    }

    /// Swap in freshly fetched data
    pub fn replace_data(&mut self, data: DashboardData) {
        self.data = data;
        self.refresh_requested = false;
        self.selected_index = self.selected_index.min(self.max_index());
        self.status = Some("Refreshed".to_string());
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            KeyCode::Char('?') => {
                self.show_help = true;
            }

            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.refresh_requested = true;
                self.status = Some("Refreshing...".to_string());
            }

            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.select_tab(self.selected_tab.next());
            }

            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.select_tab(self.selected_tab.prev());
            }

            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.select_tab(Tab::ALL[idx]);
            }

            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index < self.max_index() {
                    self.selected_index += 1;
                }
            }

            _ => {}
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        if self.selected_tab != tab {
            self.selected_tab = tab;
            self.selected_index = 0;
        }
    }

    /// Last selectable row in the current tab
    fn max_index(&self) -> usize {
        let rows = match self.selected_tab {
            Tab::Summary => self.data.summary.upcoming.len(),
            Tab::Calendar => self.data.calendar.days.len(),
            Tab::Trends => self.data.trends.points.len(),
            Tab::Achievements => self.data.achievements.len(),
        };
        rows.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_achievements(n: usize) -> App {
        let achievements = (0..n)
            .map(|i| Achievement {
                id: i.to_string(),
                title: format!("Badge {}", i),
                description: None,
                unlocked: i % 2 == 0,
                unlocked_at: None,
            })
            .collect();
        App::new(DashboardData {
            achievements,
            ..Default::default()
        })
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = app_with_achievements(0);
        assert_eq!(app.selected_tab, Tab::Summary);

        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.selected_tab, Tab::Achievements);

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selected_tab, Tab::Summary);

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.selected_tab, Tab::Trends);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app_with_achievements(0);
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc);
        assert!(!app.show_help);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_selection_is_bounded_and_reset_on_tab_change() {
        let mut app = app_with_achievements(3);
        app.handle_key(KeyCode::Char('4'));

        for _ in 0..5 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected_index, 2);

        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected_index, 1);

        app.handle_key(KeyCode::Left);
        assert_eq!(app.selected_tab, Tab::Trends);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_refresh_request_cleared_by_new_data() {
        let mut app = app_with_achievements(3);
        app.handle_key(KeyCode::Char('r'));
        assert!(app.refresh_requested);

        app.replace_data(DashboardData::default());
        assert!(!app.refresh_requested);
        assert_eq!(app.status.as_deref(), Some("Refreshed"));
    }
}
