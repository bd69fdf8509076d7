use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;

use super::app::{App, DashboardData, Tab};
use super::widgets;
use crate::api::ApiClient;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard<'a> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    client: &'a ApiClient,
    trend_period: String,
}

impl<'a> Dashboard<'a> {
    /// Set up the terminal around already-fetched data
    pub fn new(client: &'a ApiClient, data: DashboardData, trend_period: String) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            app: App::new(data),
            client,
            trend_period,
        })
    }

    /// Run the dashboard event loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.app.handle_key(key.code);
                    }
                }
            }

            if self.app.should_quit {
                break;
            }

            if self.app.refresh_requested {
                // Show the "Refreshing..." status before blocking on the network
                let app = &self.app;
                self.terminal.draw(|f| ui(f, app))?;

                let today = Local::now().date_naive();
                match DashboardData::fetch(self.client, today, &self.trend_period).await {
                    Ok(data) => self.app.replace_data(data),
                    Err(e) => {
                        tracing::warn!("Dashboard refresh failed: {:#}", e);
                        self.app.refresh_requested = false;
                        self.app.status = Some(format!("Refresh failed: {}", e));
                        if !self.client.is_authenticated() {
                            self.app.should_quit = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard<'_> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    widgets::render_tabs(chunks[0], f.buffer_mut(), app.selected_tab);

    match app.selected_tab {
        Tab::Summary => widgets::render_summary(
            chunks[1],
            f.buffer_mut(),
            &app.data.summary,
            app.selected_index,
        ),
        Tab::Calendar => widgets::render_calendar(
            chunks[1],
            f.buffer_mut(),
            &app.data.calendar,
            app.selected_index,
        ),
        Tab::Trends => widgets::render_trends(chunks[1], f.buffer_mut(), &app.data.trends),
        Tab::Achievements => widgets::render_achievements(
            chunks[1],
            f.buffer_mut(),
            &app.data.achievements,
            app.selected_index,
        ),
    }

    widgets::render_status_bar(chunks[2], f.buffer_mut(), app.status.as_deref());

    if app.show_help {
        let help_area = centered_rect(60, 70, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
