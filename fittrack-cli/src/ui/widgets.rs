use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Widget},
};

use super::app::Tab;
use crate::models::{
    Achievement, CalendarMonth, DashboardSummary, ScheduledWorkout, Trends, WorkoutStatus,
};

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Gray))
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn status_color(status: WorkoutStatus) -> Color {
    match status {
        WorkoutStatus::Planned => Color::Cyan,
        WorkoutStatus::InProgress => Color::Yellow,
        WorkoutStatus::Completed => Color::Green,
        WorkoutStatus::Cancelled => Color::DarkGray,
        WorkoutStatus::Missed => Color::Red,
    }
}

fn workout_line(workout: &ScheduledWorkout, selected: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} {}  ", workout.scheduled_date, workout.scheduled_time),
            row_style(selected),
        ),
        Span::styled(workout.title().to_string(), row_style(selected)),
        Span::styled(
            format!("  [{}]", workout.status),
            Style::default().fg(status_color(workout.status)),
        ),
    ])
}

/// Render the tab bar
pub fn render_tabs(area: Rect, buf: &mut Buffer, selected: Tab) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()))
        .collect();

    Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" FitTrack "))
        .select(selected.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .render(area, buf);
}

/// Render the summary tab: headline numbers, active goal and upcoming workouts
pub fn render_summary(
    area: Rect,
    buf: &mut Buffer,
    summary: &DashboardSummary,
    selected_index: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let block = panel(" 📊 Overview ");
    let inner = block.inner(chunks[0]);
    block.render(chunks[0], buf);

    let stat = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let goal_line = match &summary.active_goal {
        Some(goal) => {
            let mut text = goal.summary();
            if let Some(adj) = goal.daily_calorie_adjustment {
                text.push_str(&format!(" ({:.0} kcal/day)", adj));
            }
            stat("Active goal:", text, Color::Magenta)
        }
        None => stat("Active goal:", "none".to_string(), Color::DarkGray),
    };

    let lines = vec![
        stat("Total workouts:", summary.total_workouts.to_string(), Color::Green),
        stat(
            "Completed this week:",
            summary.completed_this_week.to_string(),
            Color::Cyan,
        ),
        stat(
            "Current streak:",
            format!("{} days", summary.current_streak_days),
            Color::Yellow,
        ),
        stat("Total time:", format!("{} min", summary.total_minutes), Color::Blue),
        Line::from(""),
        goal_line,
    ];
    Paragraph::new(lines).render(inner, buf);

    let block = panel(" 🗓  Upcoming ");
    let inner = block.inner(chunks[1]);
    block.render(chunks[1], buf);

    if summary.upcoming.is_empty() {
        Paragraph::new("Nothing scheduled.\nUse 'fittrack schedule add' to plan a workout.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = summary
        .upcoming
        .iter()
        .enumerate()
        .map(|(idx, w)| ListItem::new(workout_line(w, idx == selected_index)))
        .collect();
    List::new(items).render(inner, buf);
}

/// Render the calendar tab as a day-by-day list
pub fn render_calendar(
    area: Rect,
    buf: &mut Buffer,
    calendar: &CalendarMonth,
    selected_index: usize,
) {
    let title = format!(
        " 📅 {:04}-{:02} ({} workouts) ",
        calendar.year,
        calendar.month,
        calendar.workout_count()
    );
    let block = panel(&title);
    let inner = block.inner(area);
    block.render(area, buf);

    if calendar.days.is_empty() {
        Paragraph::new("No workouts this month.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let mut items = Vec::new();
    for (idx, day) in calendar.days.iter().enumerate() {
        items.push(ListItem::new(Line::from(Span::styled(
            day.date.clone(),
            row_style(idx == selected_index).add_modifier(Modifier::UNDERLINED),
        ))));
        for workout in &day.workouts {
            let mut line = workout_line(workout, false);
            line.spans.insert(0, Span::raw("  "));
            items.push(ListItem::new(line));
        }
    }
    List::new(items).render(inner, buf);
}

/// Render trends as a bar chart of workouts per bucket
pub fn render_trends(area: Rect, buf: &mut Buffer, trends: &Trends) {
    let title = format!(" 📈 Trends ({}) ", trends.period);
    let block = panel(&title);
    let inner = block.inner(area);
    block.render(area, buf);

    if trends.points.is_empty() {
        Paragraph::new("No activity recorded for this period.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(inner);

    let data: Vec<(&str, u64)> = trends
        .points
        .iter()
        .map(|p| (p.label.as_str(), u64::from(p.workouts)))
        .collect();

    BarChart::default()
        .data(&data)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::White).bg(Color::Green))
        .render(chunks[0], buf);

    let total_minutes: u32 = trends.points.iter().map(|p| p.minutes).sum();
    let total_workouts: u32 = trends.points.iter().map(|p| p.workouts).sum();
    Paragraph::new(format!(
        "{} workouts, {} minutes in total",
        total_workouts, total_minutes
    ))
    .style(Style::default().fg(Color::Gray))
    .render(chunks[1], buf);
}

/// Render the achievements list
pub fn render_achievements(
    area: Rect,
    buf: &mut Buffer,
    achievements: &[Achievement],
    selected_index: usize,
) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let title = format!(" 🏆 Achievements ({}/{}) ", unlocked, achievements.len());
    let block = panel(&title);
    let inner = block.inner(area);
    block.render(area, buf);

    if achievements.is_empty() {
        Paragraph::new("No achievements yet.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = achievements
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            let icon = if a.unlocked { "★" } else { "☆" };
            let style = if a.unlocked {
                row_style(idx == selected_index)
            } else {
                row_style(idx == selected_index).fg(Color::DarkGray)
            };
            let mut spans = vec![Span::styled(format!("{} {}", icon, a.title), style)];
            if let Some(desc) = &a.description {
                spans.push(Span::styled(
                    format!(" - {}", desc),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().fg(Color::Cyan))),
        Line::from("  Tab / →/l   - Next tab"),
        Line::from("  S-Tab / ←/h - Previous tab"),
        Line::from("  1-4         - Jump to tab"),
        Line::from("  ↑/k ↓/j     - Move selection"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  r           - Refresh from server"),
        Line::from("  ?           - Toggle this help"),
        Line::from("  q / Esc     - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, status: Option<&str>) {
    let mut spans = Vec::new();
    if let Some(status) = status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        " Press ? for help ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    ));

    Paragraph::new(Line::from(spans)).render(area, buf);
}
