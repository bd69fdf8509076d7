use anyhow::Result;
use chrono::{Datelike, Local};
use colored::Colorize;

use super::{authenticated_client, report_failure, with_spinner};
use crate::config::Config;
use crate::models::{Achievement, CalendarMonth, DashboardSummary, Trends};

/// Widest bar in the text trend chart
const BAR_WIDTH: u32 = 30;

pub(super) fn print_summary(summary: &DashboardSummary) {
    println!("{}", "Training Statistics".bold());
    println!("────────────────────────────────");
    println!("  Total workouts:       {}", summary.total_workouts);
    println!("  Completed this week:  {}", summary.completed_this_week);
    println!("  Current streak:       {} days", summary.current_streak_days);
    println!("  Total time:           {} min", summary.total_minutes);
    println!();

    match &summary.active_goal {
        Some(goal) => println!("  Active goal: {}", goal.summary().magenta()),
        None => println!("  No active goal. Set one with 'fittrack goals create'."),
    }

    if !summary.upcoming.is_empty() {
        println!();
        println!("{}", "Upcoming".bold());
        for w in &summary.upcoming {
            println!(
                "  {} {}  {}  [{}]",
                w.scheduled_date,
                w.scheduled_time,
                w.title(),
                w.status
            );
        }
    }
}

fn print_calendar(calendar: &CalendarMonth) {
    println!(
        "{}",
        format!(
            "Calendar {:04}-{:02} ({} workouts)",
            calendar.year,
            calendar.month,
            calendar.workout_count()
        )
        .bold()
    );
    println!();

    if calendar.days.is_empty() {
        println!("No workouts this month.");
        return;
    }

    for day in &calendar.days {
        println!("{}", day.date.underline());
        for w in &day.workouts {
            println!("  {}  {}  [{}]", w.scheduled_time, w.title(), w.status);
        }
    }
}

fn print_trends(trends: &Trends) {
    println!("{}", format!("Trends ({})", trends.period).bold());
    println!();

    if trends.points.is_empty() {
        println!("No activity recorded for this period.");
        return;
    }

    let max = trends.points.iter().map(|p| p.workouts).max().unwrap_or(0).max(1);
    let label_width = trends
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    for p in &trends.points {
        let len = (p.workouts * BAR_WIDTH / max) as usize;
        println!(
            "  {:<width$}  {} {} ({} min)",
            p.label,
            "█".repeat(len).green(),
            p.workouts,
            p.minutes,
            width = label_width
        );
    }
}

fn print_achievements(achievements: &[Achievement]) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    println!(
        "{}",
        format!("Achievements ({}/{})", unlocked, achievements.len()).bold()
    );
    println!();

    if achievements.is_empty() {
        println!("No achievements yet.");
        return;
    }

    for a in achievements {
        let line = match &a.description {
            Some(desc) => format!("{} - {}", a.title, desc),
            None => a.title.clone(),
        };
        if a.unlocked {
            let when = a
                .unlocked_at
                .map(|t| format!(" ({})", t.format("%Y-%m-%d")))
                .unwrap_or_default();
            println!("  {} {}{}", "★".yellow(), line, when.dimmed());
        } else {
            println!("  {} {}", "☆".dimmed(), line.dimmed());
        }
    }
}

pub async fn summary(config: Config) -> Result<()> {
    let client = authenticated_client(config)?;

    match with_spinner("Fetching statistics...", client.dashboard_summary()).await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to fetch statistics", &e);
            Err(e)
        }
    }
}

pub async fn calendar(config: Config, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let client = authenticated_client(config)?;

    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    match with_spinner("Fetching calendar...", client.dashboard_calendar(year, month)).await {
        Ok(calendar) => {
            print_calendar(&calendar);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to fetch calendar", &e);
            Err(e)
        }
    }
}

pub async fn trends(config: Config, period: Option<String>) -> Result<()> {
    let period = period.unwrap_or_else(|| config.ui.default_trend_period.clone());
    let client = authenticated_client(config)?;

    match with_spinner("Fetching trends...", client.dashboard_trends(&period)).await {
        Ok(trends) => {
            print_trends(&trends);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to fetch trends", &e);
            Err(e)
        }
    }
}

pub async fn achievements(config: Config) -> Result<()> {
    let client = authenticated_client(config)?;

    match with_spinner("Fetching achievements...", client.achievements()).await {
        Ok(achievements) => {
            print_achievements(&achievements);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to fetch achievements", &e);
            Err(e)
        }
    }
}
