use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::{ColoredString, Colorize};
use dialoguer::Input;
use std::fmt::Write;

use super::{authenticated_client, confirm, report_failure, success, warning, with_spinner};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{
    normalize_date, normalize_time, CompleteWorkoutRequest, RescheduleRequest, ScheduleRequest,
    ScheduledWorkout, WorkoutStatus,
};

fn status_label(status: WorkoutStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        WorkoutStatus::Planned => text.cyan(),
        WorkoutStatus::InProgress => text.yellow(),
        WorkoutStatus::Completed => text.green(),
        WorkoutStatus::Cancelled => text.dimmed(),
        WorkoutStatus::Missed => text.red(),
    }
}

/// Date in the user's configured format, or as sent when either side is malformed
fn display_date(workout: &ScheduledWorkout, date_format: &str) -> String {
    let mut out = String::new();
    match workout.date() {
        Some(d) if write!(out, "{}", d.format(date_format)).is_ok() => out,
        _ => workout.scheduled_date.clone(),
    }
}

fn print_workout(workout: &ScheduledWorkout, date_format: &str) {
    let date = display_date(workout, date_format);
    println!(
        "{}  {} {}  {}  [{}]",
        workout.id.cyan(),
        date,
        workout.scheduled_time,
        workout.title(),
        status_label(workout.status)
    );
    if let Some(notes) = &workout.notes {
        println!("    {}", notes.dimmed());
    }
}

fn prompt_date(given: Option<String>) -> Result<String> {
    let raw = match given {
        Some(raw) => raw,
        None => Input::new()
            .with_prompt("Date (YYYY-MM-DD)")
            .default(Local::now().date_naive().to_string())
            .interact_text()?,
    };
    normalize_date(&raw)
}

fn prompt_time(given: Option<String>) -> Result<String> {
    let raw = match given {
        Some(raw) => raw,
        None => Input::new()
            .with_prompt("Time (HH:MM)")
            .default("18:00".to_string())
            .interact_text()?,
    };
    normalize_time(&raw)
}

/// Advisory double-booking check. Returns false when the user backs out.
///
/// `moving` is the workout being rescheduled, which never conflicts with itself.
async fn slot_is_acceptable(
    client: &ApiClient,
    date: &str,
    time: &str,
    moving: Option<&str>,
    force: bool,
) -> Result<bool> {
    let check = async {
        match moving {
            Some(id) => client.check_reschedule_conflict(id, date, time).await,
            None => client.check_schedule_conflict(date, time).await,
        }
    };
    let conflict = match with_spinner("Checking schedule...", check).await {
        Ok(conflict) => conflict,
        Err(e) => {
            report_failure("Failed to check schedule", &e);
            return Err(e);
        }
    };

    let Some(existing) = conflict else {
        return Ok(true);
    };

    warning(format!(
        "'{}' is already scheduled at {} {}",
        existing.title(),
        date,
        time
    ));
    if force {
        return Ok(true);
    }
    confirm("Schedule anyway?", false)
}

pub async fn list_scheduled(config: Config, show_all: bool, from: Option<String>) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    let from: Option<NaiveDate> = match from {
        Some(raw) => Some(NaiveDate::parse_from_str(&normalize_date(&raw)?, "%Y-%m-%d")?),
        None => None,
    };

    let mut workouts = match with_spinner("Fetching schedule...", client.list_scheduled()).await {
        Ok(workouts) => workouts,
        Err(e) => {
            report_failure("Failed to fetch schedule", &e);
            return Err(e);
        }
    };

    workouts.retain(|w| show_all || w.status != WorkoutStatus::Cancelled);
    if let Some(from) = from {
        workouts.retain(|w| w.date().map_or(true, |d| d >= from));
    }
    workouts.sort_by(|a, b| {
        (&a.scheduled_date, &a.scheduled_time).cmp(&(&b.scheduled_date, &b.scheduled_time))
    });

    println!("{}", "Scheduled workouts".bold());
    println!();

    if workouts.is_empty() {
        println!("Nothing scheduled. Use 'fittrack schedule add <PLAN_ID>'.");
        return Ok(());
    }

    for workout in &workouts {
        print_workout(workout, &date_format);
    }

    Ok(())
}

pub async fn add(
    config: Config,
    plan_id: String,
    date: Option<String>,
    time: Option<String>,
    notes: Option<String>,
    force: bool,
) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    let scheduled_date = prompt_date(date)?;
    let scheduled_time = prompt_time(time)?;

    if !slot_is_acceptable(&client, &scheduled_date, &scheduled_time, None, force).await? {
        println!("Not scheduled.");
        return Ok(());
    }

    let request = ScheduleRequest {
        workout_plan_id: plan_id,
        scheduled_date,
        scheduled_time,
        notes: notes.filter(|n| !n.trim().is_empty()),
    };

    match with_spinner("Scheduling workout...", client.schedule_workout(&request)).await {
        Ok(workout) => {
            success("Workout scheduled");
            print_workout(&workout, &date_format);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to schedule workout", &e);
            Err(e)
        }
    }
}

pub async fn reschedule(
    config: Config,
    id: &str,
    date: Option<String>,
    time: Option<String>,
    force: bool,
) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    let scheduled_date = prompt_date(date)?;
    let scheduled_time = prompt_time(time)?;

    if !slot_is_acceptable(&client, &scheduled_date, &scheduled_time, Some(id), force).await? {
        println!("Not rescheduled.");
        return Ok(());
    }

    let request = RescheduleRequest {
        scheduled_date,
        scheduled_time,
    };

    match with_spinner("Rescheduling...", client.reschedule_workout(id, &request)).await {
        Ok(workout) => {
            success("Workout rescheduled");
            print_workout(&workout, &date_format);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to reschedule workout", &e);
            Err(e)
        }
    }
}

pub async fn start(config: Config, id: &str) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    match with_spinner("Starting workout...", client.start_workout(id)).await {
        Ok(workout) => {
            success("Workout started. Good luck!");
            print_workout(&workout, &date_format);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to start workout", &e);
            Err(e)
        }
    }
}

pub async fn complete(
    config: Config,
    id: &str,
    duration: Option<u32>,
    rating: Option<u8>,
    notes: Option<String>,
) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    let request = CompleteWorkoutRequest {
        actual_duration_minutes: duration,
        rating,
        notes: notes.filter(|n| !n.trim().is_empty()),
    };

    match with_spinner("Saving workout...", client.complete_workout(id, &request)).await {
        Ok(workout) => {
            success("Workout completed");
            print_workout(&workout, &date_format);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to complete workout", &e);
            Err(e)
        }
    }
}

pub async fn cancel(config: Config, id: &str, force: bool) -> Result<()> {
    let date_format = config.ui.date_format.clone();
    let client = authenticated_client(config)?;

    if !force && !confirm(&format!("Cancel workout {}?", id), false)? {
        println!("Kept.");
        return Ok(());
    }

    match with_spinner("Cancelling workout...", client.cancel_workout(id)).await {
        Ok(workout) => {
            success("Workout cancelled");
            print_workout(&workout, &date_format);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to cancel workout", &e);
            Err(e)
        }
    }
}
