use crate::models::{ScheduledWorkout, WorkoutStatus};

/// Existing non-cancelled entry occupying exactly this date and time.
///
/// Dates and times are compared as the strings the backend returns; callers
/// normalise user input first (see `models::workout::normalize_date`).
pub fn find_conflict<'a>(
    existing: &'a [ScheduledWorkout],
    date: &str,
    time: &str,
) -> Option<&'a ScheduledWorkout> {
    find_conflict_except(existing, date, time, None)
}

/// Like [`find_conflict`], but the workout with id `moving` is skipped so a
/// reschedule never collides with its own current slot.
pub fn find_conflict_except<'a>(
    existing: &'a [ScheduledWorkout],
    date: &str,
    time: &str,
    moving: Option<&str>,
) -> Option<&'a ScheduledWorkout> {
    existing.iter().find(|w| {
        w.status != WorkoutStatus::Cancelled
            && w.scheduled_date == date
            && w.scheduled_time == time
            && moving != Some(w.id.as_str())
    })
}

pub fn has_conflict(existing: &[ScheduledWorkout], date: &str, time: &str) -> bool {
    find_conflict(existing, date, time).is_some()
}
