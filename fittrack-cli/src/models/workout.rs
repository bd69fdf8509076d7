use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A single exercise inside a workout plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    /// Compact prescription, e.g. "3x10" or "20 min"
    pub fn prescription(&self) -> String {
        match (self.sets, self.reps, self.duration_minutes) {
            (Some(s), Some(r), _) => format!("{}x{}", s, r),
            (Some(s), None, Some(d)) => format!("{}x{} min", s, d),
            (None, None, Some(d)) => format!("{} min", d),
            (Some(s), None, None) => format!("{} sets", s),
            (None, Some(r), _) => format!("{} reps", r),
            (None, None, None) => "-".to_string(),
        }
    }
}

/// Named collection of exercises owned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing a plan
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PlanRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    Missed,
}

/// A workout plan placed on a specific date and time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub id: String,
    pub workout_plan_id: String,
    #[serde(default)]
    pub plan_name: Option<String>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub status: WorkoutStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScheduledWorkout {
    /// Label shown in listings
    pub fn title(&self) -> &str {
        self.plan_name.as_deref().unwrap_or(&self.workout_plan_id)
    }

    /// Parsed date, if the backend sent a well-formed one
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.scheduled_date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleRequest {
    pub workout_plan_id: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RescheduleRequest {
    pub scheduled_date: String,
    pub scheduled_time: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CompleteWorkoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Normalise user input to the `YYYY-MM-DD` form the backend compares on
pub fn normalize_date(input: &str) -> anyhow::Result<String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}', expected YYYY-MM-DD", input))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Normalise user input to the `HH:MM` form the backend compares on
pub fn normalize_time(input: &str) -> anyhow::Result<String> {
    let input = input.trim();
    let time = NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| anyhow::anyhow!("Invalid time '{}', expected HH:MM", input))?;
    Ok(time.format("%H:%M").to_string())
}

impl std::fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutStatus::Planned => write!(f, "Planned"),
            WorkoutStatus::InProgress => write!(f, "In progress"),
            WorkoutStatus::Completed => write!(f, "Completed"),
            WorkoutStatus::Cancelled => write!(f, "Cancelled"),
            WorkoutStatus::Missed => write!(f, "Missed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let status: WorkoutStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, WorkoutStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&WorkoutStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_exercise_prescription() {
        let squat = Exercise {
            name: "Squat".to_string(),
            sets: Some(3),
            reps: Some(10),
            ..Default::default()
        };
        assert_eq!(squat.prescription(), "3x10");

        let run = Exercise {
            name: "Run".to_string(),
            duration_minutes: Some(20),
            ..Default::default()
        };
        assert_eq!(run.prescription(), "20 min");
    }

    #[test]
    fn test_normalize_date_and_time() {
        assert_eq!(normalize_date(" 2024-03-05 ").unwrap(), "2024-03-05");
        assert!(normalize_date("05/03/2024").is_err());

        assert_eq!(normalize_time("7:30").unwrap(), "07:30");
        assert_eq!(normalize_time("18:00:00").unwrap(), "18:00");
        assert!(normalize_time("25:00").is_err());
    }
}
