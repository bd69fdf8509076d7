use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Exercise, Goal, PlanRequest, ScheduledWorkout};

/// Aggregated statistics for the dashboard landing view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub completed_this_week: u32,
    #[serde(default)]
    pub current_streak_days: u32,
    #[serde(default)]
    pub total_minutes: u32,
    #[serde(default)]
    pub active_goal: Option<Goal>,
    #[serde(default)]
    pub upcoming: Vec<ScheduledWorkout>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    #[serde(default)]
    pub workouts: Vec<ScheduledWorkout>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Number of scheduled entries across the month
    pub fn workout_count(&self) -> usize {
        self.days.iter().map(|d| d.workouts.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    #[serde(default)]
    pub workouts: u32,
    #[serde(default)]
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trends {
    pub period: String,
    #[serde(default)]
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/recommendations/generate`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RecommendationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// Backend-generated workout suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Recommendation {
    /// Turn a suggestion into a plan the user can save
    pub fn to_plan_request(&self) -> PlanRequest {
        PlanRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            exercises: self.exercises.clone(),
            duration_minutes: self.duration_minutes,
            difficulty: None,
        }
    }
}
