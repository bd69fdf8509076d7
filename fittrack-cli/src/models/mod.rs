pub mod dashboard;
pub mod goal;
pub mod user;
pub mod workout;

pub use dashboard::{
    Achievement, CalendarDay, CalendarMonth, DashboardSummary, Recommendation,
    RecommendationRequest, TrendPoint, Trends,
};
pub use goal::{CreateGoalRequest, Goal, GoalType, UpdateGoalRequest};
pub use user::{FitnessLevel, ProfileUpdate, User};
pub use workout::{
    normalize_date, normalize_time, CompleteWorkoutRequest, Exercise, PlanRequest,
    RescheduleRequest, ScheduleRequest, ScheduledWorkout, WorkoutPlan, WorkoutStatus,
};
