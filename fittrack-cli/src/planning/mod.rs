// Client-side goal and scheduling checks run before anything is submitted

mod calories;
mod schedule;
mod validator;

use thiserror::Error;

pub use calories::{plan_calories, CaloriePlan, KCAL_PER_KG_GAIN, KCAL_PER_KG_LOSS, WEEKS_PER_MONTH};
pub use schedule::{find_conflict, find_conflict_except, has_conflict};
pub use validator::{validate_goal, GoalValidation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("Timeframe must be at least 1 month")]
    ZeroTimeframe,

    #[error("Target weight change must not be negative (got {0} kg)")]
    NegativeTarget(f64),
}
