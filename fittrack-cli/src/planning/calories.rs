use serde::Serialize;

use super::PlanningError;
use crate::models::GoalType;

/// Energy stored in one kilogram of body fat (kcal)
pub const KCAL_PER_KG_LOSS: f64 = 7700.0;
/// Energy needed to build one kilogram of lean mass (kcal)
pub const KCAL_PER_KG_GAIN: f64 = 5500.0;
/// Average weeks per month
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Daily energy plan for reaching a weight target.
///
/// `daily_adjustment` is a deficit for weight loss and a surplus for muscle
/// gain; it is always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaloriePlan {
    pub goal_type: GoalType,
    pub total_weeks: f64,
    pub total_days: f64,
    pub total_calories: f64,
    pub daily_adjustment: f64,
    pub target_weight: f64,
}

impl CaloriePlan {
    /// "deficit", "surplus" or "balance"
    pub fn adjustment_kind(&self) -> &'static str {
        self.goal_type.adjustment_kind()
    }
}

/// Convert a weight change over a number of months into a daily calorie target
pub fn plan_calories(
    goal_type: GoalType,
    current_weight: f64,
    delta_kg: f64,
    timeframe_months: u32,
) -> Result<CaloriePlan, PlanningError> {
    if timeframe_months == 0 {
        return Err(PlanningError::ZeroTimeframe);
    }

    let total_weeks = f64::from(timeframe_months) * WEEKS_PER_MONTH;
    let total_days = (total_weeks * 7.0).round();

    let (total_calories, target_weight) = match goal_type {
        GoalType::LoseWeight => (delta_kg * KCAL_PER_KG_LOSS, current_weight - delta_kg),
        GoalType::GainMuscle => (delta_kg * KCAL_PER_KG_GAIN, current_weight + delta_kg),
        GoalType::MaintainHealth => (0.0, current_weight),
    };

    if total_calories < 0.0 {
        return Err(PlanningError::NegativeTarget(delta_kg));
    }

    Ok(CaloriePlan {
        goal_type,
        total_weeks,
        total_days,
        total_calories,
        daily_adjustment: (total_calories / total_days).round(),
        target_weight,
    })
}
