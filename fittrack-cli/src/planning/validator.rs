use serde::Serialize;

use crate::models::GoalType;

/// Lowest body weight a weight-loss goal may end at (kg)
pub const MIN_RESULT_WEIGHT_KG: f64 = 40.0;
/// Largest share of body weight a loss target may be
pub const MAX_LOSS_FRACTION: f64 = 0.25;
/// Loss targets above this many kg get a warning
pub const LOSS_WARNING_KG: f64 = 15.0;
/// Loss targets above this share of body weight get a warning
pub const LOSS_WARNING_FRACTION: f64 = 0.15;
/// Gain targets above this are rejected (kg)
pub const MAX_GAIN_KG: f64 = 25.0;
/// Gain targets above this get the "very ambitious" warning (kg)
pub const GAIN_STRONG_WARNING_KG: f64 = 15.0;
/// Gain targets above this get a mild warning (kg)
pub const GAIN_WARNING_KG: f64 = 10.0;

/// Outcome of checking a goal before it is submitted.
///
/// `valid` is false exactly when `error` is set. A valid goal may still
/// carry a `warning` the user should acknowledge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalValidation {
    pub valid: bool,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl GoalValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            warning: None,
            error: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            warning: Some(message.into()),
            error: None,
        }
    }

    fn reject(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            warning: None,
            error: Some(message.into()),
        }
    }

    pub fn has_warning(&self) -> bool {
        self.warning.is_some()
    }
}

/// Check a goal's numbers against the safety bounds.
///
/// `target` is the weight change in kg (always positive, direction comes from
/// `goal_type`). Maintenance goals ignore it.
pub fn validate_goal(
    goal_type: GoalType,
    current_weight: f64,
    target: Option<f64>,
    timeframe_months: u32,
) -> GoalValidation {
    if !(current_weight.is_finite() && current_weight > 0.0) {
        return GoalValidation::reject("Current weight must be greater than 0 kg");
    }
    if timeframe_months == 0 {
        return GoalValidation::reject("Timeframe must be at least 1 month");
    }

    if !goal_type.needs_target() {
        return GoalValidation::ok();
    }

    let target = match target {
        Some(t) if t.is_finite() && t > 0.0 => t,
        _ => return GoalValidation::reject("Target must be a positive number of kilograms"),
    };

    match goal_type {
        GoalType::LoseWeight => validate_loss(current_weight, target),
        GoalType::GainMuscle => validate_gain(target),
        GoalType::MaintainHealth => GoalValidation::ok(),
    }
}

fn validate_loss(current: f64, target: f64) -> GoalValidation {
    if target >= current {
        return GoalValidation::reject("Weight loss target must be less than your current weight");
    }

    let resulting = current - target;
    if resulting < MIN_RESULT_WEIGHT_KG {
        return GoalValidation::reject(format!(
            "Resulting weight of {:.1} kg is below the safe minimum of {:.0} kg",
            resulting, MIN_RESULT_WEIGHT_KG
        ));
    }

    if target > current * MAX_LOSS_FRACTION {
        return GoalValidation::reject(format!(
            "Losing {:.1} kg is unsafe: targets may not exceed {:.0}% of body weight ({:.1} kg)",
            target,
            MAX_LOSS_FRACTION * 100.0,
            current * MAX_LOSS_FRACTION
        ));
    }

    if target > LOSS_WARNING_KG || target > current * LOSS_WARNING_FRACTION {
        return GoalValidation::warn(format!(
            "Losing {:.1} kg is an ambitious target; consider consulting a healthcare professional",
            target
        ));
    }

    GoalValidation::ok()
}

fn validate_gain(target: f64) -> GoalValidation {
    if target > MAX_GAIN_KG {
        return GoalValidation::reject(format!(
            "Muscle gain targets above {:.0} kg are not realistic",
            MAX_GAIN_KG
        ));
    }
    if target > GAIN_STRONG_WARNING_KG {
        return GoalValidation::warn(format!(
            "Gaining {:.1} kg of muscle is very ambitious and may take well over a year",
            target
        ));
    }
    if target > GAIN_WARNING_KG {
        return GoalValidation::warn(format!(
            "Gaining {:.1} kg of muscle is ambitious; expect some fat gain alongside",
            target
        ));
    }
    GoalValidation::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loss(current: f64, target: f64) -> GoalValidation {
        validate_goal(GoalType::LoseWeight, current, Some(target), 3)
    }

    #[test]
    fn test_loss_target_not_below_current_is_invalid() {
        for (c, t) in [(80.0, 80.0), (80.0, 95.0), (80.0, 0.0), (80.0, -3.0)] {
            let result = loss(c, t);
            assert!(!result.valid, "current {} target {}", c, t);
            assert!(result.error.is_some());
        }
    }

    #[test]
    fn test_loss_floor_applies_regardless_of_fraction() {
        // 10% of body weight, but would end at 39 kg
        let result = loss(43.0, 4.0);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("safe minimum"));
    }

    #[test]
    fn test_loss_above_quarter_is_unsafe() {
        let result = loss(100.0, 26.0);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("unsafe"));

        assert!(loss(100.0, 25.0).valid);
    }

    #[test]
    fn test_loss_warning_bands() {
        // Above 15 kg
        let result = loss(120.0, 16.0);
        assert!(result.valid);
        assert!(result.has_warning());

        // Above 15% of body weight but under 15 kg
        let result = loss(70.0, 12.0);
        assert!(result.valid);
        assert!(result.has_warning());
    }

    #[test]
    fn test_moderate_loss_is_clean() {
        let result = loss(80.0, 5.0);
        assert_eq!(
            result,
            GoalValidation {
                valid: true,
                warning: None,
                error: None
            }
        );
        // Exactly at the kilogram warning limit
        let result = loss(120.0, 15.0);
        assert!(result.valid && !result.has_warning());
    }

    #[test]
    fn test_gain_bands() {
        let gain = |t| validate_goal(GoalType::GainMuscle, 70.0, Some(t), 12);

        assert!(!gain(26.0).valid);
        let strong = gain(20.0);
        assert!(strong.valid && strong.warning.as_deref().unwrap().contains("very ambitious"));
        let mild = gain(12.0);
        assert!(mild.valid && mild.has_warning());
        assert_eq!(gain(8.0), GoalValidation::ok());
        assert!(!gain(0.0).valid);
    }

    #[test]
    fn test_maintain_ignores_target() {
        let result = validate_goal(GoalType::MaintainHealth, 70.0, None, 6);
        assert!(result.valid && !result.has_warning());
    }

    #[test]
    fn test_rejects_bad_weight_or_timeframe() {
        assert!(!validate_goal(GoalType::MaintainHealth, 0.0, None, 6).valid);
        assert!(!validate_goal(GoalType::LoseWeight, 80.0, Some(5.0), 0).valid);
    }
}
