use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Goal as stored by the backend; derived fields are computed server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub goal_type: GoalType,
    pub current_weight: f64,
    #[serde(default, alias = "target")]
    pub target_weight_change: Option<f64>,
    pub timeframe_months: u32,
    #[serde(default, alias = "daily_calorie_deficit")]
    pub daily_calorie_adjustment: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    LoseWeight,
    GainMuscle,
    MaintainHealth,
}

impl GoalType {
    /// Whether this goal type carries a weight target
    pub fn needs_target(&self) -> bool {
        !matches!(self, GoalType::MaintainHealth)
    }

    /// "deficit", "surplus" or "balance"
    pub fn adjustment_kind(&self) -> &'static str {
        match self {
            GoalType::LoseWeight => "deficit",
            GoalType::GainMuscle => "surplus",
            GoalType::MaintainHealth => "balance",
        }
    }
}

/// Payload for `POST /api/goals`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateGoalRequest {
    pub goal_type: GoalType,
    pub current_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_change: Option<f64>,
    pub timeframe_months: u32,
}

/// Payload for `PUT /api/goals/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateGoalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateGoalRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Goal {
    /// Apply an update locally so it can be re-validated before sending
    pub fn merged(&self, update: &UpdateGoalRequest) -> Goal {
        let mut goal = self.clone();
        if let Some(w) = update.current_weight {
            goal.current_weight = w;
        }
        if let Some(t) = update.target_weight_change {
            goal.target_weight_change = Some(t);
        }
        if let Some(m) = update.timeframe_months {
            goal.timeframe_months = m;
        }
        if let Some(a) = update.is_active {
            goal.is_active = a;
        }
        goal
    }

    /// One-line description, e.g. "Lose 5.0 kg in 3 months"
    pub fn summary(&self) -> String {
        let months = if self.timeframe_months == 1 { "month" } else { "months" };
        match (self.goal_type, self.target_weight_change) {
            (GoalType::LoseWeight, Some(t)) => {
                format!("Lose {:.1} kg in {} {}", t, self.timeframe_months, months)
            }
            (GoalType::GainMuscle, Some(t)) => {
                format!("Gain {:.1} kg in {} {}", t, self.timeframe_months, months)
            }
            _ => format!("{} for {} {}", self.goal_type, self.timeframe_months, months),
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalType::LoseWeight => write!(f, "Lose weight"),
            GoalType::GainMuscle => write!(f, "Gain muscle"),
            GoalType::MaintainHealth => write!(f, "Maintain health"),
        }
    }
}

impl std::str::FromStr for GoalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "lose_weight" | "lose" => Ok(GoalType::LoseWeight),
            "gain_muscle" | "gain" => Ok(GoalType::GainMuscle),
            "maintain_health" | "maintain" => Ok(GoalType::MaintainHealth),
            _ => Err(anyhow::anyhow!("Invalid goal type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_deserializes_server_fields() {
        let json = r#"{
            "id": "g1",
            "goal_type": "lose_weight",
            "current_weight": 80.0,
            "target": 5.0,
            "timeframe_months": 3,
            "daily_calorie_deficit": 423.0,
            "target_weight": 75.0
        }"#;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.goal_type, GoalType::LoseWeight);
        assert_eq!(goal.target_weight_change, Some(5.0));
        assert_eq!(goal.daily_calorie_adjustment, Some(423.0));
        assert!(goal.is_active);
        assert_eq!(goal.summary(), "Lose 5.0 kg in 3 months");
    }

    #[test]
    fn test_maintain_goal_adjustment_is_a_balance() {
        let json = r#"{"id": "g2", "goal_type": "maintain_health", "current_weight": 70.0,
                       "timeframe_months": 12, "daily_calorie_adjustment": 0}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();

        assert_eq!(goal.goal_type.adjustment_kind(), "balance");
        assert_eq!(GoalType::LoseWeight.adjustment_kind(), "deficit");
        assert_eq!(GoalType::GainMuscle.adjustment_kind(), "surplus");
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let update = UpdateGoalRequest {
            timeframe_months: Some(6),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "timeframe_months": 6 }));
        assert!(UpdateGoalRequest::default().is_empty());
    }

    #[test]
    fn test_goal_type_from_str() {
        assert_eq!("lose_weight".parse::<GoalType>().unwrap(), GoalType::LoseWeight);
        assert_eq!("Gain Muscle".parse::<GoalType>().unwrap(), GoalType::GainMuscle);
        assert_eq!("maintain".parse::<GoalType>().unwrap(), GoalType::MaintainHealth);
        assert!("bulk".parse::<GoalType>().is_err());
    }
}
