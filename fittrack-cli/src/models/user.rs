use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Signed-in user as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl User {
    /// All profile attributes required after registration are present
    pub fn is_profile_complete(&self) -> bool {
        self.date_of_birth.is_some()
            && self.height_cm.is_some()
            && self.weight_kg.is_some()
            && self.fitness_level.is_some()
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }

    /// Age in whole years on the given day
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.and_then(|dob| age_on(dob, today))
    }
}

/// Whole years between `dob` and `today`, `None` if `dob` is in the future
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    if dob > today {
        return None;
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Profile completion / edit payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub date_of_birth: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_level: FitnessLevel,
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessLevel::Beginner => write!(f, "Beginner"),
            FitnessLevel::Intermediate => write!(f, "Intermediate"),
            FitnessLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for FitnessLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            _ => Err(anyhow::anyhow!("Invalid fitness level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            first_name: None,
            last_name: None,
            date_of_birth: None,
            height_cm: None,
            weight_kg: None,
            fitness_level: None,
        }
    }

    #[test]
    fn test_profile_completeness() {
        let mut user = user();
        assert!(!user.is_profile_complete());

        user.date_of_birth = NaiveDate::from_ymd_opt(1990, 5, 17);
        user.height_cm = Some(180.0);
        user.weight_kg = Some(80.0);
        assert!(!user.is_profile_complete());

        user.fitness_level = Some(FitnessLevel::Intermediate);
        assert!(user.is_profile_complete());
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2020, 5, 16).unwrap()), Some(29));
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2020, 5, 17).unwrap()), Some(30));
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()), None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = user();
        assert_eq!(user.display_name(), "sam");
        user.first_name = Some("Sam".to_string());
        assert_eq!(user.display_name(), "Sam");
    }
}
