// Local validation of user input before it is sent to the backend

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::{LoginRequest, RegisterRequest};
use crate::models::user::age_on;
use crate::models::{
    CreateGoalRequest, Exercise, FitnessLevel, GoalType, PlanRequest, ProfileUpdate,
};
use crate::planning::{validate_goal, GoalValidation};

/// A single rejected form field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

type FormResult<T> = Result<T, ValidationError>;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

pub fn validate_email(email: &str) -> FormResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }
    if email.len() > 255 {
        return Err(ValidationError::new(
            "email",
            "Email cannot be longer than 255 characters",
        ));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormResult<LoginRequest> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "Password cannot be empty"));
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self) -> FormResult<RegisterRequest> {
        let username = self.username.trim();
        if username.len() < 3 || username.len() > 50 {
            return Err(ValidationError::new(
                "username",
                "Username must be between 3 and 50 characters",
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(ValidationError::new(
                "username",
                "Username may only contain letters, digits, '.', '_' and '-'",
            ));
        }

        validate_email(&self.email)?;

        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("Password must be at least {} characters long", MIN_PASSWORD_LEN),
            ));
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("Password cannot be longer than {} characters", MAX_PASSWORD_LEN),
            ));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::new(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: non_blank(&self.first_name),
            last_name: non_blank(&self.last_name),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Inputs collected when completing or editing the profile
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub date_of_birth: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_level: String,
}

impl ProfileForm {
    pub const MIN_AGE: u32 = 13;
    pub const MAX_AGE: u32 = 120;

    pub fn validate(&self, today: NaiveDate) -> FormResult<ProfileUpdate> {
        let dob = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").map_err(|_| {
            ValidationError::new("date_of_birth", "Date of birth must be in YYYY-MM-DD format")
        })?;

        let age = age_on(dob, today).ok_or_else(|| {
            ValidationError::new("date_of_birth", "Date of birth cannot be in the future")
        })?;
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(ValidationError::new(
                "date_of_birth",
                format!(
                    "Age must be between {} and {} years",
                    Self::MIN_AGE,
                    Self::MAX_AGE
                ),
            ));
        }

        if !(100.0..=250.0).contains(&self.height_cm) {
            return Err(ValidationError::new(
                "height_cm",
                "Height must be between 100 and 250 cm",
            ));
        }
        if !(30.0..=300.0).contains(&self.weight_kg) {
            return Err(ValidationError::new(
                "weight_kg",
                "Weight must be between 30 and 300 kg",
            ));
        }

        let fitness_level: FitnessLevel = self.fitness_level.parse().map_err(|_| {
            ValidationError::new(
                "fitness_level",
                "Fitness level must be one of: beginner, intermediate, advanced",
            )
        })?;

        Ok(ProfileUpdate {
            date_of_birth: dob,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            fitness_level,
        })
    }
}

/// Inputs collected when creating a workout plan
#[derive(Debug, Clone, Default)]
pub struct PlanForm {
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
    pub duration_minutes: Option<u32>,
    pub difficulty: Option<String>,
}

impl PlanForm {
    pub fn validate(&self) -> FormResult<PlanRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Plan name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(ValidationError::new(
                "name",
                "Plan name cannot be longer than 100 characters",
            ));
        }
        if self.exercises.is_empty() {
            return Err(ValidationError::new(
                "exercises",
                "A plan needs at least one exercise",
            ));
        }
        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                return Err(ValidationError::new("exercises", "Exercise name cannot be empty"));
            }
            if exercise.sets == Some(0) || exercise.reps == Some(0) {
                return Err(ValidationError::new(
                    "exercises",
                    format!("{}: sets and reps must be positive", exercise.name),
                ));
            }
        }
        if self.duration_minutes == Some(0) {
            return Err(ValidationError::new(
                "duration_minutes",
                "Duration must be positive",
            ));
        }

        Ok(PlanRequest {
            name: name.to_string(),
            description: non_blank(&self.description),
            exercises: self.exercises.clone(),
            duration_minutes: self.duration_minutes,
            difficulty: non_blank(&self.difficulty),
        })
    }
}

/// Parse an exercise written as `name[:SETSxREPS|:MINUTESm]`
///
/// Examples: `Squat:3x10`, `Plank:3x1m`, `Easy run:20m`, `Stretching`.
pub fn parse_exercise(input: &str) -> FormResult<Exercise> {
    let (name, prescription) = match input.rsplit_once(':') {
        Some((name, prescription)) => (name.trim(), Some(prescription.trim().to_lowercase())),
        None => (input.trim(), None),
    };
    if name.is_empty() {
        return Err(ValidationError::new("exercises", "Exercise name cannot be empty"));
    }

    let mut exercise = Exercise {
        name: name.to_string(),
        ..Default::default()
    };

    let bad = || {
        ValidationError::new(
            "exercises",
            format!("Could not read '{}', expected e.g. Squat:3x10 or Run:20m", input),
        )
    };

    let Some(prescription) = prescription else {
        return Ok(exercise);
    };

    if let Some((sets, rest)) = prescription.split_once('x') {
        exercise.sets = Some(sets.trim().parse().map_err(|_| bad())?);
        match rest.trim().strip_suffix('m') {
            Some(minutes) => {
                exercise.duration_minutes = Some(minutes.trim().parse().map_err(|_| bad())?)
            }
            None => exercise.reps = Some(rest.trim().parse().map_err(|_| bad())?),
        }
    } else if let Some(minutes) = prescription.strip_suffix('m') {
        exercise.duration_minutes = Some(minutes.trim().parse().map_err(|_| bad())?);
    } else {
        return Err(bad());
    }

    Ok(exercise)
}

/// Inputs collected when setting a goal
#[derive(Debug, Clone)]
pub struct GoalForm {
    pub goal_type: GoalType,
    pub current_weight: f64,
    pub target_weight_change: Option<f64>,
    pub timeframe_months: u32,
}

impl GoalForm {
    /// Validated request plus any non-blocking warning to show the user
    pub fn validate(&self) -> FormResult<(CreateGoalRequest, GoalValidation)> {
        let validation = validate_goal(
            self.goal_type,
            self.current_weight,
            self.target_weight_change,
            self.timeframe_months,
        );

        if let Some(error) = &validation.error {
            return Err(ValidationError::new("target_weight_change", error.clone()));
        }

        let target = if self.goal_type.needs_target() {
            self.target_weight_change
        } else {
            None
        };

        Ok((
            CreateGoalRequest {
                goal_type: self.goal_type,
                current_weight: self.current_weight,
                target_weight_change: target,
                timeframe_months: self.timeframe_months,
            },
            validation,
        ))
    }
}
