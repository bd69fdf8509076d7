use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use dialoguer::{Input, Select};

use super::{authenticated_client, report_failure, success, with_spinner};
use crate::config::Config;
use crate::forms::ProfileForm;
use crate::models::User;

const LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

fn print_profile(user: &User) {
    let today = Local::now().date_naive();
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("{}", user.display_name().bold());
    println!("────────────────────────────────");
    println!("  Username:      {}", user.username);
    println!("  Email:         {}", user.email);
    println!(
        "  Date of birth: {}",
        or_dash(user.date_of_birth.map(|d| d.to_string()))
    );
    println!(
        "  Age:           {}",
        or_dash(user.age_on(today).map(|a| a.to_string()))
    );
    println!(
        "  Height:        {}",
        or_dash(user.height_cm.map(|h| format!("{:.0} cm", h)))
    );
    println!(
        "  Weight:        {}",
        or_dash(user.weight_kg.map(|w| format!("{:.1} kg", w)))
    );
    println!(
        "  Fitness level: {}",
        or_dash(user.fitness_level.map(|l| l.to_string()))
    );
}

pub async fn show_profile(config: Config) -> Result<()> {
    let client = authenticated_client(config)?;

    match with_spinner("Fetching profile...", client.current_user()).await {
        Ok(user) => {
            print_profile(&user);
            if !user.is_profile_complete() {
                println!();
                println!("Run 'fittrack profile complete' to fill in the missing fields.");
            }
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to fetch profile", &e);
            Err(e)
        }
    }
}

pub async fn complete_profile(
    config: Config,
    dob: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
    level: Option<String>,
) -> Result<()> {
    let client = authenticated_client(config)?;

    // Prefill prompts from whatever the last server response told us
    let cached = client.cached_user();

    let date_of_birth = match dob {
        Some(dob) => dob,
        None => {
            let mut input = Input::<String>::new().with_prompt("Date of birth (YYYY-MM-DD)");
            if let Some(d) = cached.as_ref().and_then(|u| u.date_of_birth) {
                input = input.default(d.to_string());
            }
            input.interact_text()?
        }
    };
    let height_cm = match height {
        Some(h) => h,
        None => {
            let mut input = Input::<f64>::new().with_prompt("Height (cm)");
            if let Some(h) = cached.as_ref().and_then(|u| u.height_cm) {
                input = input.default(h);
            }
            input.interact_text()?
        }
    };
    let weight_kg = match weight {
        Some(w) => w,
        None => {
            let mut input = Input::<f64>::new().with_prompt("Weight (kg)");
            if let Some(w) = cached.as_ref().and_then(|u| u.weight_kg) {
                input = input.default(w);
            }
            input.interact_text()?
        }
    };
    let fitness_level = match level {
        Some(level) => level,
        None => {
            let idx = Select::new()
                .with_prompt("Fitness level")
                .items(&LEVELS)
                .default(0)
                .interact()?;
            LEVELS[idx].to_string()
        }
    };

    let form = ProfileForm {
        date_of_birth,
        height_cm,
        weight_kg,
        fitness_level,
    };
    let update = match form.validate(Local::now().date_naive()) {
        Ok(update) => update,
        Err(e) => {
            println!("{} {}", "✗".red(), e.message);
            return Err(e.into());
        }
    };

    match with_spinner("Saving profile...", client.update_profile(&update)).await {
        Ok(user) => {
            success("Profile saved");
            println!();
            print_profile(&user);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to save profile", &e);
            Err(e)
        }
    }
}
