use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::{authenticated_client, plans::print_plan, report_failure, success, with_spinner};
use crate::config::Config;
use crate::models::{Recommendation, RecommendationRequest};

#[derive(Args)]
pub struct RecommendCommand {
    /// Goal to tailor the suggestions to
    #[arg(short, long)]
    goal: Option<String>,

    /// Minutes available per session
    #[arg(short, long)]
    minutes: Option<u32>,

    /// Focus area, e.g. strength, cardio, mobility
    #[arg(short, long)]
    focus: Option<String>,

    /// Save suggestion N (as listed) as a workout plan
    #[arg(short, long, value_name = "N")]
    save: Option<usize>,
}

fn print_recommendation(idx: usize, rec: &Recommendation) {
    let duration = rec
        .duration_minutes
        .map(|d| format!(" ({} min)", d))
        .unwrap_or_default();
    println!("{}. {}{}", idx, rec.name.bold(), duration.dimmed());
    if let Some(desc) = &rec.description {
        println!("   {}", desc);
    }
    for exercise in &rec.exercises {
        println!("   - {:<24} {}", exercise.name, exercise.prescription());
    }
    if let Some(reason) = &rec.reason {
        println!("   {}", format!("Why: {}", reason).dimmed());
    }
}

impl RecommendCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let client = authenticated_client(config)?;

        let request = RecommendationRequest {
            goal_id: self.goal,
            available_minutes: self.minutes,
            focus: self.focus,
        };

        let recommendations = match with_spinner(
            "Generating recommendations...",
            client.generate_recommendations(&request),
        )
        .await
        {
            Ok(recs) => recs,
            Err(e) => {
                report_failure("Failed to generate recommendations", &e);
                return Err(e);
            }
        };

        if recommendations.is_empty() {
            println!("No recommendations right now. Try setting a goal first.");
            return Ok(());
        }

        println!("{}", "Recommended workouts".bold());
        println!();
        for (i, rec) in recommendations.iter().enumerate() {
            print_recommendation(i + 1, rec);
            println!();
        }

        let Some(n) = self.save else {
            println!("Save one with 'fittrack recommend --save <N>'.");
            return Ok(());
        };

        let Some(chosen) = n.checked_sub(1).and_then(|i| recommendations.get(i)) else {
            bail!(
                "No recommendation {}; choose between 1 and {}",
                n,
                recommendations.len()
            );
        };

        let plan_request = chosen.to_plan_request();
        match with_spinner("Saving plan...", client.create_plan(&plan_request)).await {
            Ok(plan) => {
                success("Saved as a workout plan");
                print_plan(&plan);
                Ok(())
            }
            Err(e) => {
                report_failure("Failed to save plan", &e);
                Err(e)
            }
        }
    }
}
