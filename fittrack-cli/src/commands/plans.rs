use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use super::{authenticated_client, confirm, report_failure, success, with_spinner};
use crate::config::Config;
use crate::forms::{parse_exercise, PlanForm};
use crate::models::{PlanRequest, WorkoutPlan};

#[derive(Args)]
pub struct PlanArgs {
    /// Plan name
    #[arg(short, long)]
    name: Option<String>,

    /// Short description
    #[arg(short, long)]
    description: Option<String>,

    /// Exercise as NAME:SETSxREPS, NAME:SETSxMINm, NAME:MINm or NAME (repeatable)
    #[arg(short, long = "exercise")]
    exercises: Vec<String>,

    /// Expected duration in minutes
    #[arg(long)]
    duration: Option<u32>,

    /// Difficulty label
    #[arg(long)]
    difficulty: Option<String>,
}

/// Build and validate a plan request, prompting for what is missing
fn collect_plan(args: PlanArgs) -> Result<PlanRequest> {
    let name = match args.name {
        Some(name) => name,
        None => Input::new().with_prompt("Plan name").interact_text()?,
    };

    let mut exercises = Vec::new();
    for raw in &args.exercises {
        exercises.push(parse_exercise(raw)?);
    }

    if exercises.is_empty() {
        println!("Add exercises, e.g. 'Squat:3x10' or 'Run:20m'. Leave blank to finish.");
        loop {
            let raw: String = Input::new()
                .with_prompt("Exercise")
                .allow_empty(true)
                .interact_text()?;
            if raw.trim().is_empty() {
                break;
            }
            match parse_exercise(&raw) {
                Ok(exercise) => exercises.push(exercise),
                Err(e) => println!("{} {}", "✗".red(), e.message),
            }
        }
    }

    let form = PlanForm {
        name,
        description: args.description,
        exercises,
        duration_minutes: args.duration,
        difficulty: args.difficulty,
    };

    match form.validate() {
        Ok(request) => Ok(request),
        Err(e) => {
            println!("{} {}", "✗".red(), e.message);
            Err(e.into())
        }
    }
}

pub(super) fn print_plan(plan: &WorkoutPlan) {
    println!("{}  {}", plan.id.cyan(), plan.name.bold());
    if let Some(desc) = &plan.description {
        println!("    {}", desc);
    }

    let mut meta = Vec::new();
    if let Some(d) = plan.duration_minutes {
        meta.push(format!("{} min", d));
    }
    if let Some(level) = &plan.difficulty {
        meta.push(level.clone());
    }
    meta.push(format!("{} exercises", plan.exercises.len()));
    println!("    {}", meta.join(" · ").dimmed());
}

pub async fn list_plans(config: Config) -> Result<()> {
    let client = authenticated_client(config)?;

    let plans = match with_spinner("Fetching plans...", client.list_plans()).await {
        Ok(plans) => plans,
        Err(e) => {
            report_failure("Failed to fetch plans", &e);
            return Err(e);
        }
    };

    println!("{}", "Workout plans".bold());
    println!();

    if plans.is_empty() {
        println!("No plans yet. Create one with 'fittrack plans create'.");
        return Ok(());
    }

    for plan in &plans {
        print_plan(plan);
        println!();
    }

    Ok(())
}

pub async fn show_plan(config: Config, id: &str) -> Result<()> {
    let client = authenticated_client(config)?;

    let plan = match with_spinner("Fetching plan...", client.get_plan(id)).await {
        Ok(plan) => plan,
        Err(e) => {
            report_failure("Failed to fetch plan", &e);
            return Err(e);
        }
    };

    print_plan(&plan);
    println!();

    if plan.exercises.is_empty() {
        println!("    (no exercises)");
    }
    for (i, exercise) in plan.exercises.iter().enumerate() {
        print!("  {:>2}. {:<24} {}", i + 1, exercise.name, exercise.prescription());
        if let Some(rest) = exercise.rest_seconds {
            print!("  rest {}s", rest);
        }
        println!();
        if let Some(notes) = &exercise.notes {
            println!("      {}", notes.dimmed());
        }
    }

    Ok(())
}

pub async fn create_plan(config: Config, args: PlanArgs) -> Result<()> {
    let client = authenticated_client(config)?;
    let request = collect_plan(args)?;

    match with_spinner("Saving plan...", client.create_plan(&request)).await {
        Ok(plan) => {
            success("Plan created");
            println!();
            print_plan(&plan);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to create plan", &e);
            Err(e)
        }
    }
}

pub async fn update_plan(config: Config, id: &str, args: PlanArgs) -> Result<()> {
    let client = authenticated_client(config)?;
    let request = collect_plan(args)?;

    match with_spinner("Saving plan...", client.update_plan(id, &request)).await {
        Ok(plan) => {
            success("Plan updated");
            println!();
            print_plan(&plan);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to update plan", &e);
            Err(e)
        }
    }
}

pub async fn delete_plan(config: Config, id: &str, force: bool) -> Result<()> {
    let client = authenticated_client(config)?;

    if !force && !confirm(&format!("Delete plan {}?", id), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    match with_spinner("Deleting plan...", client.delete_plan(id)).await {
        Ok(()) => {
            success(format!("Plan {} deleted", id));
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to delete plan", &e);
            Err(e)
        }
    }
}
