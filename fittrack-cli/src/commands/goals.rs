use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Select};

use super::{authenticated_client, confirm, report_failure, success, warning, with_spinner};
use crate::config::Config;
use crate::forms::GoalForm;
use crate::models::{Goal, GoalType, UpdateGoalRequest};
use crate::planning::{plan_calories, validate_goal, CaloriePlan};

#[derive(Args)]
pub struct GoalArgs {
    /// Goal type: lose_weight, gain_muscle or maintain_health
    #[arg(short = 't', long = "type")]
    goal_type: Option<GoalType>,

    /// Current weight in kg
    #[arg(short, long)]
    current_weight: Option<f64>,

    /// Weight change in kg (ignored for maintain_health)
    #[arg(long)]
    target: Option<f64>,

    /// Timeframe in months
    #[arg(short, long)]
    months: Option<u32>,

    /// Accept warnings without asking
    #[arg(short, long)]
    yes: bool,
}

#[derive(Args)]
pub struct GoalUpdateArgs {
    /// New current weight in kg
    #[arg(short, long)]
    current_weight: Option<f64>,

    /// New weight change in kg
    #[arg(long)]
    target: Option<f64>,

    /// New timeframe in months
    #[arg(short, long)]
    months: Option<u32>,

    /// Mark the goal active
    #[arg(long, conflicts_with = "deactivate")]
    activate: bool,

    /// Mark the goal inactive
    #[arg(long)]
    deactivate: bool,

    /// Accept warnings without asking
    #[arg(short, long)]
    yes: bool,
}

impl GoalUpdateArgs {
    fn to_request(&self) -> UpdateGoalRequest {
        let is_active = match (self.activate, self.deactivate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        UpdateGoalRequest {
            current_weight: self.current_weight,
            target_weight_change: self.target,
            timeframe_months: self.months,
            is_active,
        }
    }
}

/// Fill in anything missing from the command line interactively
fn collect_form(args: &GoalArgs) -> Result<GoalForm> {
    let goal_type = match args.goal_type {
        Some(t) => t,
        None => {
            let options = [
                GoalType::LoseWeight,
                GoalType::GainMuscle,
                GoalType::MaintainHealth,
            ];
            let labels: Vec<String> = options.iter().map(|t| t.to_string()).collect();
            let idx = Select::new()
                .with_prompt("Goal")
                .items(&labels)
                .default(0)
                .interact()?;
            options[idx]
        }
    };

    let current_weight = match args.current_weight {
        Some(w) => w,
        None => Input::<f64>::new()
            .with_prompt("Current weight (kg)")
            .interact_text()?,
    };

    let target_weight_change = if goal_type.needs_target() {
        match args.target {
            Some(t) => Some(t),
            None => Some(
                Input::<f64>::new()
                    .with_prompt("Weight change (kg)")
                    .interact_text()?,
            ),
        }
    } else {
        None
    };

    let timeframe_months = match args.months {
        Some(m) => m,
        None => Input::<u32>::new()
            .with_prompt("Timeframe (months)")
            .default(3)
            .interact_text()?,
    };

    Ok(GoalForm {
        goal_type,
        current_weight,
        target_weight_change,
        timeframe_months,
    })
}

fn print_plan(plan: &CaloriePlan) {
    println!("{}", "Calorie plan".bold());
    println!(
        "  Duration:        {:.1} weeks ({} days)",
        plan.total_weeks, plan.total_days
    );
    println!("  Target weight:   {:.1} kg", plan.target_weight);
    if plan.goal_type.needs_target() {
        println!(
            "  Total {}:   {:.0} kcal",
            plan.adjustment_kind(),
            plan.total_calories
        );
        println!(
            "  Daily {}:   {:.0} kcal/day",
            plan.adjustment_kind(),
            plan.daily_adjustment
        );
    } else {
        println!("  Keep intake at maintenance calories.");
    }
}

fn print_goal(goal: &Goal) {
    let state = if goal.is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    };
    println!("{}  {}  [{}]", goal.id.cyan(), goal.summary(), state);
    println!("    Current weight: {:.1} kg", goal.current_weight);
    if let Some(target) = goal.target_weight {
        println!("    Target weight:  {:.1} kg", target);
    }
    if let Some(adj) = goal.daily_calorie_adjustment {
        println!(
            "    Daily {}:  {:.0} kcal",
            goal.goal_type.adjustment_kind(),
            adj
        );
    }
}

/// Warn about an ambitious goal and ask to go ahead.
///
/// Returns false when the user backs out.
fn accept_warning(warning_text: Option<&str>, assume_yes: bool) -> Result<bool> {
    let Some(text) = warning_text else {
        return Ok(true);
    };
    warning(text);
    if assume_yes {
        return Ok(true);
    }
    confirm("Save this goal anyway?", false)
}

pub async fn list_goals(config: Config, show_all: bool) -> Result<()> {
    let client = authenticated_client(config)?;

    let goals = match with_spinner("Fetching goals...", client.list_goals()).await {
        Ok(goals) => goals,
        Err(e) => {
            report_failure("Failed to fetch goals", &e);
            return Err(e);
        }
    };

    let shown: Vec<&Goal> = goals.iter().filter(|g| show_all || g.is_active).collect();

    println!("{}", "Goals".bold());
    println!();

    if shown.is_empty() {
        println!("No goals yet. Create one with 'fittrack goals create'.");
        return Ok(());
    }

    for goal in shown {
        print_goal(goal);
        println!();
    }

    Ok(())
}

pub async fn create_goal(config: Config, args: GoalArgs) -> Result<()> {
    let client = authenticated_client(config)?;

    let form = collect_form(&args)?;
    let (request, validation) = match form.validate() {
        Ok(ok) => ok,
        Err(e) => {
            println!("{} {}", "✗".red(), e.message);
            return Err(e.into());
        }
    };

    if !accept_warning(validation.warning.as_deref(), args.yes)? {
        println!("Goal not saved.");
        return Ok(());
    }

    if let Ok(plan) = plan_calories(
        request.goal_type,
        request.current_weight,
        request.target_weight_change.unwrap_or(0.0),
        request.timeframe_months,
    ) {
        println!();
        print_plan(&plan);
        println!();
    }

    match with_spinner("Saving goal...", client.create_goal(&request)).await {
        Ok(goal) => {
            success("Goal created");
            println!();
            print_goal(&goal);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to create goal", &e);
            Err(e)
        }
    }
}

/// Offline safety check and calorie plan; nothing is sent to the server
pub fn plan_goal(args: GoalArgs) -> Result<()> {
    let form = collect_form(&args)?;
    let (request, validation) = match form.validate() {
        Ok(ok) => ok,
        Err(e) => {
            println!("{} {}", "✗".red(), e.message);
            return Err(e.into());
        }
    };

    match validation.warning.as_deref() {
        Some(text) => warning(text),
        None => success("Goal is within safe limits"),
    }
    println!();

    let plan = plan_calories(
        request.goal_type,
        request.current_weight,
        request.target_weight_change.unwrap_or(0.0),
        request.timeframe_months,
    )?;
    print_plan(&plan);

    Ok(())
}

pub async fn update_goal(config: Config, id: &str, args: GoalUpdateArgs) -> Result<()> {
    let client = authenticated_client(config)?;

    let update = args.to_request();
    if update.is_empty() {
        bail!(
            "Nothing to update. Pass --current-weight, --target, --months, \
             --activate or --deactivate"
        );
    }

    let existing = match with_spinner("Fetching goal...", client.find_goal(id)).await {
        Ok(Some(goal)) => goal,
        Ok(None) => {
            println!("{} Goal {} not found", "✗".red(), id);
            bail!("Goal {} not found", id);
        }
        Err(e) => {
            report_failure("Failed to fetch goal", &e);
            return Err(e);
        }
    };

    // Re-check the numbers the goal would end up with
    let merged = existing.merged(&update);
    let validation = validate_goal(
        merged.goal_type,
        merged.current_weight,
        merged.target_weight_change,
        merged.timeframe_months,
    );
    if let Some(error) = &validation.error {
        println!("{} {}", "✗".red(), error);
        bail!("{}", error);
    }
    if !accept_warning(validation.warning.as_deref(), args.yes)? {
        println!("Goal not updated.");
        return Ok(());
    }

    match with_spinner("Saving goal...", client.update_goal(id, &update)).await {
        Ok(goal) => {
            success("Goal updated");
            println!();
            print_goal(&goal);
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to update goal", &e);
            Err(e)
        }
    }
}

pub async fn delete_goal(config: Config, id: &str, force: bool) -> Result<()> {
    let client = authenticated_client(config)?;

    if !force && !confirm(&format!("Delete goal {}?", id), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    match with_spinner("Deleting goal...", client.delete_goal(id)).await {
        Ok(()) => {
            success(format!("Goal {} deleted", id));
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to delete goal", &e);
            Err(e)
        }
    }
}
