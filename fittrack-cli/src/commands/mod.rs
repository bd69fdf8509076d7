mod config_cmd;
mod dashboard;
mod goals;
mod login;
mod logout;
mod plans;
mod profile;
mod recommend;
mod register;
mod schedule;
mod stats;
mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, CONFIG_ENV};

pub use dashboard::DashboardCommand;
pub use goals::{GoalArgs, GoalUpdateArgs};
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use plans::PlanArgs;
pub use recommend::RecommendCommand;
pub use register::RegisterCommand;
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Terminal client for planning workouts and fitness goals", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login to FitTrack
    Login(LoginCommand),

    /// Create a FitTrack account
    Register(RegisterCommand),

    /// Logout from FitTrack
    Logout(LogoutCommand),

    /// Show current user information
    Whoami(WhoamiCommand),

    /// View or complete your profile
    #[command(subcommand)]
    Profile(ProfileSubcommands),

    /// Manage fitness goals
    #[command(subcommand)]
    Goals(GoalsSubcommands),

    /// Manage workout plans
    #[command(subcommand)]
    Plans(PlansSubcommands),

    /// Schedule and track workouts
    #[command(subcommand)]
    Schedule(ScheduleSubcommands),

    /// Show training statistics
    #[command(subcommand)]
    Stats(StatsSubcommands),

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Generate workout recommendations
    Recommend(RecommendCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProfileSubcommands {
    /// Show your profile
    Show,

    /// Complete or edit your profile
    Complete {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,

        /// Height in centimetres
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Fitness level (beginner, intermediate, advanced)
        #[arg(long)]
        level: Option<String>,
    },
}

#[derive(Subcommand)]
enum GoalsSubcommands {
    /// List goals
    List {
        /// Include inactive goals
        #[arg(short, long)]
        all: bool,
    },

    /// Create a new goal
    Create(GoalArgs),

    /// Preview a goal's safety check and calorie plan without saving it
    Plan(GoalArgs),

    /// Update a goal
    Update {
        /// Goal ID
        id: String,

        #[command(flatten)]
        args: GoalUpdateArgs,
    },

    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PlansSubcommands {
    /// List workout plans
    List,

    /// Show plan details
    Show {
        /// Plan ID
        id: String,
    },

    /// Create a workout plan
    Create(PlanArgs),

    /// Replace a workout plan
    Update {
        /// Plan ID
        id: String,

        #[command(flatten)]
        args: PlanArgs,
    },

    /// Delete a workout plan
    Delete {
        /// Plan ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ScheduleSubcommands {
    /// List scheduled workouts
    List {
        /// Include cancelled workouts
        #[arg(short, long)]
        all: bool,

        /// Only show workouts on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
    },

    /// Schedule a workout plan
    Add {
        /// Workout plan ID
        plan_id: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Notes for this session
        #[arg(long)]
        notes: Option<String>,

        /// Schedule even if the slot is already taken
        #[arg(short, long)]
        force: bool,
    },

    /// Move a scheduled workout
    Reschedule {
        /// Scheduled workout ID
        id: String,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Move even if the slot is already taken
        #[arg(short, long)]
        force: bool,
    },

    /// Start a scheduled workout
    Start {
        /// Scheduled workout ID
        id: String,
    },

    /// Mark a workout as completed
    Complete {
        /// Scheduled workout ID
        id: String,

        /// Actual duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// How it felt, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Cancel a scheduled workout
    Cancel {
        /// Scheduled workout ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum StatsSubcommands {
    /// Headline numbers and upcoming workouts
    Summary,

    /// Workouts for a month
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Activity trend
    Trends {
        /// Period: week, month or year
        #[arg(long, value_parser = ["week", "month", "year"])]
        period: Option<String>,
    },

    /// Unlocked and pending achievements
    Achievements,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub async fn execute(self) -> Result<()> {
        if let Commands::Completions { shell } = self.command {
            generate_completions(shell);
            return Ok(());
        }

        let config = self.load_config()?;

        match self.command {
            Commands::Login(cmd) => cmd.execute(config).await,
            Commands::Register(cmd) => cmd.execute(config).await,
            Commands::Logout(cmd) => cmd.execute(config).await,
            Commands::Whoami(cmd) => cmd.execute(config).await,
            Commands::Profile(subcmd) => match subcmd {
                ProfileSubcommands::Show => profile::show_profile(config).await,
                ProfileSubcommands::Complete {
                    dob,
                    height,
                    weight,
                    level,
                } => profile::complete_profile(config, dob, height, weight, level).await,
            },
            Commands::Goals(subcmd) => match subcmd {
                GoalsSubcommands::List { all } => goals::list_goals(config, all).await,
                GoalsSubcommands::Create(args) => goals::create_goal(config, args).await,
                GoalsSubcommands::Plan(args) => goals::plan_goal(args),
                GoalsSubcommands::Update { id, args } => {
                    goals::update_goal(config, &id, args).await
                }
                GoalsSubcommands::Delete { id, force } => {
                    goals::delete_goal(config, &id, force).await
                }
            },
            Commands::Plans(subcmd) => match subcmd {
                PlansSubcommands::List => plans::list_plans(config).await,
                PlansSubcommands::Show { id } => plans::show_plan(config, &id).await,
                PlansSubcommands::Create(args) => plans::create_plan(config, args).await,
                PlansSubcommands::Update { id, args } => {
                    plans::update_plan(config, &id, args).await
                }
                PlansSubcommands::Delete { id, force } => {
                    plans::delete_plan(config, &id, force).await
                }
            },
            Commands::Schedule(subcmd) => match subcmd {
                ScheduleSubcommands::List { all, from } => {
                    schedule::list_scheduled(config, all, from).await
                }
                ScheduleSubcommands::Add {
                    plan_id,
                    date,
                    time,
                    notes,
                    force,
                } => schedule::add(config, plan_id, date, time, notes, force).await,
                ScheduleSubcommands::Reschedule {
                    id,
                    date,
                    time,
                    force,
                } => schedule::reschedule(config, &id, date, time, force).await,
                ScheduleSubcommands::Start { id } => schedule::start(config, &id).await,
                ScheduleSubcommands::Complete {
                    id,
                    duration,
                    rating,
                    notes,
                } => schedule::complete(config, &id, duration, rating, notes).await,
                ScheduleSubcommands::Cancel { id, force } => {
                    schedule::cancel(config, &id, force).await
                }
            },
            Commands::Stats(subcmd) => match subcmd {
                StatsSubcommands::Summary => stats::summary(config).await,
                StatsSubcommands::Calendar { year, month } => {
                    stats::calendar(config, year, month).await
                }
                StatsSubcommands::Trends { period } => stats::trends(config, period).await,
                StatsSubcommands::Achievements => stats::achievements(config).await,
            },
            Commands::Dashboard(cmd) => cmd.execute(config).await,
            Commands::Recommend(cmd) => cmd.execute(config).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config),
                ConfigSubcommands::Edit => config_cmd::edit_config(config),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config, force),
            },
            Commands::Completions { .. } => Ok(()),
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Client for commands that need a signed-in user.
///
/// Prints a hint and fails with `ApiError::NotLoggedIn` when there is no token.
fn authenticated_client(config: Config) -> Result<ApiClient> {
    if !config.is_authenticated() {
        println!("You are not logged in.");
        println!();
        println!("Use 'fittrack login' to authenticate.");
        return Err(ApiError::NotLoggedIn.into());
    }
    ApiClient::new(config)
}

/// Run one request with a spinner standing in for the busy control
async fn with_spinner<T, F>(message: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    pb.finish_and_clear();
    result
}

/// Print a failed action inline, with a login hint after a 401
fn report_failure(action: &str, err: &anyhow::Error) {
    println!("{} {}: {}", "✗".red(), action, err);
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        if api_err.is_unauthorized() {
            println!();
            println!("Your session has ended. Use 'fittrack login' to authenticate again.");
        }
    }
}

fn success(message: impl std::fmt::Display) {
    println!("{} {}", "✓".green(), message);
}

fn warning(message: impl std::fmt::Display) {
    println!("{} {}", "⚠".yellow(), message);
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
