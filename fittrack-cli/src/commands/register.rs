use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{success, with_spinner};
use crate::api::ApiClient;
use crate::config::Config;
use crate::forms::{RegistrationForm, MIN_PASSWORD_LEN};

#[derive(Args)]
pub struct RegisterCommand {
    /// Username (3-50 characters)
    #[arg(short, long)]
    username: Option<String>,

    /// Account email
    #[arg(short, long)]
    email: Option<String>,

    /// First name
    #[arg(long)]
    first_name: Option<String>,

    /// Last name
    #[arg(long)]
    last_name: Option<String>,

    /// Password (prompted for with confirmation when omitted)
    #[arg(long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        println!("{}", "FitTrack - Create account".bold());
        println!();

        let username = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };
        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let (password, confirm_password) = match self.password {
            Some(password) => (password.clone(), password),
            None => {
                let password = Password::new()
                    .with_prompt(format!("Password (min {} characters)", MIN_PASSWORD_LEN))
                    .interact()?;
                let confirm = Password::new().with_prompt("Confirm password").interact()?;
                (password, confirm)
            }
        };

        let form = RegistrationForm {
            username,
            email,
            password,
            confirm_password,
            first_name: self.first_name,
            last_name: self.last_name,
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}", "✗".red(), e.message);
                return Err(e.into());
            }
        };

        let client = ApiClient::new(config)?;

        match with_spinner("Creating account...", client.register(&request)).await {
            Ok(response) => {
                success(format!("Account created for {}", response.user.username));
                println!();
                println!("You are now logged in.");
                println!("Next, complete your profile with 'fittrack profile complete'.");
                Ok(())
            }
            Err(e) => {
                println!("{} Registration failed: {}", "✗".red(), e);
                Err(e)
            }
        }
    }
}
