use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{success, with_spinner};
use crate::api::ApiClient;
use crate::config::Config;
use crate::forms::LoginForm;

#[derive(Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long)]
    email: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        println!("{}", "FitTrack - Login".bold());
        println!();

        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        let form = LoginForm { email, password };
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}", "✗".red(), e.message);
                return Err(e.into());
            }
        };

        let client = ApiClient::new(config)?;

        match with_spinner("Logging in...", client.login(&request)).await {
            Ok(response) => {
                success("Login successful!");
                println!();
                println!("Welcome, {}!", response.user.display_name());
                println!("Email: {}", response.user.email);

                if !response.user.is_profile_complete() {
                    println!();
                    println!("Your profile is incomplete.");
                    println!("Finish it with 'fittrack profile complete'.");
                }

                Ok(())
            }
            Err(e) => {
                println!("{} Login failed: {}", "✗".red(), e);
                Err(e)
            }
        }
    }
}
