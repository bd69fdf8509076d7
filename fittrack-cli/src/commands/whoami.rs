use anyhow::Result;
use clap::Args;

use super::{report_failure, with_spinner};
use crate::api::ApiClient;
use crate::config::Config;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        if !config.is_authenticated() {
            println!("You are not logged in.");
            println!();
            println!("Use 'fittrack login' to authenticate.");
            return Ok(());
        }

        let client = ApiClient::new(config)?;

        match with_spinner("Fetching user information...", client.current_user()).await {
            Ok(user) => {
                println!("✓ Authenticated as:");
                println!();
                println!("  Username: {}", user.username);
                println!("  Name:     {}", user.display_name());
                println!("  Email:    {}", user.email);
                println!("  User ID:  {}", user.id);
                if !user.is_profile_complete() {
                    println!();
                    println!("Profile incomplete. Run 'fittrack profile complete'.");
                }

                Ok(())
            }
            Err(e) => {
                report_failure("Failed to fetch user information", &e);
                Err(e)
            }
        }
    }
}
