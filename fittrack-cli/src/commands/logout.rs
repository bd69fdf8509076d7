use anyhow::Result;
use clap::Args;

use super::success;
use crate::api::ApiClient;
use crate::config::Config;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        if !config.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        // Sessions are bearer tokens; forgetting the token is the whole logout
        let client = ApiClient::new(config)?;
        client.logout()?;

        success("Logged out successfully!");

        Ok(())
    }
}
