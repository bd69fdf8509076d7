use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::io::IsTerminal;

use super::{authenticated_client, report_failure, stats::print_summary, with_spinner};
use crate::config::Config;
use crate::ui::{Dashboard, DashboardData};

#[derive(Args)]
pub struct DashboardCommand {
    /// Print the summary instead of opening the interactive view
    #[arg(long)]
    plain: bool,

    /// Trend period: week, month or year
    #[arg(long, value_parser = ["week", "month", "year"])]
    period: Option<String>,
}

impl DashboardCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let period = self
            .period
            .unwrap_or_else(|| config.ui.default_trend_period.clone());
        let client = authenticated_client(config)?;

        let today = Local::now().date_naive();
        let fetch = DashboardData::fetch(&client, today, &period);
        let data = match with_spinner("Loading dashboard...", fetch).await {
            Ok(data) => data,
            Err(e) => {
                report_failure("Failed to load dashboard", &e);
                return Err(e);
            }
        };

        if self.plain || !std::io::stdout().is_terminal() {
            print_summary(&data.summary);
            return Ok(());
        }

        let mut dashboard = Dashboard::new(&client, data, period)?;
        let result = dashboard.run().await;
        dashboard.cleanup()?;

        if !client.is_authenticated() {
            println!("Your session has ended. Use 'fittrack login' to authenticate again.");
        }

        result
    }
}
