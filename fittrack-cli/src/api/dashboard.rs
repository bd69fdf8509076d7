use anyhow::Result;

use super::ApiClient;
use crate::models::{
    Achievement, CalendarMonth, DashboardSummary, Recommendation, RecommendationRequest, Trends,
};

impl ApiClient {
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.get_json("/dashboard/summary").await
    }

    pub async fn dashboard_calendar(&self, year: i32, month: u32) -> Result<CalendarMonth> {
        let query = [("year", year.to_string()), ("month", month.to_string())];
        self.get_json_query("/dashboard/calendar", &query).await
    }

    /// Trend series for `period` ("week", "month" or "year")
    pub async fn dashboard_trends(&self, period: &str) -> Result<Trends> {
        self.get_json_query("/dashboard/trends", &[("period", period)]).await
    }

    pub async fn achievements(&self) -> Result<Vec<Achievement>> {
        self.get_json("/dashboard/achievements").await
    }

    pub async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>> {
        let recommendations: Vec<Recommendation> = self
            .post_json("/recommendations/generate", request)
            .await?;
        tracing::info!("Received {} recommendations", recommendations.len());
        Ok(recommendations)
    }
}
