use anyhow::Result;

use super::ApiClient;
use crate::models::{CreateGoalRequest, Goal, UpdateGoalRequest};

impl ApiClient {
    pub async fn list_goals(&self) -> Result<Vec<Goal>> {
        self.get_json("/goals").await
    }

    /// Create a goal; the backend fills in the calorie and target-weight fields
    pub async fn create_goal(&self, request: &CreateGoalRequest) -> Result<Goal> {
        let goal: Goal = self.post_json("/goals", request).await?;
        tracing::info!("Created goal {}", goal.id);
        Ok(goal)
    }

    pub async fn update_goal(&self, id: &str, request: &UpdateGoalRequest) -> Result<Goal> {
        let goal: Goal = self.put_json(&format!("/goals/{}", id), request).await?;
        tracing::info!("Updated goal {}", goal.id);
        Ok(goal)
    }

    pub async fn delete_goal(&self, id: &str) -> Result<()> {
        self.delete(&format!("/goals/{}", id)).await?;
        tracing::info!("Deleted goal {}", id);
        Ok(())
    }

    /// Look up a single goal in the user's list
    pub async fn find_goal(&self, id: &str) -> Result<Option<Goal>> {
        let goals = self.list_goals().await?;
        Ok(goals.into_iter().find(|g| g.id == id))
    }
}
