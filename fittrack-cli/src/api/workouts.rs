use anyhow::Result;

use super::ApiClient;
use crate::models::{
    CompleteWorkoutRequest, PlanRequest, RescheduleRequest, ScheduleRequest, ScheduledWorkout,
    WorkoutPlan,
};
use crate::planning;

impl ApiClient {
    // Workout plans

    pub async fn list_plans(&self) -> Result<Vec<WorkoutPlan>> {
        self.get_json("/workout-plans").await
    }

    pub async fn get_plan(&self, id: &str) -> Result<WorkoutPlan> {
        self.get_json(&format!("/workout-plans/{}", id)).await
    }

    pub async fn create_plan(&self, request: &PlanRequest) -> Result<WorkoutPlan> {
        let plan: WorkoutPlan = self.post_json("/workout-plans", request).await?;
        tracing::info!("Created workout plan {}", plan.id);
        Ok(plan)
    }

    pub async fn update_plan(&self, id: &str, request: &PlanRequest) -> Result<WorkoutPlan> {
        self.put_json(&format!("/workout-plans/{}", id), request).await
    }

    pub async fn delete_plan(&self, id: &str) -> Result<()> {
        self.delete(&format!("/workout-plans/{}", id)).await?;
        tracing::info!("Deleted workout plan {}", id);
        Ok(())
    }

    // Scheduled workouts

    pub async fn list_scheduled(&self) -> Result<Vec<ScheduledWorkout>> {
        self.get_json("/workouts/scheduled").await
    }

    pub async fn schedule_workout(&self, request: &ScheduleRequest) -> Result<ScheduledWorkout> {
        let scheduled: ScheduledWorkout = self.post_json("/workouts/schedule", request).await?;
        tracing::info!(
            "Scheduled plan {} on {} at {}",
            request.workout_plan_id,
            request.scheduled_date,
            request.scheduled_time
        );
        Ok(scheduled)
    }

    pub async fn reschedule_workout(
        &self,
        id: &str,
        request: &RescheduleRequest,
    ) -> Result<ScheduledWorkout> {
        self.put_json(&format!("/workouts/{}/reschedule", id), request)
            .await
    }

    pub async fn start_workout(&self, id: &str) -> Result<ScheduledWorkout> {
        self.post_json(&format!("/workouts/{}/start", id), &serde_json::json!({}))
            .await
    }

    pub async fn complete_workout(
        &self,
        id: &str,
        request: &CompleteWorkoutRequest,
    ) -> Result<ScheduledWorkout> {
        self.post_json(&format!("/workouts/{}/complete", id), request)
            .await
    }

    pub async fn cancel_workout(&self, id: &str) -> Result<ScheduledWorkout> {
        self.post_json(&format!("/workouts/{}/cancel", id), &serde_json::json!({}))
            .await
    }

    /// Existing non-cancelled workout at exactly this date and time, if any.
    ///
    /// Advisory only: the backend remains the authority on conflicts.
    pub async fn check_schedule_conflict(
        &self,
        date: &str,
        time: &str,
    ) -> Result<Option<ScheduledWorkout>> {
        self.conflict_at(date, time, None).await
    }

    /// Conflict check for moving workout `id`, which is ignored in the scan
    pub async fn check_reschedule_conflict(
        &self,
        id: &str,
        date: &str,
        time: &str,
    ) -> Result<Option<ScheduledWorkout>> {
        self.conflict_at(date, time, Some(id)).await
    }

    async fn conflict_at(
        &self,
        date: &str,
        time: &str,
        moving: Option<&str>,
    ) -> Result<Option<ScheduledWorkout>> {
        let existing = self.list_scheduled().await?;
        let conflict = planning::find_conflict_except(&existing, date, time, moving).cloned();
        if let Some(c) = &conflict {
            tracing::debug!("Schedule conflict with {} at {} {}", c.id, date, time);
        }
        Ok(conflict)
    }
}
