use anyhow::Result;
use fittrack_cli::api::ApiClient;
use fittrack_cli::config::Config;
use fittrack_cli::models::{ScheduleRequest, WorkoutStatus};
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;

const SCHEDULE_JSON: &str = r#"[
    {"id": "w1", "workout_plan_id": "p1", "plan_name": "Leg day",
     "scheduled_date": "2026-11-02", "scheduled_time": "18:00", "status": "planned"},
    {"id": "w2", "workout_plan_id": "p2",
     "scheduled_date": "2026-11-03", "scheduled_time": "07:30", "status": "cancelled"}
]"#;

fn authed_client(server: &mockito::ServerGuard, dir: &TempDir) -> Result<ApiClient> {
    let mut config = Config::default().with_path(dir.path().join("config.toml"));
    config.api.base_url = server.url();
    config.set_session("tok".to_string(), None);
    ApiClient::new(config)
}

async fn mock_schedule(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/workouts/scheduled")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCHEDULE_JSON)
        .create_async()
        .await
}

#[tokio::test]
async fn test_conflict_found_for_same_slot() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;
    let mock = mock_schedule(&mut server).await;

    let client = authed_client(&server, &dir)?;
    let conflict = client.check_schedule_conflict("2026-11-02", "18:00").await?;

    mock.assert_async().await;
    let conflict = conflict.expect("slot is taken");
    assert_eq!(conflict.id, "w1");
    assert_eq!(conflict.title(), "Leg day");
    Ok(())
}

#[tokio::test]
async fn test_cancelled_and_other_slots_do_not_conflict() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;
    mock_schedule(&mut server).await;

    let client = authed_client(&server, &dir)?;

    // w2 sits here but is cancelled
    assert!(client
        .check_schedule_conflict("2026-11-03", "07:30")
        .await?
        .is_none());
    assert!(client
        .check_schedule_conflict("2026-11-02", "18:30")
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_reschedule_ignores_the_workout_being_moved() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;
    mock_schedule(&mut server).await;

    let client = authed_client(&server, &dir)?;

    // w1 keeping its own slot
    assert!(client
        .check_reschedule_conflict("w1", "2026-11-02", "18:00")
        .await?
        .is_none());

    // another workout moving onto w1's slot
    let conflict = client
        .check_reschedule_conflict("w9", "2026-11-02", "18:00")
        .await?
        .expect("slot is taken");
    assert_eq!(conflict.id, "w1");
    Ok(())
}

#[tokio::test]
async fn test_schedule_workout_posts_normalized_slot() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let mock = server
        .mock("POST", "/api/workouts/schedule")
        .match_body(Matcher::Json(json!({
            "workout_plan_id": "p1",
            "scheduled_date": "2026-11-05",
            "scheduled_time": "09:05"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "w9", "workout_plan_id": "p1", "scheduled_date": "2026-11-05",
                "scheduled_time": "09:05", "status": "planned"}"#,
        )
        .create_async()
        .await;

    let request = ScheduleRequest {
        workout_plan_id: "p1".to_string(),
        scheduled_date: fittrack_cli::models::normalize_date("2026-11-05")?,
        scheduled_time: fittrack_cli::models::normalize_time("9:05")?,
        notes: None,
    };

    let client = authed_client(&server, &dir)?;
    let workout = client.schedule_workout(&request).await?;

    mock.assert_async().await;
    assert_eq!(workout.status, WorkoutStatus::Planned);
    assert_eq!(workout.title(), "p1");
    Ok(())
}

#[tokio::test]
async fn test_status_transitions_hit_their_endpoints() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let body = |status: &str| {
        format!(
            r#"{{"id": "w1", "workout_plan_id": "p1", "scheduled_date": "2026-11-02",
                "scheduled_time": "18:00", "status": "{}"}}"#,
            status
        )
    };

    let start = server
        .mock("POST", "/api/workouts/w1/start")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body("in_progress"))
        .create_async()
        .await;
    let complete = server
        .mock("POST", "/api/workouts/w1/complete")
        .match_body(Matcher::Json(json!({ "actual_duration_minutes": 45, "rating": 4 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body("completed"))
        .create_async()
        .await;

    let client = authed_client(&server, &dir)?;

    let started = client.start_workout("w1").await?;
    assert_eq!(started.status, WorkoutStatus::InProgress);

    let done = client
        .complete_workout(
            "w1",
            &fittrack_cli::models::CompleteWorkoutRequest {
                actual_duration_minutes: Some(45),
                rating: Some(4),
                notes: None,
            },
        )
        .await?;
    assert_eq!(done.status, WorkoutStatus::Completed);

    start.assert_async().await;
    complete.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_calendar_request_carries_year_and_month() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let mock = server
        .mock("GET", "/api/dashboard/calendar")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("year".into(), "2026".into()),
            Matcher::UrlEncoded("month".into(), "11".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"year": 2026, "month": 11, "days": [
                {"date": "2026-11-02", "workouts": [
                    {"id": "w1", "workout_plan_id": "p1", "scheduled_date": "2026-11-02",
                     "scheduled_time": "18:00", "status": "planned"}]}]}"#,
        )
        .create_async()
        .await;

    let client = authed_client(&server, &dir)?;
    let calendar = client.dashboard_calendar(2026, 11).await?;

    mock.assert_async().await;
    assert_eq!(calendar.workout_count(), 1);
    Ok(())
}
