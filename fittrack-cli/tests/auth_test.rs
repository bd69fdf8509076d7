use anyhow::Result;
use fittrack_cli::api::{ApiClient, ApiError, LoginRequest, RegisterRequest};
use fittrack_cli::config::Config;
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;

const USER_JSON: &str = r#"{
    "id": "u1",
    "username": "alice",
    "email": "alice@example.com",
    "first_name": "Alice"
}"#;

fn config_for(server: &mockito::ServerGuard, dir: &TempDir) -> Config {
    let mut config = Config::default().with_path(dir.path().join("config.toml"));
    config.api.base_url = server.url();
    config
}

#[tokio::test]
async fn test_login_stores_session() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "alice@example.com",
            "password": "correct-horse"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"token": "tok-123", "user": {}}}"#, USER_JSON))
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server, &dir))?;
    let response = client
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "correct-horse".to_string(),
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(response.user.username, "alice");
    assert!(client.is_authenticated());

    // Persisted to the attached config file
    let saved = Config::load_from(&dir.path().join("config.toml"))?;
    assert_eq!(saved.auth.token, "tok-123");
    assert_eq!(saved.auth.user.map(|u| u.username), Some("alice".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_login_accepts_access_token_field() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"access_token": "legacy", "user": {}}}"#, USER_JSON))
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server, &dir))?;
    let response = client
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await?;

    assert_eq!(response.token, "legacy");
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_surface_server_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Invalid email or password"}"#)
        .create_async()
        .await;

    // A mistyped password must not end the session already on disk
    let mut config = config_for(&server, &dir);
    config.set_session("existing-good-token".to_string(), None);
    config.save()?;
    let client = ApiClient::new(config)?;

    let err = client
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    let api_err = err.downcast_ref::<ApiError>().expect("ApiError");
    assert!(matches!(api_err, ApiError::InvalidCredentials(msg) if msg == "Invalid email or password"));
    assert!(!api_err.is_unauthorized());
    assert!(!err.to_string().contains("Session expired"));

    assert!(client.is_authenticated());
    let saved = Config::load_from(&dir.path().join("config.toml"))?;
    assert_eq!(saved.auth.token, "existing-good-token");
    Ok(())
}

#[tokio::test]
async fn test_failed_registration_keeps_session() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    server
        .mock("POST", "/api/auth/register")
        .with_status(401)
        .with_body(r#"{"error": "Registration closed"}"#)
        .create_async()
        .await;

    let mut config = config_for(&server, &dir);
    config.set_session("existing-good-token".to_string(), None);
    let client = ApiClient::new(config)?;

    let err = client
        .register(&RegisterRequest {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter22".to_string(),
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::InvalidCredentials(_))
    ));
    assert!(client.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_current_user_sends_bearer_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let mock = server
        .mock("GET", "/api/users/me")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER_JSON)
        .create_async()
        .await;

    let mut config = config_for(&server, &dir);
    config.set_session("tok-123".to_string(), None);
    let client = ApiClient::new(config)?;

    let user = client.current_user().await?;
    mock.assert_async().await;

    assert_eq!(user.display_name(), "Alice");
    assert_eq!(client.cached_user(), Some(user));
    Ok(())
}

#[tokio::test]
async fn test_env_token_is_used_but_never_written() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    let mock = server
        .mock("GET", "/api/users/me")
        .match_header("authorization", "Bearer env-secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER_JSON)
        .create_async()
        .await;

    let mut config = config_for(&server, &dir);
    config.override_token("env-secret");
    let client = ApiClient::new(config)?;

    // Caching the user saves the config file
    client.current_user().await?;
    mock.assert_async().await;

    let path = dir.path().join("config.toml");
    let contents = std::fs::read_to_string(&path)?;
    assert!(!contents.contains("env-secret"));

    let saved = Config::load_from(&path)?;
    assert!(saved.auth.token.is_empty());
    assert_eq!(saved.auth.user.map(|u| u.username), Some("alice".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new()?;

    server
        .mock("GET", "/api/goals")
        .with_status(401)
        .with_body(r#"{"detail": "Token expired"}"#)
        .create_async()
        .await;

    let mut config = config_for(&server, &dir);
    config.set_session("stale".to_string(), None);
    config.save()?;
    let client = ApiClient::new(config)?;

    let err = client.list_goals().await.unwrap_err();
    let api_err = err.downcast_ref::<ApiError>().expect("ApiError");
    assert!(matches!(api_err, ApiError::Unauthorized(msg) if msg == "Token expired"));

    assert!(!client.is_authenticated());
    let saved = Config::load_from(&dir.path().join("config.toml"))?;
    assert!(!saved.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_requests_without_token_fail_locally() -> Result<()> {
    let dir = TempDir::new()?;
    let config = Config::default().with_path(dir.path().join("config.toml"));
    let client = ApiClient::new(config)?;

    let err = client.list_plans().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::NotLoggedIn)
    ));
    Ok(())
}

#[tokio::test]
async fn test_logout_forgets_session() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = Config::default().with_path(dir.path().join("config.toml"));
    config.set_session("tok".to_string(), None);
    let client = ApiClient::new(config)?;

    client.logout()?;

    assert!(!client.is_authenticated());
    let saved = Config::load_from(&dir.path().join("config.toml"))?;
    assert!(saved.auth.token.is_empty());
    Ok(())
}

#[test]
fn test_api_error_from_status() {
    use reqwest::StatusCode;

    let error = ApiError::from_status(StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    assert!(matches!(error, ApiError::Unauthorized(_)));

    let error = ApiError::from_status(StatusCode::NOT_FOUND, String::new());
    assert!(matches!(error, ApiError::NotFound(ref m) if m == "Not Found"));

    let error = ApiError::from_status(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"error": "timeframe_months must be positive"}"#.to_string(),
    );
    assert!(matches!(error, ApiError::BadRequest(ref m) if m == "timeframe_months must be positive"));

    let error = ApiError::from_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Server Error".to_string(),
    );
    assert!(matches!(error, ApiError::ServerError(_)));
}
