use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::config::Config;
use crate::models::{ProfileUpdate, User};

mod dashboard;
mod error;
mod goals;
mod workouts;

pub use error::ApiError;

/// Login request payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Login and registration response from API
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}

/// API client for communicating with the FitTrack backend.
///
/// Every call is a single request; nothing is retried. A 401 from an
/// authenticated endpoint clears the stored session; a 401 from login or
/// registration only reports the rejected credentials.
pub struct ApiClient {
    client: Client,
    base_url: String,
    config: Mutex<Config>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds);
        let base_url = config.api.base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            config: Mutex::new(config),
        })
    }

    fn config(&self) -> MutexGuard<'_, Config> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current configuration, including session changes
    pub fn config_snapshot(&self) -> Config {
        self.config().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.config().is_authenticated()
    }

    /// User cached at the last login or profile fetch
    pub fn cached_user(&self) -> Option<User> {
        self.config().auth.user.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn token(&self) -> Result<String, ApiError> {
        let config = self.config();
        if !config.is_authenticated() {
            return Err(ApiError::NotLoggedIn);
        }
        Ok(config.token().to_string())
    }

    /// Build an authenticated request
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token()?;
        Ok(self.client.request(method, self.url(path)).bearer_auth(token))
    }

    /// Send a request and decode a JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            let body = response
                .json::<T>()
                .await
                .context("Failed to parse response from server")?;
            return Ok(body);
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.failure(status, body).into())
    }

    /// Send a request whose response body is ignored
    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.failure(status, body).into())
    }

    /// Send a login or registration request. Failures never touch the
    /// stored session.
    async fn send_credentials(&self, request: RequestBuilder) -> Result<AuthResponse> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            let auth = response
                .json::<AuthResponse>()
                .await
                .context("Failed to parse response from server")?;
            return Ok(auth);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_credentials_status(status, body);
        tracing::debug!("Authentication failed with {}: {}", status, error);
        Err(error.into())
    }

    fn failure(&self, status: StatusCode, body: String) -> ApiError {
        let error = ApiError::from_status(status, body);
        tracing::debug!("Request failed with {}: {}", status, error);

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.logout() {
                tracing::warn!("Failed to clear session after 401: {:#}", e);
            }
        }
        error
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authed(Method::GET, path)?;
        self.send(request).await
    }

    async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let request = self.authed(Method::GET, path)?.query(query);
        self.send(request).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authed(Method::POST, path)?.json(body);
        self.send(request).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authed(Method::PUT, path)?.json(body);
        self.send(request).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let request = self.authed(Method::DELETE, path)?;
        self.send_empty(request).await
    }

    fn store_session(&self, auth: &AuthResponse) -> Result<()> {
        let mut config = self.config();
        config.set_session(auth.token.clone(), Some(auth.user.clone()));
        config.save()
    }

    /// Login and persist the returned token
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        tracing::debug!("Logging in as {}", request.email);

        let http = self.client.post(self.url("/auth/login")).json(request);
        let auth = self.send_credentials(http).await?;

        self.store_session(&auth)?;
        tracing::info!("Logged in as {}", auth.user.username);
        Ok(auth)
    }

    /// Create an account; the backend signs the new user in
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        tracing::debug!("Registering {}", request.username);

        let http = self.client.post(self.url("/auth/register")).json(request);
        let auth = self.send_credentials(http).await?;

        self.store_session(&auth)?;
        tracing::info!("Registered {}", auth.user.username);
        Ok(auth)
    }

    /// Forget the local session
    pub fn logout(&self) -> Result<()> {
        let mut config = self.config();
        if !config.is_authenticated() && config.auth.user.is_none() {
            return Ok(());
        }
        config.clear_session();
        config.save()?;
        tracing::info!("Cleared local session");
        Ok(())
    }

    /// Fetch the signed-in user and refresh the cache
    pub async fn current_user(&self) -> Result<User> {
        let user: User = self.get_json("/users/me").await?;
        self.remember_user(&user)?;
        Ok(user)
    }

    /// Complete or edit the profile
    pub async fn update_profile(&self, profile: &ProfileUpdate) -> Result<User> {
        let user: User = self.put_json("/users/profile", profile).await?;
        self.remember_user(&user)?;
        tracing::info!("Updated profile for {}", user.username);
        Ok(user)
    }

    fn remember_user(&self, user: &User) -> Result<()> {
        let mut config = self.config();
        if config.auth.user.as_ref() != Some(user) {
            config.cache_user(user.clone());
            config.save()?;
        }
        Ok(())
    }
}
