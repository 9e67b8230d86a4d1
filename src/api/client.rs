//! HTTP transport gateway.
//!
//! One configured `reqwest::Client` against a fixed API base. The bearer
//! credential lives in a single slot on the client and is attached to
//! every request while set; stores never touch headers themselves.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::gateway::{AuthApi, MentorApi, ReplayApi};
use crate::types::models::{
    AuthResponse, ClaimResponse, CoachingFocus, Goal, GoalTemplate, GoalsResponse,
    MentorDashboard, ProgressResponse, Replay, ReplayAnalysis, ReplayPage,
    StrategicAnalysisResponse, UploadResponse, User, WeeklyReport,
};
use crate::types::{ApiError, ApiResult};

/// Per-call timeout; a timeout surfaces as [`ApiError::Network`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the dashboard backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client for the given API base, e.g.
    /// `http://localhost:8080/api/v1`.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        let token = self.token.read().unwrap_or_else(|p| p.into_inner());
        if let Some(token) = token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Decode a success body, or normalize the failure.
    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    /// For endpoints whose success body carries nothing we use.
    async fn expect_ok(response: Response) -> ApiResult<()> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ReplayApi for ApiClient {
    async fn list_replays(&self, limit: u32, offset: u32) -> ApiResult<ReplayPage> {
        let response = self
            .request(Method::GET, "/replays")
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_replay(&self, id: i64) -> ApiResult<Replay> {
        let response = self
            .request(Method::GET, &format!("/replays/{id}"))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_analysis(&self, id: i64) -> ApiResult<ReplayAnalysis> {
        let response = self
            .request(Method::GET, &format!("/replays/{id}/analysis"))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_strategic_analysis(&self, id: i64) -> ApiResult<StrategicAnalysisResponse> {
        let response = self
            .request(Method::GET, &format!("/replays/{id}/strategic"))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn upload_replay(&self, filename: &str, data: Vec<u8>) -> ApiResult<UploadResponse> {
        debug!("Uploading replay '{}' ({} bytes)", filename, data.len());
        let part = Part::bytes(data).file_name(filename.to_string());
        let form = Form::new().part("replay", part);
        let response = self
            .request(Method::POST, "/replays/upload")
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn claim_replay(&self, replay_id: i64, player_id: i64) -> ApiResult<ClaimResponse> {
        let response = self
            .request(Method::POST, &format!("/replays/{replay_id}/claim"))
            .json(&json!({ "player_id": player_id }))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete_replay(&self, id: i64) -> ApiResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/replays/{id}"))
            .send()
            .await?;
        Self::expect_ok(response).await
    }
}

#[async_trait]
impl MentorApi for ApiClient {
    async fn get_dashboard(&self) -> ApiResult<MentorDashboard> {
        let response = self.request(Method::GET, "/mentor/dashboard").send().await?;
        Self::parse(response).await
    }

    async fn get_goals(&self) -> ApiResult<GoalsResponse> {
        let response = self.request(Method::GET, "/mentor/goals").send().await?;
        Self::parse(response).await
    }

    async fn create_goal(
        &self,
        goal_type: &str,
        metric_name: &str,
        target_value: f64,
        comparison: Option<&str>,
    ) -> ApiResult<Goal> {
        let mut body = json!({
            "goal_type": goal_type,
            "metric_name": metric_name,
            "target_value": target_value,
        });
        if let Some(comparison) = comparison {
            body["comparison"] = json!(comparison);
        }
        let response = self
            .request(Method::POST, "/mentor/goals")
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete_goal(&self, goal_id: i64) -> ApiResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/mentor/goals/{goal_id}"))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn get_progress(&self, days: u32) -> ApiResult<ProgressResponse> {
        let response = self
            .request(Method::GET, "/mentor/progress")
            .query(&[("days", days)])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_weekly_report(&self, generate: bool) -> ApiResult<WeeklyReport> {
        let response = self
            .request(Method::GET, "/mentor/weekly-report")
            .query(&[("generate", generate)])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn set_coaching_focus(
        &self,
        focus_area: &str,
        description: &str,
    ) -> ApiResult<CoachingFocus> {
        let response = self
            .request(Method::POST, "/mentor/focus")
            .json(&json!({ "focus_area": focus_area, "description": description }))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_goal_templates(&self) -> ApiResult<Vec<GoalTemplate>> {
        let response = self
            .request(Method::GET, "/mentor/goal-templates")
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn register(
        &self,
        email: &str,
        password: &str,
        player_name: &str,
    ) -> ApiResult<AuthResponse> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&json!({
                "email": email,
                "password": password,
                "sc2_player_name": player_name,
            }))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn logout(&self) -> ApiResult<()> {
        let response = self.request(Method::POST, "/auth/logout").send().await?;
        Self::expect_ok(response).await
    }

    async fn me(&self) -> ApiResult<User> {
        let response = self.request(Method::GET, "/auth/me").send().await?;
        Self::parse(response).await
    }

    fn set_auth_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = token;
    }
}
