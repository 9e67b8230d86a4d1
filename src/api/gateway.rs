//! Gateway traits between the stores and the HTTP transport.
//!
//! Stores hold `Arc<dyn …>` handles so a test double can stand in for
//! the real [`super::ApiClient`]. All methods return the normalized
//! [`ApiError`](crate::types::ApiError); raw transport failures never
//! cross this seam.

use async_trait::async_trait;

use crate::types::models::{
    AuthResponse, ClaimResponse, CoachingFocus, Goal, GoalTemplate, GoalsResponse,
    MentorDashboard, ProgressResponse, Replay, ReplayAnalysis, ReplayPage,
    StrategicAnalysisResponse, UploadResponse, User, WeeklyReport,
};
use crate::types::ApiResult;

/// Replay ingestion, claiming, and analysis retrieval.
#[async_trait]
pub trait ReplayApi: Send + Sync {
    async fn list_replays(&self, limit: u32, offset: u32) -> ApiResult<ReplayPage>;

    async fn get_replay(&self, id: i64) -> ApiResult<Replay>;

    /// Per-player metrics for one replay.
    async fn get_analysis(&self, id: i64) -> ApiResult<ReplayAnalysis>;

    /// Comparative winner/loser breakdown; not every replay has one.
    async fn get_strategic_analysis(&self, id: i64) -> ApiResult<StrategicAnalysisResponse>;

    /// Multipart upload of a raw replay file under the `replay` field.
    async fn upload_replay(&self, filename: &str, data: Vec<u8>) -> ApiResult<UploadResponse>;

    /// Associate the authenticated user with one recorded participant.
    async fn claim_replay(&self, replay_id: i64, player_id: i64) -> ApiResult<ClaimResponse>;

    async fn delete_replay(&self, id: i64) -> ApiResult<()>;
}

/// Goals, progress history, and coaching reports.
#[async_trait]
pub trait MentorApi: Send + Sync {
    async fn get_dashboard(&self) -> ApiResult<MentorDashboard>;

    async fn get_goals(&self) -> ApiResult<GoalsResponse>;

    async fn create_goal(
        &self,
        goal_type: &str,
        metric_name: &str,
        target_value: f64,
        comparison: Option<&str>,
    ) -> ApiResult<Goal>;

    async fn delete_goal(&self, goal_id: i64) -> ApiResult<()>;

    async fn get_progress(&self, days: u32) -> ApiResult<ProgressResponse>;

    /// `generate` asks the backend to build the report if none exists yet.
    async fn get_weekly_report(&self, generate: bool) -> ApiResult<WeeklyReport>;

    async fn set_coaching_focus(
        &self,
        focus_area: &str,
        description: &str,
    ) -> ApiResult<CoachingFocus>;

    async fn get_goal_templates(&self) -> ApiResult<Vec<GoalTemplate>>;
}

/// Session endpoints plus the gateway's single bearer-token slot.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, email: &str, password: &str, player_name: &str)
        -> ApiResult<AuthResponse>;

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse>;

    async fn logout(&self) -> ApiResult<()>;

    /// Identity of the current session's user.
    async fn me(&self) -> ApiResult<User>;

    /// Attach or clear the credential carried by every subsequent
    /// request. One global slot, not per-request.
    fn set_auth_token(&self, token: Option<String>);
}
