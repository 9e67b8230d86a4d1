use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{AuthApi, MentorApi, ReplayApi};
use crate::types::models::{
    AuthResponse, ClaimResponse, CoachingFocus, Goal, GoalTemplate, GoalsResponse,
    MentorDashboard, ProgressResponse, Replay, ReplayAnalysis, ReplayPage,
    StrategicAnalysisResponse, UploadResponse, User, WeeklyReport,
};
use crate::types::{ApiError, ApiResult};

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Scripted gateway double. Responses are queued per operation name as
/// raw JSON and decoded through the real wire contracts, so store tests
/// exercise the same serde path as the HTTP client. A call with nothing
/// scripted panics, which keeps test scripts honest.
pub struct MockApi {
    responses: Mutex<HashMap<&'static str, VecDeque<ApiResult<Value>>>>,
    calls: Mutex<Vec<String>>,
    token: Mutex<Option<String>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        init_test_logging();
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            token: Mutex::new(None),
        })
    }

    /// Queue a success body for the named operation.
    pub fn push_ok(&self, op: &'static str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(Ok(body));
    }

    /// Queue a failure for the named operation.
    pub fn push_err(&self, op: &'static str, error: ApiError) {
        self.responses
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(Err(error));
    }

    /// Operations invoked so far, in order, with their arguments.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Current content of the bearer slot.
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn take<T: DeserializeOwned>(&self, op: &'static str, call: String) -> ApiResult<T> {
        self.calls.lock().unwrap().push(call);
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(op)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted response for `{op}`"));
        scripted.map(|body| {
            serde_json::from_value(body)
                .unwrap_or_else(|e| panic!("scripted `{op}` body failed to decode: {e}"))
        })
    }
}

#[async_trait]
impl ReplayApi for MockApi {
    async fn list_replays(&self, limit: u32, offset: u32) -> ApiResult<ReplayPage> {
        self.take("list_replays", format!("list_replays({limit},{offset})"))
    }

    async fn get_replay(&self, id: i64) -> ApiResult<Replay> {
        self.take("get_replay", format!("get_replay({id})"))
    }

    async fn get_analysis(&self, id: i64) -> ApiResult<ReplayAnalysis> {
        self.take("get_analysis", format!("get_analysis({id})"))
    }

    async fn get_strategic_analysis(&self, id: i64) -> ApiResult<StrategicAnalysisResponse> {
        self.take(
            "get_strategic_analysis",
            format!("get_strategic_analysis({id})"),
        )
    }

    async fn upload_replay(&self, filename: &str, data: Vec<u8>) -> ApiResult<UploadResponse> {
        self.take(
            "upload_replay",
            format!("upload_replay({filename},{} bytes)", data.len()),
        )
    }

    async fn claim_replay(&self, replay_id: i64, player_id: i64) -> ApiResult<ClaimResponse> {
        self.take("claim_replay", format!("claim_replay({replay_id},{player_id})"))
    }

    async fn delete_replay(&self, id: i64) -> ApiResult<()> {
        self.take("delete_replay", format!("delete_replay({id})"))
    }
}

#[async_trait]
impl MentorApi for MockApi {
    async fn get_dashboard(&self) -> ApiResult<MentorDashboard> {
        self.take("get_dashboard", "get_dashboard()".to_string())
    }

    async fn get_goals(&self) -> ApiResult<GoalsResponse> {
        self.take("get_goals", "get_goals()".to_string())
    }

    async fn create_goal(
        &self,
        goal_type: &str,
        metric_name: &str,
        target_value: f64,
        comparison: Option<&str>,
    ) -> ApiResult<Goal> {
        self.take(
            "create_goal",
            format!("create_goal({goal_type},{metric_name},{target_value},{comparison:?})"),
        )
    }

    async fn delete_goal(&self, goal_id: i64) -> ApiResult<()> {
        self.take("delete_goal", format!("delete_goal({goal_id})"))
    }

    async fn get_progress(&self, days: u32) -> ApiResult<ProgressResponse> {
        self.take("get_progress", format!("get_progress({days})"))
    }

    async fn get_weekly_report(&self, generate: bool) -> ApiResult<WeeklyReport> {
        self.take("get_weekly_report", format!("get_weekly_report({generate})"))
    }

    async fn set_coaching_focus(
        &self,
        focus_area: &str,
        description: &str,
    ) -> ApiResult<CoachingFocus> {
        self.take(
            "set_coaching_focus",
            format!("set_coaching_focus({focus_area},{description})"),
        )
    }

    async fn get_goal_templates(&self) -> ApiResult<Vec<GoalTemplate>> {
        self.take("get_goal_templates", "get_goal_templates()".to_string())
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn register(
        &self,
        email: &str,
        password: &str,
        player_name: &str,
    ) -> ApiResult<AuthResponse> {
        let _ = password;
        self.take("register", format!("register({email},{player_name})"))
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let _ = password;
        self.take("login", format!("login({email})"))
    }

    async fn logout(&self) -> ApiResult<()> {
        self.take("logout", "logout()".to_string())
    }

    async fn me(&self) -> ApiResult<User> {
        self.take("me", "me()".to_string())
    }

    fn set_auth_token(&self, token: Option<String>) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("set_auth_token({})", token.is_some()));
        *self.token.lock().unwrap() = token;
    }
}
