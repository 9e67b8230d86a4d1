//! Wire contracts for the dashboard backend.
//!
//! Pure data, no behavior: every struct mirrors a documented response
//! shape and is replaced wholesale on each fetch. Field names follow the
//! backend's JSON exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// The backend's Go runtime emits `null` for empty slices and maps;
/// decode that as the container's default instead of failing.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Replays ───────────────────────────────────────────────────────

/// One recorded participant of a replay. Lives and dies with its parent
/// replay; `player_id` is only meaningful within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub replay_id: i64,
    pub player_id: i64,
    pub player_slot: i32,
    pub name: String,
    pub race: String,
    /// "Win", "Loss", or "Undecided".
    pub result: String,
    pub apm: f64,
    pub spending_quotient: f64,
    pub is_human: bool,
}

/// A recorded game session available for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub id: i64,
    pub hash: String,
    pub filename: String,
    pub map: String,
    /// Game length in seconds.
    pub duration: i64,
    pub game_version: String,
    pub played_at: DateTime<Utc>,
    pub uploaded_at: DateTime<Utc>,
    /// Participants in slot order.
    #[serde(default, deserialize_with = "null_default")]
    pub players: Vec<Player>,
}

/// One page of the replay list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayPage {
    #[serde(default, deserialize_with = "null_default")]
    pub replays: Vec<Replay>,
    pub total: u64,
}

/// Transient result of an upload; consumed once to decide whether the
/// replay needs player disambiguation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub replay_id: i64,
    pub replay: Replay,
    pub message: String,
    /// Absent on the duplicate-upload path, which counts as false.
    #[serde(default)]
    pub needs_player_selection: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub message: String,
    pub player_name: String,
}

// ─── Per-player analysis ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyPoint {
    pub time: f64,
    pub supply_used: i32,
    pub supply_max: i32,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyBlock {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// "low", "medium", or "high".
    pub severity: String,
    pub supply_used: i32,
    pub supply_max: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyAnalysis {
    pub total_block_time: f64,
    pub block_percentage: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub blocks: Vec<SupplyBlock>,
    #[serde(default, deserialize_with = "null_default")]
    pub supply_timeline: Vec<SupplyPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceValue {
    pub minerals: f64,
    pub gas: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePoint {
    pub time: f64,
    pub minerals: i32,
    pub gas: i32,
    pub income: ResourceValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub spending_quotient: f64,
    /// "poor", "average", "good", or "excellent".
    pub rating: String,
    pub average_unspent: ResourceValue,
    pub average_income: ResourceValue,
    #[serde(default, deserialize_with = "null_default")]
    pub resource_timeline: Vec<ResourcePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApmPoint {
    pub time: f64,
    pub apm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApmAnalysis {
    pub average_apm: f64,
    pub peak_apm: f64,
    pub eapm: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub apm_timeline: Vec<ApmPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOrderItem {
    pub time: f64,
    pub supply: i32,
    pub action: String,
    pub unit_or_building: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectPoint {
    pub time: f64,
    pub hatchery_id: i32,
    pub injected: bool,
}

/// Zerg-only larva inject tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectAnalysis {
    pub efficiency: f64,
    pub total_injects: i32,
    pub missed_injects: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub inject_timeline: Vec<InjectPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmyPoint {
    pub time: f64,
    pub value: i32,
    pub unit_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCount {
    pub unit_type: String,
    pub count: i32,
    pub value: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmyAnalysis {
    pub peak_army_value: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub army_timeline: Vec<ArmyPoint>,
    #[serde(default, deserialize_with = "null_default")]
    pub unit_composition: Vec<UnitCount>,
}

/// One piece of coaching feedback derived from the metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// "high", "medium", or "low".
    pub priority: String,
    /// "macro", "micro", or "strategy".
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub target_value: Option<String>,
}

/// Everything the backend computed for a single player. Sections are
/// optional; which ones exist depends on race and replay contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    #[serde(default)]
    pub supply_analysis: Option<SupplyAnalysis>,
    #[serde(default)]
    pub spending_analysis: Option<SpendingAnalysis>,
    #[serde(default)]
    pub apm_analysis: Option<ApmAnalysis>,
    #[serde(default, deserialize_with = "null_default")]
    pub build_order: Vec<BuildOrderItem>,
    #[serde(default)]
    pub inject_analysis: Option<InjectAnalysis>,
    #[serde(default)]
    pub army_analysis: Option<ArmyAnalysis>,
    #[serde(default, deserialize_with = "null_default")]
    pub suggestions: Vec<Suggestion>,
}

/// Per-player metrics for a replay, keyed by `player_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayAnalysis {
    pub replay: Replay,
    #[serde(default, deserialize_with = "null_default")]
    pub analyses: HashMap<i64, AnalysisData>,
}

// ─── Strategic analysis ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: String,
    pub player_value: f64,
    pub enemy_value: f64,
    pub is_worse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyBlockSummary {
    pub time: f64,
    pub duration: f64,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalMoment {
    pub time: f64,
    pub player_loss: i32,
    pub enemy_loss: i32,
    pub assessment: String,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedProblem {
    pub title: String,
    pub description: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupTips {
    #[serde(default, deserialize_with = "null_default")]
    pub opening: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub mid_game: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub timing: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub late_game: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementStep {
    pub category: String,
    pub title: String,
    pub description: String,
}

/// Comparative winner/loser breakdown of a whole match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicAnalysis {
    pub winner: String,
    pub loser: String,
    pub winner_race: String,
    pub loser_race: String,
    /// E.g. "ZvT".
    pub matchup: String,
    #[serde(default, deserialize_with = "null_default")]
    pub metrics_comparison: Vec<MetricComparison>,
    #[serde(default, deserialize_with = "null_default")]
    pub supply_blocks: Vec<SupplyBlockSummary>,
    #[serde(default, deserialize_with = "null_default")]
    pub critical_moments: Vec<CriticalMoment>,
    #[serde(default, deserialize_with = "null_default")]
    pub problems: Vec<IdentifiedProblem>,
    #[serde(default)]
    pub matchup_tips: Option<MatchupTips>,
    #[serde(default, deserialize_with = "null_default")]
    pub improvement_steps: Vec<ImprovementStep>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicAnalysisResponse {
    pub replay: Replay,
    pub analysis: StrategicAnalysis,
}

// ─── Session ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub sc2_player_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ─── Mentoring ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    /// "daily" or "weekly".
    pub goal_type: String,
    /// "apm", "supply_block", "games_played", "win_rate", or "sq".
    pub metric_name: String,
    pub target_value: f64,
    /// ">=", "<=", ">", "<", or "=".
    pub comparison: String,
    pub current_value: f64,
    /// "active", "completed", or "failed".
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

/// Predefined goal suggestion with beginner/advanced target values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTemplate {
    pub name: String,
    pub goal_type: String,
    pub metric_name: String,
    pub comparison: String,
    pub beginner: f64,
    pub advanced: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProgress {
    pub id: i64,
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub avg_apm: f64,
    pub avg_spending_quotient: f64,
    pub avg_supply_block_pct: f64,
    /// Seconds.
    pub total_play_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekStats {
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub win_rate: f64,
    pub avg_apm: f64,
    pub avg_sq: f64,
    pub avg_supply_block: f64,
    pub total_play_time: i64,
    pub apm_change: f64,
    pub sq_change: f64,
    pub win_rate_change: f64,
    pub supply_block_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentGame {
    pub replay_id: i64,
    pub map: String,
    pub result: String,
    pub race: String,
    pub enemy_race: String,
    pub apm: f64,
    pub sq: f64,
    pub duration: i64,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingFocus {
    pub id: i64,
    pub user_id: i64,
    /// "macro", "micro", "economy", "army_control", or "scouting".
    pub focus_area: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub id: i64,
    pub user_id: i64,
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub total_games: i32,
    pub wins: i32,
    pub losses: i32,
    pub win_rate: f64,
    pub avg_apm: f64,
    pub avg_sq: f64,
    pub avg_supply_block: f64,
    pub main_race: String,
    pub total_play_time: i64,
    #[serde(default)]
    pub improvements: Option<HashMap<String, String>>,
    #[serde(default)]
    pub regressions: Option<HashMap<String, String>>,
    pub focus_suggestion: String,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
    pub generated_at: DateTime<Utc>,
}

/// Aggregate payload backing the mentor dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorDashboard {
    pub user: User,
    #[serde(default)]
    pub today_stats: Option<DailyProgress>,
    #[serde(default)]
    pub week_stats: Option<WeekStats>,
    #[serde(default, deserialize_with = "null_default")]
    pub active_goals: Vec<Goal>,
    #[serde(default, deserialize_with = "null_default")]
    pub recent_games: Vec<RecentGame>,
    #[serde(default)]
    pub current_focus: Option<CoachingFocus>,
    #[serde(default)]
    pub weekly_report: Option<WeeklyReport>,
    /// Daily progress for the last 14 days.
    #[serde(default, deserialize_with = "null_default")]
    pub progress_trend: Vec<DailyProgress>,
}

/// Combined goals + templates listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub goals: Vec<Goal>,
    #[serde(default, deserialize_with = "null_default")]
    pub templates: Vec<GoalTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub progress: Vec<DailyProgress>,
    pub days: u32,
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
