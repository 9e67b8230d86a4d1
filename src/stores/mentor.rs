//! Mentor store: goals, progress history, and coaching reports.
//!
//! Same error-handling shape as the replay store but no multi-step
//! workflow: reads backing a primary view (`fetch_dashboard`,
//! `fetch_goals`, `fetch_progress`, `fetch_weekly_report`) swallow
//! failures into `error`; mutations (`create_goal`, `delete_goal`,
//! `set_coaching_focus`) record `error` and re-raise. Goal templates
//! are optional decoration and fail fully silently.

use std::sync::Arc;

use log::{debug, warn};

use crate::api::MentorApi;
use crate::types::models::{
    CoachingFocus, DailyProgress, Goal, GoalTemplate, MentorDashboard, WeeklyReport,
};
use crate::types::ApiResult;

pub struct MentorStore {
    api: Arc<dyn MentorApi>,
    pub dashboard: Option<MentorDashboard>,
    pub goals: Vec<Goal>,
    pub goal_templates: Vec<GoalTemplate>,
    pub progress_history: Vec<DailyProgress>,
    pub weekly_report: Option<WeeklyReport>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MentorStore {
    pub fn new(api: Arc<dyn MentorApi>) -> Self {
        Self {
            api,
            dashboard: None,
            goals: Vec::new(),
            goal_templates: Vec::new(),
            progress_history: Vec::new(),
            weekly_report: None,
            loading: false,
            error: None,
        }
    }

    /// Load the aggregate dashboard. Success also syncs `goals` from the
    /// dashboard's active goals so both views agree.
    pub async fn fetch_dashboard(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.get_dashboard().await {
            Ok(dashboard) => {
                self.goals = dashboard.active_goals.clone();
                self.dashboard = Some(dashboard);
            }
            Err(err) => {
                warn!("Dashboard fetch failed: {err}");
                self.error = Some(err.user_message("Failed to load dashboard"));
            }
        }
        self.loading = false;
    }

    /// Load goals and templates from the combined listing.
    pub async fn fetch_goals(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.get_goals().await {
            Ok(response) => {
                self.goals = response.goals;
                self.goal_templates = response.templates;
            }
            Err(err) => {
                warn!("Goals fetch failed: {err}");
                self.error = Some(err.user_message("Failed to load goals"));
            }
        }
        self.loading = false;
    }

    /// Create a goal and append it locally on success.
    pub async fn create_goal(
        &mut self,
        goal_type: &str,
        metric_name: &str,
        target_value: f64,
        comparison: Option<&str>,
    ) -> ApiResult<Goal> {
        self.loading = true;
        self.error = None;
        let result = self
            .api
            .create_goal(goal_type, metric_name, target_value, comparison)
            .await;
        self.loading = false;
        match result {
            Ok(goal) => {
                self.goals.push(goal.clone());
                Ok(goal)
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to create goal"));
                Err(err)
            }
        }
    }

    /// Delete a goal remotely, then drop it from the local list. The
    /// list is untouched if the remote delete fails.
    pub async fn delete_goal(&mut self, goal_id: i64) -> ApiResult<()> {
        match self.api.delete_goal(goal_id).await {
            Ok(()) => {
                self.goals.retain(|g| g.id != goal_id);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to delete goal"));
                Err(err)
            }
        }
    }

    pub async fn fetch_progress(&mut self, days: u32) {
        self.loading = true;
        self.error = None;
        match self.api.get_progress(days).await {
            Ok(response) => self.progress_history = response.progress,
            Err(err) => {
                warn!("Progress fetch failed: {err}");
                self.error = Some(err.user_message("Failed to load progress"));
            }
        }
        self.loading = false;
    }

    /// Load the weekly report; `generate` asks the backend to build one
    /// if none exists yet.
    pub async fn fetch_weekly_report(&mut self, generate: bool) {
        self.loading = true;
        self.error = None;
        match self.api.get_weekly_report(generate).await {
            Ok(report) => self.weekly_report = Some(report),
            Err(err) => {
                warn!("Weekly report fetch failed: {err}");
                self.error = Some(err.user_message("Failed to load weekly report"));
            }
        }
        self.loading = false;
    }

    /// Set the coaching focus. Success updates the loaded dashboard's
    /// focus in place so the view refreshes without a re-fetch.
    pub async fn set_coaching_focus(
        &mut self,
        focus_area: &str,
        description: &str,
    ) -> ApiResult<CoachingFocus> {
        self.loading = true;
        self.error = None;
        let result = self.api.set_coaching_focus(focus_area, description).await;
        self.loading = false;
        match result {
            Ok(focus) => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.current_focus = Some(focus.clone());
                }
                Ok(focus)
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to set focus"));
                Err(err)
            }
        }
    }

    /// Refresh the template list. Templates are optional suggestions, so
    /// a failure changes nothing, not even `error`.
    pub async fn fetch_goal_templates(&mut self) {
        match self.api.get_goal_templates().await {
            Ok(templates) => self.goal_templates = templates,
            Err(err) => debug!("Goal template fetch failed, keeping current set: {err}"),
        }
    }

    /// Drop all loaded mentor state, e.g. on logout.
    pub fn reset(&mut self) {
        self.dashboard = None;
        self.goals.clear();
        self.goal_templates.clear();
        self.progress_history.clear();
        self.weekly_report = None;
        self.error = None;
    }
}

#[cfg(test)]
#[path = "tests/mentor_tests.rs"]
mod tests;
