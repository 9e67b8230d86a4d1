//! Replay workflow store: upload → (optional) claim → analysis.
//!
//! Owns the list of known replays, the currently loaded analyses, and
//! the single outstanding pending-claim slot. An upload whose result
//! asks for player disambiguation parks the returned replay in
//! `pending_claim`; a successful claim or an explicit dismissal frees
//! the slot. A second qualifying upload overwrites it.
//!
//! Reads that back a primary view (`fetch_replays`, `fetch_analysis`)
//! swallow failures into `error`; mutations (`upload`, `claim`,
//! `remove`) record `error` and re-raise so the caller can offer a
//! retry. `fetch_strategic_analysis` is best-effort and never touches
//! `error`.

use std::sync::Arc;

use log::{debug, warn};

use crate::api::ReplayApi;
use crate::types::models::{
    ClaimResponse, Replay, ReplayAnalysis, StrategicAnalysisResponse, UploadResponse,
};
use crate::types::ApiResult;

/// Paging used for the refresh after a successful upload.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

pub struct ReplayStore {
    api: Arc<dyn ReplayApi>,
    /// Current page of known replays, newest first (server order).
    pub replays: Vec<Replay>,
    /// Server-side total matching the last successful list fetch.
    pub total: u64,
    pub current_analysis: Option<ReplayAnalysis>,
    pub strategic_analysis: Option<StrategicAnalysisResponse>,
    /// Replay awaiting player disambiguation, at most one at a time.
    pub pending_claim: Option<Replay>,
    pub loading: bool,
    pub loading_strategic: bool,
    pub error: Option<String>,
}

impl ReplayStore {
    pub fn new(api: Arc<dyn ReplayApi>) -> Self {
        Self {
            api,
            replays: Vec::new(),
            total: 0,
            current_analysis: None,
            strategic_analysis: None,
            pending_claim: None,
            loading: false,
            loading_strategic: false,
            error: None,
        }
    }

    /// Fetch one page of replays. Replaces `replays` and `total`
    /// together on success; on failure both are cleared so list and
    /// count never disagree (a stale list is worse than an empty one
    /// for this UI).
    pub async fn fetch_replays(&mut self, limit: u32, offset: u32) {
        self.loading = true;
        self.error = None;
        match self.api.list_replays(limit, offset).await {
            Ok(page) => {
                self.replays = page.replays;
                self.total = page.total;
            }
            Err(err) => {
                warn!("Replay list fetch failed: {err}");
                self.error = Some(err.user_message("Failed to load replays"));
                self.replays.clear();
                self.total = 0;
            }
        }
        self.loading = false;
    }

    /// Load the per-player analysis for one replay, replacing any
    /// previously loaded one.
    pub async fn fetch_analysis(&mut self, replay_id: i64) {
        self.loading = true;
        self.error = None;
        match self.api.get_analysis(replay_id).await {
            Ok(analysis) => self.current_analysis = Some(analysis),
            Err(err) => {
                warn!("Analysis fetch failed for replay {replay_id}: {err}");
                self.error = Some(err.user_message("Failed to load analysis"));
                self.current_analysis = None;
            }
        }
        self.loading = false;
    }

    /// Load the strategic breakdown. Best-effort: not every replay has
    /// one, so a failure clears the field without recording an error.
    pub async fn fetch_strategic_analysis(&mut self, replay_id: i64) {
        self.loading_strategic = true;
        match self.api.get_strategic_analysis(replay_id).await {
            Ok(response) => self.strategic_analysis = Some(response),
            Err(err) => {
                debug!("No strategic analysis for replay {replay_id}: {err}");
                self.strategic_analysis = None;
            }
        }
        self.loading_strategic = false;
    }

    /// Upload a raw replay file. On success the list is refreshed with
    /// default paging, and if the backend could not tell which
    /// participant is the current user the returned replay is parked in
    /// `pending_claim` until [`Self::claim`] or
    /// [`Self::clear_pending_claim`].
    pub async fn upload(&mut self, filename: &str, data: Vec<u8>) -> ApiResult<UploadResponse> {
        self.loading = true;
        self.error = None;
        match self.api.upload_replay(filename, data).await {
            Ok(response) => {
                self.fetch_replays(DEFAULT_PAGE_LIMIT, 0).await;
                if response.needs_player_selection {
                    self.pending_claim = Some(response.replay.clone());
                }
                self.loading = false;
                Ok(response)
            }
            Err(err) => {
                self.error = Some(err.user_message("Upload failed"));
                self.loading = false;
                Err(err)
            }
        }
    }

    /// Resolve the ambiguity for a replay/player pair. Success frees
    /// the pending-claim slot unconditionally: the slot holds at most
    /// one replay, so whatever was parked there is settled or stale.
    pub async fn claim(&mut self, replay_id: i64, player_id: i64) -> ApiResult<ClaimResponse> {
        match self.api.claim_replay(replay_id, player_id).await {
            Ok(response) => {
                self.pending_claim = None;
                Ok(response)
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to assign player"));
                Err(err)
            }
        }
    }

    /// Dismiss the disambiguation prompt without resolving it. The
    /// replay stays usable; its player identity stays unresolved.
    pub fn clear_pending_claim(&mut self) {
        self.pending_claim = None;
    }

    /// Delete a replay remotely, then drop it from the local list and
    /// decrement `total` without a re-fetch. Nothing changes locally if
    /// the remote delete fails.
    pub async fn remove(&mut self, replay_id: i64) -> ApiResult<()> {
        match self.api.delete_replay(replay_id).await {
            Ok(()) => {
                self.replays.retain(|r| r.id != replay_id);
                self.total = self.total.saturating_sub(1);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to delete replay"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/replays_tests.rs"]
mod tests;
