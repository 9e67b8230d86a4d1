use serde_json::{json, Value};

use crate::stores::replays::DEFAULT_PAGE_LIMIT;
use crate::stores::ReplayStore;
use crate::test_utils::MockApi;
use crate::types::ApiError;

fn replay_json(id: i64) -> Value {
    json!({
        "id": id,
        "hash": format!("hash-{id}"),
        "filename": format!("game_{id}.SC2Replay"),
        "map": "Site Delta LE",
        "duration": 712,
        "game_version": "5.0.12",
        "played_at": "2025-11-02T19:41:03Z",
        "uploaded_at": "2025-11-03T08:12:00Z",
        "players": [
            {
                "replay_id": id, "player_id": 7, "player_slot": 0,
                "name": "MacroMain", "race": "Zerg", "result": "Win",
                "apm": 245.0, "spending_quotient": 96.3, "is_human": true
            },
            {
                "replay_id": id, "player_id": 8, "player_slot": 1,
                "name": "MacroMain", "race": "Zerg", "result": "Loss",
                "apm": 180.0, "spending_quotient": 88.0, "is_human": true
            }
        ]
    })
}

fn page_json(ids: &[i64], total: u64) -> Value {
    json!({
        "replays": ids.iter().map(|id| replay_json(*id)).collect::<Vec<_>>(),
        "total": total
    })
}

fn upload_json(id: i64, needs_selection: bool) -> Value {
    json!({
        "replay_id": id,
        "replay": replay_json(id),
        "message": "Replay uploaded",
        "needs_player_selection": needs_selection
    })
}

fn analysis_json(id: i64) -> Value {
    json!({
        "replay": replay_json(id),
        "analyses": {
            "7": {
                "apm_analysis": {
                    "average_apm": 245.0, "peak_apm": 410.0, "eapm": 190.0,
                    "apm_timeline": []
                }
            }
        }
    })
}

fn strategic_json(id: i64) -> Value {
    json!({
        "replay": replay_json(id),
        "analysis": {
            "winner": "MacroMain", "loser": "MacroMain",
            "winner_race": "Zerg", "loser_race": "Zerg",
            "matchup": "ZvZ",
            "metrics_comparison": [],
            "supply_blocks": [],
            "critical_moments": [],
            "problems": [],
            "matchup_tips": null,
            "improvement_steps": [],
            "summary": "Mirror match decided on larva usage."
        }
    })
}

#[tokio::test]
async fn test_fetch_replays_replaces_list_and_total_together() {
    let api = MockApi::new();
    api.push_ok("list_replays", page_json(&[1, 2], 2));
    let mut store = ReplayStore::new(api.clone());

    store.fetch_replays(20, 0).await;

    assert_eq!(store.replays.len(), 2);
    assert_eq!(store.replays[0].id, 1);
    assert_eq!(store.total, 2);
    assert!(store.error.is_none());
    assert!(!store.loading);
    assert_eq!(api.calls(), vec!["list_replays(20,0)"]);
}

#[tokio::test]
async fn test_fetch_replays_failure_clears_list_and_total() {
    let api = MockApi::new();
    api.push_ok("list_replays", page_json(&[1, 2], 2));
    api.push_err(
        "list_replays",
        ApiError::Network("connection refused".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.fetch_replays(20, 0).await;
    assert_eq!(store.total, 2);

    // A stale list is worse than an empty one: both go together.
    store.fetch_replays(20, 0).await;
    assert!(store.replays.is_empty());
    assert_eq!(store.total, 0);
    assert_eq!(store.error.as_deref(), Some("Failed to load replays"));
    assert!(!store.loading);
}

#[tokio::test]
async fn test_fetch_replays_surfaces_backend_error_text() {
    let api = MockApi::new();
    api.push_err(
        "list_replays",
        ApiError::Backend("Session expired".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.fetch_replays(20, 0).await;

    assert_eq!(store.error.as_deref(), Some("Session expired"));
}

#[tokio::test]
async fn test_upload_needing_selection_parks_pending_claim() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    let mut store = ReplayStore::new(api.clone());

    let response = store
        .upload("game_5.SC2Replay", vec![0u8; 64])
        .await
        .expect("upload failed");

    assert!(response.needs_player_selection);
    assert_eq!(store.pending_claim.as_ref().map(|r| r.id), Some(5));
    // The list refresh is unconditional on upload success.
    assert_eq!(
        api.calls(),
        vec![
            "upload_replay(game_5.SC2Replay,64 bytes)".to_string(),
            format!("list_replays({DEFAULT_PAGE_LIMIT},0)"),
        ]
    );
    assert_eq!(store.replays.len(), 1);
    assert!(!store.loading);
}

#[tokio::test]
async fn test_upload_without_selection_flag_keeps_prior_pending_claim() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    api.push_ok("upload_replay", upload_json(6, false));
    api.push_ok("list_replays", page_json(&[5, 6], 2));
    let mut store = ReplayStore::new(api);

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();
    store.upload("game_6.SC2Replay", vec![2]).await.unwrap();

    // The second upload resolved on its own; the earlier claim stays.
    assert_eq!(store.pending_claim.as_ref().map(|r| r.id), Some(5));
}

#[tokio::test]
async fn test_second_ambiguous_upload_overwrites_pending_claim() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    api.push_ok("upload_replay", upload_json(9, true));
    api.push_ok("list_replays", page_json(&[5, 9], 2));
    let mut store = ReplayStore::new(api);

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();
    store.upload("game_9.SC2Replay", vec![2]).await.unwrap();

    assert_eq!(store.pending_claim.as_ref().map(|r| r.id), Some(9));
}

#[tokio::test]
async fn test_upload_failure_sets_error_and_reraises() {
    let api = MockApi::new();
    api.push_err(
        "upload_replay",
        ApiError::Backend("Only .SC2Replay files are allowed".to_string()),
    );
    let mut store = ReplayStore::new(api.clone());

    let result = store.upload("notes.txt", vec![1, 2, 3]).await;

    assert!(result.is_err());
    assert_eq!(
        store.error.as_deref(),
        Some("Only .SC2Replay files are allowed")
    );
    assert!(store.pending_claim.is_none());
    // No list refresh on a failed upload.
    assert_eq!(api.calls(), vec!["upload_replay(notes.txt,3 bytes)"]);
    assert!(!store.loading);
}

#[tokio::test]
async fn test_claim_clears_pending_claim_even_for_other_replay_id() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    api.push_ok(
        "claim_replay",
        json!({ "message": "Player assigned", "player_name": "MacroMain" }),
    );
    let mut store = ReplayStore::new(api);

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();
    let response = store.claim(99, 42).await.expect("claim failed");

    // Single-slot design: whatever was parked there is settled or stale.
    assert_eq!(response.player_name, "MacroMain");
    assert!(store.pending_claim.is_none());
}

#[tokio::test]
async fn test_upload_then_claim_roundtrip() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    api.push_ok(
        "claim_replay",
        json!({ "message": "Player assigned", "player_name": "MacroMain" }),
    );
    let mut store = ReplayStore::new(api.clone());

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();
    assert_eq!(store.pending_claim.as_ref().map(|r| r.id), Some(5));

    store.claim(5, 42).await.unwrap();
    assert!(store.pending_claim.is_none());
    assert!(api.calls().contains(&"claim_replay(5,42)".to_string()));
}

#[tokio::test]
async fn test_claim_failure_keeps_pending_claim() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    api.push_err(
        "claim_replay",
        ApiError::Backend("Player not found in replay".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();
    let result = store.claim(5, 404).await;

    assert!(result.is_err());
    assert_eq!(store.error.as_deref(), Some("Player not found in replay"));
    // The prompt must stay up so the user can pick again.
    assert_eq!(store.pending_claim.as_ref().map(|r| r.id), Some(5));
}

#[tokio::test]
async fn test_clear_pending_claim_is_idempotent() {
    let api = MockApi::new();
    api.push_ok("upload_replay", upload_json(5, true));
    api.push_ok("list_replays", page_json(&[5], 1));
    let mut store = ReplayStore::new(api);

    store.upload("game_5.SC2Replay", vec![1]).await.unwrap();

    store.clear_pending_claim();
    assert!(store.pending_claim.is_none());
    store.clear_pending_claim();
    assert!(store.pending_claim.is_none());
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_remove_drops_entry_and_decrements_total() {
    let api = MockApi::new();
    api.push_ok("list_replays", page_json(&[1, 2], 2));
    api.push_ok("delete_replay", json!(null));
    let mut store = ReplayStore::new(api);

    store.fetch_replays(20, 0).await;
    store.remove(1).await.expect("delete failed");

    assert_eq!(store.replays.len(), 1);
    assert_eq!(store.replays[0].id, 2);
    assert_eq!(store.total, 1);
}

#[tokio::test]
async fn test_remove_clamps_total_at_zero() {
    let api = MockApi::new();
    api.push_ok("list_replays", page_json(&[], 0));
    api.push_ok("delete_replay", json!(null));
    let mut store = ReplayStore::new(api);

    store.fetch_replays(20, 0).await;
    store.remove(77).await.expect("delete failed");

    assert_eq!(store.total, 0);
}

#[tokio::test]
async fn test_remove_failure_leaves_list_untouched() {
    let api = MockApi::new();
    api.push_ok("list_replays", page_json(&[1, 2], 2));
    api.push_err(
        "delete_replay",
        ApiError::Unexpected("HTTP 500 Internal Server Error".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.fetch_replays(20, 0).await;
    let result = store.remove(1).await;

    // No optimistic removal.
    assert!(result.is_err());
    assert_eq!(store.replays.len(), 2);
    assert_eq!(store.total, 2);
    assert_eq!(store.error.as_deref(), Some("Failed to delete replay"));
}

#[tokio::test]
async fn test_fetch_analysis_replaces_previous_one() {
    let api = MockApi::new();
    api.push_ok("get_analysis", analysis_json(5));
    api.push_ok("get_analysis", analysis_json(6));
    let mut store = ReplayStore::new(api);

    store.fetch_analysis(5).await;
    assert_eq!(store.current_analysis.as_ref().unwrap().replay.id, 5);

    store.fetch_analysis(6).await;
    assert_eq!(store.current_analysis.as_ref().unwrap().replay.id, 6);
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_fetch_analysis_failure_sets_error_and_clears_field() {
    let api = MockApi::new();
    api.push_ok("get_analysis", analysis_json(5));
    api.push_err(
        "get_analysis",
        ApiError::Network("timed out".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.fetch_analysis(5).await;
    store.fetch_analysis(5).await;

    assert!(store.current_analysis.is_none());
    assert_eq!(store.error.as_deref(), Some("Failed to load analysis"));
}

#[tokio::test]
async fn test_strategic_analysis_failure_is_silent() {
    let api = MockApi::new();
    api.push_ok("get_strategic_analysis", strategic_json(5));
    api.push_err(
        "get_strategic_analysis",
        ApiError::Backend("Strategic analysis not available".to_string()),
    );
    let mut store = ReplayStore::new(api);

    store.fetch_strategic_analysis(5).await;
    assert_eq!(store.strategic_analysis.as_ref().unwrap().replay.id, 5);

    store.error = Some("earlier failure".to_string());
    store.fetch_strategic_analysis(5).await;

    // Best-effort feature: the field empties, the error stays put.
    assert!(store.strategic_analysis.is_none());
    assert_eq!(store.error.as_deref(), Some("earlier failure"));
    assert!(!store.loading_strategic);
}
