//! Presence accounting across sessions
//!
//! The ephemeral presence subsystem must count connected sessions and
//! self-heal when a session vanishes without saying goodbye.

use xfboard::client::{BoardController, PresenceRegistry};
use xfboard::store::MemoryStore;

#[tokio::test]
async fn two_sessions_count_two() {
    let store = MemoryStore::new();
    let first = PresenceRegistry::new(&store);
    let second = PresenceRegistry::new(&store);
    first.activate().await;
    second.activate().await;

    assert_eq!(first.online_count(), 2);
    assert_eq!(second.online_count(), 2);
}

#[tokio::test]
async fn ungraceful_loss_heals_without_survivor_action() {
    let store = MemoryStore::new();
    let survivor = PresenceRegistry::new(&store);
    let doomed = PresenceRegistry::new(&store);
    survivor.activate().await;
    doomed.activate().await;
    assert_eq!(survivor.online_count(), 2);

    // The disconnect hook fires without any explicit removal call; the
    // surviving client does nothing at all.
    doomed.connection().disconnect();

    assert_eq!(survivor.online_count(), 1);
    assert!(store
        .presence_sessions()
        .contains_key(survivor.session_id()));
}

#[tokio::test]
async fn dropping_a_session_handle_counts_as_disconnect() {
    let store = MemoryStore::new();
    let watcher = PresenceRegistry::new(&store);
    watcher.activate().await;
    {
        let transient = PresenceRegistry::new(&store);
        transient.activate().await;
        assert_eq!(watcher.online_count(), 2);
    }
    // Handle gone, marker gone.
    assert_eq!(watcher.online_count(), 1);
}

#[tokio::test]
async fn graceful_deactivation_beats_the_disconnect_hook() {
    let store = MemoryStore::new();
    let registry = PresenceRegistry::new(&store);
    registry.activate().await;
    assert_eq!(registry.online_count(), 1);

    registry.deactivate();
    assert_eq!(registry.online_count(), 0);

    // The hook was cancelled; the real disconnect has nothing to redo.
    registry.connection().disconnect();
    assert_eq!(registry.online_count(), 0);
}

#[tokio::test]
async fn presence_changes_fan_out_to_watchers() {
    let store = MemoryStore::new();
    let watcher = PresenceRegistry::new(&store);
    watcher.activate().await;

    let mut rx = watcher.subscribe();
    let other = PresenceRegistry::new(&store);
    other.activate().await;

    let sessions = rx.recv().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.contains_key(other.session_id()));
}

#[tokio::test]
async fn controller_sessions_are_counted_too() {
    let store = MemoryStore::new();
    let first = BoardController::new(&store);
    let second = BoardController::new(&store);
    first.attach().await;
    second.attach().await;
    assert_eq!(first.online_count(), 2);

    second.detach();
    assert_eq!(first.online_count(), 1);
}
