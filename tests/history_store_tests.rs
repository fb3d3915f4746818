// HistoryStore: dedup, bounded buffers, capacity changes, eviction

mod common;

use common::{at, snapshot};
use dockmon::history_store::{AppendOutcome, DEFAULT_CAPACITY, HistoryStore};

#[test]
fn test_duplicate_timestamp_is_ignored() {
    let store = HistoryStore::new(10);
    assert_eq!(store.append("a", at("a", 1)), AppendOutcome::Stored);
    assert_eq!(
        store.append("a", snapshot("a", 1, 99, 99, 2, 5, 10, 1, 1)),
        AppendOutcome::DuplicateIgnored
    );
    let history = store.snapshots_for("a");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].cpu.total_usage_ticks, 0);
}

#[test]
fn test_equal_timestamp_only_compared_with_last_entry() {
    let store = HistoryStore::new(10);
    store.append("a", at("a", 1));
    store.append("a", at("a", 2));
    assert_eq!(store.append("a", at("a", 1)), AppendOutcome::Stored);
    assert_eq!(store.len("a"), 3);
}

#[test]
fn test_buffer_keeps_newest_up_to_capacity() {
    let store = HistoryStore::new(3);
    for secs in 1..=5 {
        store.append("a", at("a", secs));
    }
    let secs: Vec<i64> = store
        .snapshots_for("a")
        .iter()
        .map(|s| s.read_timestamp.timestamp())
        .collect();
    assert_eq!(secs, vec![3, 4, 5]);
}

#[test]
fn test_capacity_shrink_applies_on_next_append() {
    let store = HistoryStore::new(5);
    for secs in 1..=5 {
        store.append("a", at("a", secs));
    }
    store.set_capacity(2);
    assert_eq!(store.capacity(), 2);
    assert_eq!(store.len("a"), 5);

    store.append("a", at("a", 6));
    let secs: Vec<i64> = store
        .snapshots_for("a")
        .iter()
        .map(|s| s.read_timestamp.timestamp())
        .collect();
    assert_eq!(secs, vec![5, 6]);
}

#[test]
fn test_capacity_never_below_one() {
    let store = HistoryStore::new(0);
    assert_eq!(store.capacity(), 1);
    store.set_capacity(0);
    assert_eq!(store.capacity(), 1);
    store.append("a", at("a", 1));
    store.append("a", at("a", 2));
    assert_eq!(store.len("a"), 1);
}

#[test]
fn test_default_capacity() {
    assert_eq!(HistoryStore::default().capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_track_and_evict() {
    let store = HistoryStore::new(4);
    assert!(store.track("a"));
    assert!(!store.track("a"));
    assert!(store.contains("a"));
    assert_eq!(store.len("a"), 0);

    store.append("a", at("a", 1));
    assert!(store.evict("a"));
    assert!(!store.evict("a"));
    assert!(!store.contains("a"));
    assert!(store.snapshots_for("a").is_empty());
}

#[test]
fn test_track_keeps_existing_history() {
    let store = HistoryStore::new(4);
    store.append("a", at("a", 1));
    assert!(!store.track("a"));
    assert_eq!(store.len("a"), 1);
}

#[test]
fn test_read_copy_is_detached_from_store() {
    let store = HistoryStore::new(4);
    store.append("a", at("a", 1));
    let copy = store.snapshots_for("a");
    store.append("a", at("a", 2));
    store.evict("a");
    assert_eq!(copy.len(), 1);
    assert_eq!(copy[0].read_timestamp.timestamp(), 1);
}

#[test]
fn test_histories_are_independent() {
    let store = HistoryStore::new(2);
    store.append("a", at("a", 1));
    store.append("b", at("b", 1));
    store.append("b", at("b", 2));
    assert_eq!(store.len("a"), 1);
    assert_eq!(store.len("b"), 2);
    let mut ids = store.container_ids();
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
}
