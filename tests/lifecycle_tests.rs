// Host-side tests for start/stop bookkeeping.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::Lifecycle;

#[test]
fn second_start_while_running_is_ignored() {
    let life = Lifecycle::new();
    let ticket = life.begin().unwrap();
    assert!(life.begin().is_none());
    assert!(life.is_current(ticket));
}

#[test]
fn stop_invalidates_a_pending_init() {
    let life = Lifecycle::new();
    let ticket = life.begin().unwrap();
    life.end();
    assert!(!life.is_current(ticket));
}

#[test]
fn stop_then_start_during_init_keeps_only_the_newest() {
    let life = Lifecycle::new();
    let first = life.begin().unwrap();
    // first init is still awaiting the GPU
    life.end();
    let second = life.begin().unwrap();
    assert_ne!(first, second);
    assert!(!life.is_current(first));
    assert!(life.is_current(second));
}

#[test]
fn failed_init_releases_the_slot() {
    let life = Lifecycle::new();
    let ticket = life.begin().unwrap();
    life.abandon(ticket);
    assert!(!life.is_current(ticket));
    assert!(life.begin().is_some());
}

#[test]
fn stale_failure_does_not_stop_a_newer_start() {
    let life = Lifecycle::new();
    let first = life.begin().unwrap();
    life.end();
    let second = life.begin().unwrap();
    life.abandon(first);
    assert!(life.is_current(second));
    assert!(life.begin().is_none());
}
