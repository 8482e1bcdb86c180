use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use crate::entry::Record;
use crate::stats::{Aggregator, AggregatorParams, AlertState, Clock, SectionHits};

fn params() -> AggregatorParams {
    AggregatorParams {
        top_sections: 3,
        traffic_threshold_mb: 1,
        refresh_period: Duration::from_secs(10),
    }
}

fn record(section: &str, size: u64, timestamp: DateTime<Utc>) -> Record {
    Record {
        client_address: "::1".to_string(),
        identifier: "user-identifier".to_string(),
        user_id: "frank".to_string(),
        request: format!("GET {section}/sub/leaf HTTP/1.1"),
        section: section.to_string(),
        status: 201,
        size,
        timestamp: Some(timestamp),
    }
}

/// Clock that the test can step forward.
fn manual_clock(start: DateTime<Utc>) -> (Arc<Mutex<DateTime<Utc>>>, Clock) {
    let now = Arc::new(Mutex::new(start));
    let handle = now.clone();
    let clock: Clock = Box::new(move || *handle.lock().unwrap());
    (now, clock)
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2054, 5, 17, 18, 54, 34).unwrap()
}

#[test]
fn ranks_sections_by_cumulative_hits() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    let mut batch = Vec::new();
    for _ in 0..5 {
        batch.push(record("/best", 10, t0()));
    }
    for _ in 0..4 {
        batch.push(record("/second", 10, t0()));
    }
    for _ in 0..3 {
        batch.push(record("/third", 10, t0()));
    }
    batch.push(record("/nowhere", 10, t0()));

    agg.submit(batch);

    // Only the top three make the report; /nowhere is omitted.
    assert_eq!(
        agg.top_sections(),
        vec![
            SectionHits {
                section: "/best".to_string(),
                hits: 5
            },
            SectionHits {
                section: "/second".to_string(),
                hits: 4
            },
            SectionHits {
                section: "/third".to_string(),
                hits: 3
            },
        ]
    );
}

#[test]
fn ties_break_lexicographically() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    agg.submit(vec![
        record("/c", 1, t0()),
        record("/a", 1, t0()),
        record("/b", 1, t0()),
    ]);

    let ranked = agg.top_sections();
    let sections: Vec<&str> = ranked.iter().map(|h| h.section.as_str()).collect();

    assert_eq!(sections, vec!["/a", "/b", "/c"]);
}

#[test]
fn total_entries_accumulates_across_batches_including_empty() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    agg.submit((0..5).map(|_| record("/a", 1, t0())).collect());
    agg.submit(Vec::new());
    agg.submit((0..3).map(|_| record("/a", 1, t0())).collect());

    assert_eq!(agg.total_entries(), 8);
}

#[test]
fn cumulative_hits_survive_the_recent_window() {
    let (now, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    agg.submit(vec![record("/a", 1, t0())]);
    assert_eq!(agg.hits("/a"), 1);

    // Long after the record has left the recent window the count remains.
    *now.lock().unwrap() = t0() + chrono::Duration::hours(1);
    agg.submit(Vec::new());
    assert_eq!(agg.recent_entries(), 0);
    assert_eq!(agg.hits("/a"), 1);

    agg.submit(vec![record("/a", 1, t0() + chrono::Duration::hours(1))]);
    assert_eq!(agg.hits("/a"), 2);
}

#[test]
fn stale_records_are_not_admitted_to_the_window() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    // Already older than the cutoff on arrival.
    agg.submit(vec![record("/a", 1, t0() - chrono::Duration::seconds(111))]);

    assert_eq!(agg.recent_entries(), 0);
    assert_eq!(agg.total_entries(), 1);
    assert_eq!(agg.hits("/a"), 1);
}

#[test]
fn records_without_timestamp_are_never_recent() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    let mut rec = record("/a", 1, t0());
    rec.timestamp = None;
    agg.submit(vec![rec]);

    assert_eq!(agg.recent_entries(), 0);
    assert_eq!(agg.total_entries(), 1);
}

#[test]
fn alert_fires_repeats_and_recovers_with_the_rolling_window() {
    let (now, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    // 953 MB in one record against a 1 MB threshold.
    agg.submit(vec![record("/best", 999_999_999, t0())]);
    assert_eq!(agg.alert_state(), AlertState::Alerting);
    assert_eq!(agg.recent_entries(), 1);

    // Still inside the window: the alert holds across an empty batch.
    *now.lock().unwrap() = t0() + chrono::Duration::seconds(60);
    agg.submit(Vec::new());
    assert_eq!(agg.alert_state(), AlertState::Alerting);
    assert_eq!(agg.recent_entries(), 1);

    // Past the cutoff: the record is evicted and the alert recovers.
    *now.lock().unwrap() = t0() + chrono::Duration::seconds(120);
    agg.submit(Vec::new());
    assert_eq!(agg.alert_state(), AlertState::Normal);
    assert_eq!(agg.recent_entries(), 0);

    // Quiet afterwards while traffic stays low.
    agg.submit(Vec::new());
    assert_eq!(agg.alert_state(), AlertState::Normal);
}

#[test]
fn traffic_below_a_whole_megabyte_rounds_down() {
    let (_, clock) = manual_clock(t0());
    let mut agg = Aggregator::new(params(), clock);

    // 1 MiB minus one byte stays under a 1 MB threshold.
    agg.submit(vec![record("/a", 1024 * 1024 - 1, t0())]);

    assert_eq!(agg.alert_state(), AlertState::Normal);
}
