use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::entry::Record;
use crate::stats::alert::{AlertEvent, AlertState, TrafficAlert};

/// How far back a record's timestamp may lie and still count as recent.
const RECENT_WINDOW_SECS: i64 = 110;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Source of "now", injected so window and alert behavior stay
/// deterministic under test.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

/// Configuration the aggregator holds for its lifetime.
#[derive(Debug, Clone)]
pub struct AggregatorParams {
    /// Number of ranked sections reported after each batch.
    pub top_sections: usize,

    /// Recent traffic, in whole megabytes, at or above which the alert fires.
    pub traffic_threshold_mb: u64,

    /// Cadence of the tail loop; carried for reporting, not consulted by the
    /// aggregator itself.
    pub refresh_period: Duration,
}

/// One section with its lifetime hit count.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SectionHits {
    pub section: String,
    pub hits: u64,
}

/// Consumes batches of decoded records and keeps the running statistics:
/// lifetime per-section hit counts, the rolling recent-traffic window, and
/// the traffic alert.
///
/// Not re-entrant: exactly one `submit` call may be in flight at a time.
/// The tail loop owns the aggregator and is its only caller.
pub struct Aggregator {
    params: AggregatorParams,
    clock: Clock,

    /// Lifetime hit count per section; never reset.
    cumulative_hits: HashMap<String, u64>,

    /// Records currently counted as recent, in arrival order.
    recent_window: Vec<Record>,

    alert: TrafficAlert,
    total_entries: u64,
    recent_entries: u64,
}

impl Aggregator {
    pub fn new(params: AggregatorParams, clock: Clock) -> Self {
        let alert = TrafficAlert::new(params.traffic_threshold_mb);

        Self {
            params,
            clock,
            cumulative_hits: HashMap::new(),
            recent_window: Vec::new(),
            alert,
            total_entries: 0,
            recent_entries: 0,
        }
    }

    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    pub fn recent_entries(&self) -> u64 {
        self.recent_entries
    }

    pub fn alert_state(&self) -> AlertState {
        self.alert.state()
    }

    /// Lifetime hit count for one section.
    pub fn hits(&self, section: &str) -> u64 {
        self.cumulative_hits.get(section).copied().unwrap_or(0)
    }

    /// Feeds one batch of records through the engine, updating every derived
    /// statistic and emitting the ranked, alert, and statistics events.
    ///
    /// Infallible: malformed input was already degraded at decode time, so a
    /// bad batch element is just a record with zeroed fields.
    pub fn submit(&mut self, batch: Vec<Record>) {
        self.total_entries += batch.len() as u64;

        for record in &batch {
            *self
                .cumulative_hits
                .entry(record.section.clone())
                .or_insert(0) += 1;
        }

        let recent_mb = self.evaluate_recent_traffic(batch);

        if let Some(event) = self.alert.observe(recent_mb) {
            emit_alert(&event);
        }

        for (idx, hit) in self.top_sections().iter().enumerate() {
            tracing::info!(
                section = %hit.section,
                hits = hit.hits,
                "Top section #{}", idx + 1
            );
        }

        tracing::info!(
            total_entries = self.total_entries,
            recent_entries = self.recent_entries,
            "Statistics"
        );
    }

    /// Rolls the recent window forward and returns the traffic it now holds,
    /// in whole megabytes.
    fn evaluate_recent_traffic(&mut self, batch: Vec<Record>) -> u64 {
        let cutoff = (self.clock)() - chrono::Duration::seconds(RECENT_WINDOW_SECS);

        // Entries admitted earlier fall out once their timestamp ages past
        // the cutoff.
        self.recent_window
            .retain(|r| r.timestamp.is_some_and(|t| t > cutoff));

        for record in batch {
            if record.timestamp.is_some_and(|t| t > cutoff) {
                self.recent_window.push(record);
            }
        }

        self.recent_entries = self.recent_window.len() as u64;

        let recent_traffic: u64 = self.recent_window.iter().map(|r| r.size).sum();
        recent_traffic / BYTES_PER_MB
    }

    /// All sections ranked by lifetime hits, highest first, truncated to the
    /// configured count. Ties order lexicographically by section so the
    /// ranking is deterministic.
    pub fn top_sections(&self) -> Vec<SectionHits> {
        let mut ranked: Vec<SectionHits> = self
            .cumulative_hits
            .iter()
            .map(|(section, &hits)| SectionHits {
                section: section.clone(),
                hits,
            })
            .collect();

        ranked.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.section.cmp(&b.section)));
        ranked.truncate(self.params.top_sections);
        ranked
    }
}

fn emit_alert(event: &AlertEvent) {
    let (recent_mb, threshold_mb) = match event {
        AlertEvent::ThresholdExceeded {
            recent_mb,
            threshold_mb,
        }
        | AlertEvent::StillExceeding {
            recent_mb,
            threshold_mb,
        }
        | AlertEvent::BackToNormal {
            recent_mb,
            threshold_mb,
        } => (*recent_mb, *threshold_mb),
    };

    let recent_traffic = format!("{recent_mb}MB");
    let threshold = format!("{threshold_mb}MB");

    match event {
        AlertEvent::ThresholdExceeded { .. } => {
            tracing::warn!(
                recent_traffic = %recent_traffic,
                threshold = %threshold,
                "Recent traffic exceeds the configured threshold"
            );
        }
        AlertEvent::StillExceeding { .. } => {
            tracing::warn!(
                recent_traffic = %recent_traffic,
                threshold = %threshold,
                "Recent traffic still exceeds the configured threshold"
            );
        }
        AlertEvent::BackToNormal { .. } => {
            tracing::info!(
                recent_traffic = %recent_traffic,
                threshold = %threshold,
                "Recent traffic is back to normal"
            );
        }
    }
}
