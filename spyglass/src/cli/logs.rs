use anyhow::Result;
use serde_json::Value;
use spyglass_core::logging::LogMode;
use std::io::{self, BufRead};

pub fn run_logs(mode: LogMode) -> Result<()> {
    let stdin = io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = line?;

        // Fast path: raw passthrough
        if matches!(mode, LogMode::Raw) {
            println!("{line}");
            continue;
        }

        let Ok(json) = serde_json::from_str::<Value>(&line) else {
            // If it's not JSON, just print it.
            println!("{line}");
            continue;
        };

        render_event(&json);
    }

    Ok(())
}

fn render_event(event: &Value) {
    let level = event.get("level").and_then(Value::as_str).unwrap_or("INFO");
    let message = event
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("<no message>");

    // Ranked section events carry section + hits.
    if let (Some(section), Some(hits)) = (
        event.get("section").and_then(Value::as_str),
        event.get("hits").and_then(Value::as_i64),
    ) {
        println!("[{level}] {message}: {section} ({hits} hits)");
        return;
    }

    // Statistics events carry the running totals.
    if let (Some(total), Some(recent)) = (
        event.get("total_entries").and_then(Value::as_i64),
        event.get("recent_entries").and_then(Value::as_i64),
    ) {
        println!("[{level}] {message}: total={total} recent={recent}");
        return;
    }

    // Alert events carry the measured traffic and the threshold.
    if let (Some(traffic), Some(threshold)) = (
        event.get("recent_traffic").and_then(Value::as_str),
        event.get("threshold").and_then(Value::as_str),
    ) {
        println!("[{level}] {message} (traffic={traffic}, threshold={threshold})");
        return;
    }

    let target = event.get("target").and_then(Value::as_str).unwrap_or("");
    if target.is_empty() {
        println!("[{level}] {message}");
    } else {
        println!("[{level}] {message} ({target})");
    }
}
