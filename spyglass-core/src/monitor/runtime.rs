use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tokio::runtime::Builder;
use tokio::signal::unix::{SignalKind, signal};

use crate::config::MonitorConfig;
use crate::entry::{decode, tokenize};
use crate::monitor::tail::Tailer;
use crate::stats::{Aggregator, AggregatorParams};

/// Runs the agent: the tail loop works in the background while the
/// foreground holds until a termination signal arrives.
pub fn run(config: MonitorConfig) -> Result<()> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    runtime.block_on(async {
        tokio::spawn(tail_loop(config));

        wait_for_shutdown().await?;
        tracing::info!("shutdown requested");

        Ok(())
    })
}

/// One task owns the aggregator and is the only caller of `submit`, so
/// successive calls are naturally serialized.
async fn tail_loop(config: MonitorConfig) {
    let mut tailer = Tailer::new(config.access_log.clone());
    let mut aggregator = Aggregator::new(
        AggregatorParams {
            top_sections: config.top_sections,
            traffic_threshold_mb: config.traffic_threshold_mb,
            refresh_period: config.refresh_period(),
        },
        Box::new(Utc::now),
    );

    loop {
        let cycle_started = Instant::now();

        let batch = tailer
            .read_new_lines()
            .iter()
            .filter_map(|line| match tokenize(line) {
                Ok(fields) => Some(decode(fields)),
                Err(e) => {
                    tracing::warn!(error = %e, "could not tokenize log line");
                    None
                }
            })
            .collect();

        aggregator.submit(batch);

        // Sleep for the refresh period minus the time this cycle took; a
        // cycle that overran its period starts the next one immediately.
        let elapsed = cycle_started.elapsed();
        tokio::time::sleep(config.refresh_period().saturating_sub(elapsed)).await;
    }
}

async fn wait_for_shutdown() -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }

    Ok(())
}
