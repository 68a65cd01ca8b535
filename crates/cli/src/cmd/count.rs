//! Report how many lines each settled burst collapsed

use super::Summary;
use anyhow::{Context, Result};
use debouncer::{DebounceConfig, Debouncer};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

pub async fn run(config: &DebounceConfig) -> Result<()> {
    let stdout = Arc::new(Mutex::new(std::io::stdout()));
    let input = BufReader::new(tokio::io::stdin());

    let summary = count_bursts(input, stdout, config.wait()).await?;
    info!(
        lines = summary.signals,
        bursts = summary.settled,
        "input exhausted"
    );
    Ok(())
}

/// Count lines per burst; writes one report line per settled burst
pub async fn count_bursts<R, W>(input: R, output: Arc<Mutex<W>>, wait: Duration) -> Result<Summary>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let seen = Arc::new(AtomicU64::new(0));

    let burst = Arc::clone(&seen);
    let debouncer: Debouncer = Debouncer::new(wait).with_triggered(move || {
        let collapsed = burst.swap(0, Ordering::SeqCst);
        let mut out = output.lock();
        if let Err(e) = writeln!(out, "settled after {} line(s)", collapsed).and_then(|()| out.flush()) {
            warn!("Failed to write burst report: {}", e);
        }
    });

    let mut lines = input.lines();
    let mut signals = 0;
    while lines.next_line().await.context("Failed to read input")?.is_some() {
        debouncer.run(|| {
            seen.fetch_add(1, Ordering::SeqCst);
        })?;
        signals += 1;
    }

    debouncer.settle().await;

    Ok(Summary {
        signals,
        settled: debouncer.completed_rounds(),
    })
}
