//! Print the last line of each burst

use super::Summary;
use anyhow::{Context, Result};
use debouncer::{DebounceConfig, Debouncer};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

pub async fn run(config: &DebounceConfig) -> Result<()> {
    let stdout = Arc::new(Mutex::new(std::io::stdout()));
    let input = BufReader::new(tokio::io::stdin());

    let summary = debounce_lines(input, stdout, config.wait()).await?;
    info!(
        lines = summary.signals,
        settled = summary.settled,
        "input exhausted"
    );
    Ok(())
}

/// Signal once per input line and write each settled line to `output`
///
/// Waits for the final burst to settle before returning.
pub async fn debounce_lines<R, W>(input: R, output: Arc<Mutex<W>>, wait: Duration) -> Result<Summary>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let debouncer = Debouncer::new(wait).with_payload(move |line: String| {
        let mut out = output.lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
            warn!("Failed to write settled line: {}", e);
        }
    });

    let mut lines = input.lines();
    let mut signals = 0;
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        debouncer.signal_with_data(line)?;
        signals += 1;
    }

    debouncer.settle().await;

    Ok(Summary {
        signals,
        settled: debouncer.completed_rounds(),
    })
}
