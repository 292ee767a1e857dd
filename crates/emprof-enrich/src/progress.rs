//! Cosmetic progress sequence.
//!
//! Purely client-side UI feedback on a fixed cadence — not derived from any
//! real provider state. The ticker runs as its own task and is cancelled
//! through [`AbortOnDrop`] the instant the enrichment call settles; steps
//! that never fired are simply never shown.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// One cosmetic step: a label and the percentage to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub percent: u8,
}

/// Cadence between cosmetic steps.
pub const PROGRESS_TICK: Duration = Duration::from_millis(1200);

/// The fixed ordered step sequence shown during generation.
pub const PROGRESS_STEPS: [ProgressStep; 8] = [
    ProgressStep { label: "Connecting...", percent: 10 },
    ProgressStep { label: "Extracting domain...", percent: 25 },
    ProgressStep { label: "Creating folder...", percent: 40 },
    ProgressStep { label: "Fetching brand data...", percent: 55 },
    ProgressStep { label: "Processing logos...", percent: 70 },
    ProgressStep { label: "Extracting colors...", percent: 80 },
    ProgressStep { label: "Creating document...", percent: 90 },
    ProgressStep { label: "Finalizing...", percent: 100 },
];

/// Spawns the ticker task: one step per `tick`, stopping after the last
/// step or when the receiver goes away. The returned guard aborts the task
/// on drop, which is how settlement cancels an unfinished sequence on
/// every exit path.
pub(crate) fn spawn_ticker(tick: Duration, sink: UnboundedSender<ProgressStep>) -> AbortOnDrop {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        // The first interval tick completes immediately; consume it so the
        // first step fires one full cadence after submission.
        interval.tick().await;
        for step in PROGRESS_STEPS {
            interval.tick().await;
            if sink.send(step).is_err() {
                break;
            }
        }
    });
    AbortOnDrop(handle)
}

pub(crate) struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
