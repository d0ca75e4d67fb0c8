use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior};

use crate::domain::app::tracker::{Intent, Tracker};
use crate::domain::engine::Snapshot;
use crate::domain::entity::Warning;
use crate::domain::outbound::NotifyPort;
use crate::tracing_report;

/// Drives a [`Tracker`] periodically and hands every fresh [`Snapshot`] to a
/// sink. Warnings which were not present on the previous tick are announced
/// through the optional notifier.
pub struct Ticker {
    period: Duration,
    notifier: Option<Arc<dyn NotifyPort>>,
}

impl Ticker {
    /// Creates a new [`Ticker`] firing every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotifyPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Tick until `shutdown` completes.
    pub async fn run<F, S>(&self, tracker: &mut Tracker, shutdown: F, mut sink: S)
    where
        F: Future<Output = ()>,
        S: FnMut(&Snapshot),
    {
        let mut timer = tokio::time::interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut raised = HashSet::new();
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = timer.tick() => {
                    let snapshot = tracker.handle(Intent::Tick).await;
                    self.announce(&mut raised, &snapshot.warnings).await;
                    sink(&snapshot);
                }
            }
        }
        tracing::debug!("Ticker stopped");
    }

    async fn announce(&self, raised: &mut HashSet<Warning>, warnings: &[Warning]) {
        if let Some(notifier) = &self.notifier {
            for warning in warnings.iter().filter(|warning| !raised.contains(*warning)) {
                if let Err(err) = notifier.notify(warning).await {
                    tracing_report!(err, "Could not announce \"{warning}\"");
                }
            }
        }
        *raised = warnings.iter().cloned().collect();
    }
}
