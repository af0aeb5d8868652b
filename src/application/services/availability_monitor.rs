//! Periodic reachability sweeps over every stored link.
//!
//! The monitor keeps the last observed accessibility of each link in memory.
//! The first observation of a link is a baseline; later observations that
//! differ from the stored value are reported through a
//! [`TransitionNotifier`]. State is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::domain::availability::{
    AvailabilityTransition, ReachabilityProbe, TransitionNotifier, state_label,
};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default time between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub checked: usize,
    pub accessible: usize,
    pub inaccessible: usize,
    pub transitions: usize,
}

pub struct AvailabilityMonitor<L: LinkRepository> {
    link_repository: Arc<L>,
    probe: Arc<dyn ReachabilityProbe>,
    notifier: Arc<dyn TransitionNotifier>,
    states: Mutex<HashMap<i64, bool>>,
}

impl<L: LinkRepository> AvailabilityMonitor<L> {
    pub fn new(
        link_repository: Arc<L>,
        probe: Arc<dyn ReachabilityProbe>,
        notifier: Arc<dyn TransitionNotifier>,
    ) -> Self {
        Self {
            link_repository,
            probe,
            notifier,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Probes every stored link once, one after another.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the link list could not be read. No link
    /// is probed and no state changes in that case.
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let links = self
            .link_repository
            .list_all()
            .await
            .map_err(|e| e.context("listing links for availability sweep"))?;

        let mut report = SweepReport::default();

        for link in links {
            let accessible = self.probe.is_accessible(&link.long_url).await;

            report.checked += 1;
            if accessible {
                report.accessible += 1;
            } else {
                report.inaccessible += 1;
            }

            let previous = self.states.lock().await.insert(link.id, accessible);

            match previous {
                None => {
                    debug!(
                        code = %link.short_code,
                        state = state_label(accessible),
                        "Recorded baseline availability"
                    );
                }
                Some(was_accessible) if was_accessible != accessible => {
                    report.transitions += 1;
                    self.notifier.notify(&AvailabilityTransition {
                        link_id: link.id,
                        short_code: link.short_code,
                        long_url: link.long_url,
                        was_accessible,
                        is_accessible: accessible,
                    });
                }
                Some(_) => {
                    debug!(code = %link.short_code, state = state_label(accessible), "Availability unchanged");
                }
            }
        }

        Ok(report)
    }

    /// Last observed accessibility of a link, if it was probed before.
    pub async fn last_known(&self, link_id: i64) -> Option<bool> {
        self.states.lock().await.get(&link_id).copied()
    }

    /// Runs a sweep immediately and then once per `period`, forever.
    ///
    /// A sweep that runs longer than `period` delays the next one; sweeps
    /// never overlap. Failed sweeps are logged and skipped.
    pub async fn start(&self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = period.as_secs(), "Availability monitor started");

        loop {
            ticker.tick().await;

            match self.sweep().await {
                Ok(report) => info!(
                    checked = report.checked,
                    accessible = report.accessible,
                    inaccessible = report.inaccessible,
                    transitions = report.transitions,
                    "Availability sweep finished"
                ),
                Err(e) => error!(error = %e, "Availability sweep skipped"),
            }
        }
    }
}

impl<L: LinkRepository + 'static> AvailabilityMonitor<L> {
    /// Runs [`AvailabilityMonitor::start`] on a background task.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move { self.start(period).await })
    }
}
