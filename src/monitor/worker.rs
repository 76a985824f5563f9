// src/monitor/worker.rs
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::monitor::filter::{self, Decision, SkipReason};
use crate::monitor::{message, Subscription};
use crate::notify::NotifySink;
use crate::source::ContentSource;

/// Owns one subscription's poll loop. Runs until its cancellation token is
/// signaled; no other terminal condition exists.
pub(crate) struct PollingWorker {
    subscription: Subscription,
    source: Arc<dyn ContentSource>,
    sink: Arc<dyn NotifySink>,
    interval: Duration,
    token: CancellationToken,
}

impl PollingWorker {
    pub(crate) fn new(
        subscription: Subscription,
        source: Arc<dyn ContentSource>,
        sink: Arc<dyn NotifySink>,
        interval: Duration,
        token: CancellationToken,
    ) -> Self {
        Self {
            subscription,
            source,
            sink,
            interval,
            token,
        }
    }

    pub(crate) async fn run(mut self) {
        info!(
            identity = %self.subscription.identity,
            endpoint = %self.subscription.endpoint,
            "started monitoring"
        );

        loop {
            // Top-of-iteration check so a stop issued during the previous
            // fetch is honored before the next outbound call.
            if self.token.is_cancelled() {
                break;
            }

            if let Err(fault) = self.poll_once().await {
                warn!(
                    identity = %self.subscription.identity,
                    error = ?fault,
                    "unexpected fault in poll iteration"
                );
                let diag = message::render_worker_fault(&self.subscription.identity, &fault);
                if let Err(e) = self.sink.deliver(self.subscription.endpoint, &diag).await {
                    warn!(error = %e, "failed to deliver fault diagnostic");
                }
            }

            // Interruptible sleep: cancellation cuts the delay short instead
            // of waiting out the full interval.
            tokio::select! {
                _ = self.token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(
            identity = %self.subscription.identity,
            endpoint = %self.subscription.endpoint,
            "stopped monitoring"
        );
    }

    async fn poll_once(&mut self) -> anyhow::Result<()> {
        let item = match self.source.fetch_latest(&self.subscription.identity).await {
            Ok(item) => item,
            Err(e) => {
                warn!(
                    identity = %self.subscription.identity,
                    error = %e,
                    "fetch failed"
                );
                let diag = message::render_fetch_failure(&self.subscription.identity, &e);
                if let Err(de) = self.sink.deliver(self.subscription.endpoint, &diag).await {
                    warn!(error = %de, "failed to deliver fetch diagnostic");
                }
                return Ok(());
            }
        };

        let Some(item) = item else {
            debug!(identity = %self.subscription.identity, "no item in response");
            return Ok(());
        };

        match filter::evaluate(
            &item,
            self.subscription.last_seen_id.as_deref(),
            &self.subscription.keywords,
        ) {
            Decision::Skip(SkipReason::AlreadySeen) => {
                debug!(identity = %self.subscription.identity, id = %item.id, "already seen");
            }
            Decision::Skip(SkipReason::NoKeywordMatch) => {
                info!(
                    identity = %self.subscription.identity,
                    id = %item.id,
                    "item skipped by keyword filter"
                );
            }
            Decision::Notify => {
                // Marker moves when the Notify decision is acted upon, before
                // delivery, so a failed send cannot re-notify the same id.
                self.subscription.last_seen_id = Some(item.id.clone());
                let msg = message::render_notification(&self.subscription.identity, &item);
                if let Err(e) = self.sink.deliver(self.subscription.endpoint, &msg).await {
                    warn!(
                        identity = %self.subscription.identity,
                        id = %item.id,
                        error = %e,
                        "notification delivery failed"
                    );
                }
            }
        }

        Ok(())
    }
}
