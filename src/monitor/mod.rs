// src/monitor/mod.rs
pub mod filter;
pub mod message;
mod worker;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::monitor::filter::KeywordFilter;
use crate::monitor::worker::PollingWorker;
use crate::notify::{EndpointId, NotifySink};
use crate::source::ContentSource;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Unique identity of one monitor: who gets notified about which feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
    pub endpoint: EndpointId,
    pub identity: String,
}

/// A committed start request from the front-end.
#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub endpoint: EndpointId,
    pub identity: String,
    pub keywords: Vec<String>,
}

impl SubscriptionRequest {
    pub fn key(&self) -> SubscriptionKey {
        SubscriptionKey {
            endpoint: self.endpoint,
            identity: self.identity.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartResult {
    Started,
    /// A monitor with the same key is already running; it is left untouched.
    Conflict,
}

/// Per-worker state. Owned exclusively by the worker task; the registry only
/// ever holds the key and the cancellation handle.
pub(crate) struct Subscription {
    pub(crate) endpoint: EndpointId,
    pub(crate) identity: String,
    pub(crate) keywords: KeywordFilter,
    pub(crate) last_seen_id: Option<String>,
}

struct ActiveMonitor {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// The subscription registry: the single point of truth for what is being
/// monitored. Start, stop, and bulk-stop serialize on the internal lock, so
/// a key is present iff exactly one live worker holds its token.
pub struct MonitorEngine {
    source: Arc<dyn ContentSource>,
    sink: Arc<dyn NotifySink>,
    poll_interval: Duration,
    active: Mutex<HashMap<SubscriptionKey, ActiveMonitor>>,
}

impl MonitorEngine {
    pub fn new(source: Arc<dyn ContentSource>, sink: Arc<dyn NotifySink>) -> Self {
        Self {
            source,
            sink,
            poll_interval: DEFAULT_POLL_INTERVAL,
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Register a subscription and spawn its polling worker. A duplicate key
    /// is rejected as a conflict without disturbing the running monitor.
    /// Must be called from within a tokio runtime.
    pub fn start(&self, request: SubscriptionRequest) -> StartResult {
        let key = request.key();
        let mut active = self.active.lock().expect("registry mutex poisoned");
        if active.contains_key(&key) {
            return StartResult::Conflict;
        }

        let token = CancellationToken::new();
        let subscription = Subscription {
            endpoint: request.endpoint,
            identity: request.identity,
            keywords: KeywordFilter::new(request.keywords),
            last_seen_id: None,
        };
        let worker = PollingWorker::new(
            subscription,
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
            self.poll_interval,
            token.clone(),
        );
        // Spawn under the lock so a racing start for the same key observes
        // either nothing or a fully registered monitor, never a half state.
        let handle = tokio::spawn(worker.run());
        active.insert(key, ActiveMonitor { token, handle });
        StartResult::Started
    }

    /// Signal and remove one subscription. Returns false when the key is not
    /// registered. On success the call returns only after the worker has
    /// actually exited.
    pub async fn stop(&self, key: &SubscriptionKey) -> bool {
        let removed = {
            let mut active = self.active.lock().expect("registry mutex poisoned");
            // Cancel and remove under the same guard so a concurrent start
            // for this key cannot observe a registered-but-dying monitor.
            active.remove(key).map(|monitor| {
                monitor.token.cancel();
                monitor
            })
        };
        match removed {
            Some(monitor) => {
                let _ = monitor.handle.await;
                true
            }
            None => false,
        }
    }

    /// Signal and remove every subscription whose key matches the predicate.
    /// The matching entries are drained atomically with respect to concurrent
    /// starts; the workers are then awaited. Returns the number removed.
    pub async fn stop_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&SubscriptionKey) -> bool,
    {
        let drained: Vec<ActiveMonitor> = {
            let mut active = self.active.lock().expect("registry mutex poisoned");
            let keys: Vec<SubscriptionKey> =
                active.keys().filter(|k| predicate(k)).cloned().collect();
            keys.into_iter()
                .filter_map(|k| active.remove(&k))
                .map(|monitor| {
                    monitor.token.cancel();
                    monitor
                })
                .collect()
        };
        let count = drained.len();
        for monitor in drained {
            let _ = monitor.handle.await;
        }
        count
    }

    /// Stop every subscription reporting to the given endpoint.
    pub async fn stop_all_for(&self, endpoint: EndpointId) -> usize {
        self.stop_where(|k| k.endpoint == endpoint).await
    }

    pub fn is_active(&self, key: &SubscriptionKey) -> bool {
        self.active
            .lock()
            .expect("registry mutex poisoned")
            .contains_key(key)
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().expect("registry mutex poisoned").len()
    }
}
