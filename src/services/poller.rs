//! Per-sensor poll scheduling
//!
//! One task per sensor on a fixed interval, so an unreachable controller
//! path stalls only its own sensor. Read-path failures are logged and the
//! previous reading stays in place; a sensor that has never succeeded
//! simply remains absent.

use crate::entity::EtaSensor;
use crate::services::value_resolution::ValueResolver;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Per-sensor minimum-interval guard.
///
/// Fetches requested inside the window are skipped and the previous
/// reading served instead.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_effective: Option<Instant>,
}

impl Throttle {
    /// Create a guard with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_effective: None,
        }
    }

    /// Whether a fetch at `now` is outside the minimum window. Records
    /// `now` as the last effective fetch when it is.
    pub fn acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_effective {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_effective = Some(now);
        true
    }
}

/// Run one poll cycle for a sensor. Failures never propagate: the
/// previous reading is retained and the error logged.
pub async fn poll_sensor(resolver: &ValueResolver, sensor: &EtaSensor) {
    let name = sensor.descriptor().name.clone();

    match resolver.resolve(sensor.descriptor()).await {
        Ok(reading) => {
            let previous = sensor.reading().await;
            if previous.state != reading.state {
                info!(sensor = %name, state = ?reading.state, "state changed");
            } else {
                debug!(sensor = %name, state = ?reading.state, "state unchanged");
            }
            sensor.store(reading).await;
        }
        Err(e) if e.is_read_path() => {
            warn!(sensor = %name, "update failed, keeping last reading: {e}");
        }
        Err(e) => {
            error!(sensor = %name, "unexpected error during update: {e}");
        }
    }
}

/// Spawns and owns the per-sensor polling tasks
pub struct PollScheduler {
    resolver: Arc<ValueResolver>,
    period: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl PollScheduler {
    /// Create a scheduler polling each sensor at `period`
    pub fn new(resolver: Arc<ValueResolver>, period: Duration) -> Self {
        Self {
            resolver,
            period,
            handles: Vec::new(),
        }
    }

    /// Spawn the polling task for one sensor. The first tick fires
    /// immediately, so sensors come up with a reading right after start.
    pub fn spawn(&mut self, sensor: Arc<EtaSensor>) {
        let resolver = Arc::clone(&self.resolver);
        let period = self.period;

        self.handles.push(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut throttle = Throttle::new(period);

            loop {
                let tick_at = ticker.tick().await;
                if !throttle.acquire(tick_at) {
                    debug!(
                        sensor = %sensor.descriptor().name,
                        "within minimum update interval, serving previous reading"
                    );
                    continue;
                }
                poll_sensor(&resolver, &sensor).await;
            }
        }));
    }

    /// Number of running polling tasks
    pub fn active_tasks(&self) -> usize {
        self.handles.len()
    }

    /// Abort all polling tasks
    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}
