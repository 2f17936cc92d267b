use std::sync::Arc;
use std::time::Duration;

use antenna_core::{CommandOutput, InvocationId, ServiceConfig};
use antenna_process::{CommandRunner, Result};
use dashmap::{mapref::entry::Entry, DashMap};
use tokio::time::Instant;
use tracing::{error, info, info_span, Instrument, Span};

use crate::types::PendingInvocation;

/// Core scheduler: runs, detaches or debounces service invocations.
///
/// At most one delayed invocation per service name is pending at any time.
/// Immediate and detached runs are not tracked, so they may overlap with a
/// delayed run of the same service.
pub struct Scheduler {
    runner: Arc<dyn CommandRunner>,
    /// Service name → pending delayed run. Inserted by `schedule`, removed by
    /// the timer task when it fires.
    pending: Arc<DashMap<String, PendingInvocation>>,
}

impl Scheduler {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Schedule one invocation of service `name` with `payload`.
    ///
    /// Returns `Ok(Some(results))` only when the commands ran to completion
    /// inside this call. `Ok(None)` means the run was detached, deferred, or
    /// dropped because a deferred run is already pending.
    ///
    /// # Errors
    ///
    /// Only the synchronous branch (no delay, not async) propagates an
    /// execution error. Every other branch logs it.
    pub async fn schedule(
        &self,
        name: &str,
        service: Arc<ServiceConfig>,
        payload: String,
    ) -> Result<Option<Vec<CommandOutput>>> {
        if self.pending.contains_key(name) {
            info!(service = %name, "Ignoring schedule for {name} (timeout already existing)");
            return Ok(None);
        }

        let id = InvocationId::new();
        let span = info_span!("invocation", service = %name, id = %id);

        match service.delay() {
            None if service.run_async => {
                info!(service = %name, invocation = %id, "Executing {name} (async)");
                let runner = Arc::clone(&self.runner);
                let name = name.to_string();
                tokio::spawn(
                    async move {
                        if let Err(e) = runner.run(&name, &service, &payload).await {
                            error!(error = %e, "async run of {name} failed");
                        }
                    }
                    .instrument(span),
                );
                Ok(None)
            }
            None => {
                info!(service = %name, invocation = %id, "Executing {name} (no delay)");
                let results = self
                    .runner
                    .run(name, &service, &payload)
                    .instrument(span)
                    .await?;
                Ok(Some(results))
            }
            Some(delay) => {
                self.arm(name, id, service, payload, delay, span);
                Ok(None)
            }
        }
    }

    /// Whether a delayed run of `name` is waiting for its timer.
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    /// Number of delayed runs waiting across all services.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    // --- private helpers ---------------------------------------------------

    /// Register a pending invocation and start its timer.
    ///
    /// Check and insert happen under the same entry lock, so two concurrent
    /// requests cannot both arm a timer for the same service.
    fn arm(
        &self,
        name: &str,
        id: InvocationId,
        service: Arc<ServiceConfig>,
        payload: String,
        delay: Duration,
        span: Span,
    ) {
        match self.pending.entry(name.to_string()) {
            Entry::Occupied(_) => {
                info!(service = %name, "Ignoring schedule for {name} (timeout already existing)");
            }
            Entry::Vacant(slot) => {
                let pending = Arc::clone(&self.pending);
                let runner = Arc::clone(&self.runner);
                let key = name.to_string();

                let timer = tokio::spawn(
                    async move {
                        tokio::time::sleep(delay).await;
                        fire(pending, runner, key).await;
                    }
                    .instrument(span),
                );

                slot.insert(PendingInvocation {
                    id: id.clone(),
                    service,
                    payload,
                    armed_at: Instant::now(),
                    timer,
                });

                info!(
                    service = %name,
                    invocation = %id,
                    "Executing {name} (delayed by {} seconds)",
                    delay.as_secs_f64()
                );
            }
        }
    }
}

/// Timer callback: take the pending entry out of the table, then run it.
/// Nobody is waiting on the outcome, so failures end up in the log.
async fn fire(
    pending: Arc<DashMap<String, PendingInvocation>>,
    runner: Arc<dyn CommandRunner>,
    name: String,
) {
    let Some((_, invocation)) = pending.remove(&name) else {
        error!("Error: could not launch service {name}");
        return;
    };

    let PendingInvocation {
        service,
        payload,
        armed_at,
        ..
    } = invocation;

    info!(
        waited_ms = armed_at.elapsed().as_millis() as u64,
        "delay elapsed, launching {name}"
    );

    if let Err(e) = runner.run(&name, &service, &payload).await {
        error!(error = %e, "delayed run of {name} failed");
    }
}
