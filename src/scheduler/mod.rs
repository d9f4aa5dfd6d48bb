//! Tick-synchronised decision loop.
//!
//! Waits on `states/timing` until the tick number changes, then fetches the
//! snapshot once, generates orders, and submits them one by one. There is a
//! single `last_tick` value, owned by the scheduler.

use crate::engine::{DecisionEngine, Order};
use crate::transport::GameServer;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};


/// What to do when a timing poll, snapshot fetch, or halted submission fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorPolicy {
    /// Stop the loop and return the error
    Halt,
    /// Log, give up on the current tick, keep polling
    SkipTick,
}

impl Default for TransportErrorPolicy {
    fn default() -> Self {
        TransportErrorPolicy::Halt
    }
}

impl std::str::FromStr for TransportErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halt" => Ok(TransportErrorPolicy::Halt),
            "skip_tick" | "skip-tick" | "skip" => Ok(TransportErrorPolicy::SkipTick),
            other => Err(format!("unknown transport error policy: {}", other)),
        }
    }
}

/// What to do when a single order submission fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitErrorPolicy {
    /// Abort the remaining orders of the tick and report the error
    Halt,
    /// Log and carry on with the next order
    Continue,
}

impl Default for SubmitErrorPolicy {
    fn default() -> Self {
        SubmitErrorPolicy::Halt
    }
}

impl std::str::FromStr for SubmitErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halt" => Ok(SubmitErrorPolicy::Halt),
            "continue" => Ok(SubmitErrorPolicy::Continue),
            other => Err(format!("unknown submit error policy: {}", other)),
        }
    }
}

/// Error handling knobs for the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub on_transport_error: TransportErrorPolicy,
    pub on_submit_error: SubmitErrorPolicy,
    /// Pause after a skipped tick before polling again
    pub retry_delay: Duration,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            on_transport_error: TransportErrorPolicy::default(),
            on_submit_error: SubmitErrorPolicy::default(),
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Per-tick submission counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub accepted: usize,
    pub failed: usize,
}

/// Result of one [`TickScheduler::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Tick unchanged; sleep this long before the next poll
    Waiting(Duration),
    /// New tick handled
    Acted {
        tick: u64,
        orders: Vec<Order>,
        report: SubmitReport,
    },
}

pub struct TickScheduler<S> {
    server: S,
    engine: DecisionEngine,
    policy: ErrorPolicy,
    /// Last tick we acted on; `None` until the first poll
    last_tick: Option<u64>,
}

impl<S: GameServer> TickScheduler<S> {
    pub fn new(server: S, engine: DecisionEngine, policy: ErrorPolicy) -> Self {
        Self {
            server,
            engine,
            policy,
            last_tick: None,
        }
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    #[cfg(test)]
    pub(crate) fn server(&self) -> &S {
        &self.server
    }

    /// Poll timing once and act if the tick advanced.
    ///
    /// Never sleeps; [`run`](Self::run) does that with the returned duration.
    pub async fn step(&mut self) -> Result<TickOutcome> {
        let timing = self
            .server
            .fetch_timing()
            .await
            .context("Timing poll failed")?;

        if self.last_tick == Some(timing.tick) {
            let wait = timing.sleep_duration();
            debug!(tick = timing.tick, wait_ms = wait.as_millis() as u64, "Waiting for next tick");
            return Ok(TickOutcome::Waiting(wait));
        }

        // Marked before fetching so a failed tick is not retried.
        self.last_tick = Some(timing.tick);

        let state = self
            .server
            .fetch_state()
            .await
            .with_context(|| format!("Snapshot fetch failed at tick {}", timing.tick))?;

        let orders = self.engine.generate_orders(&state);
        let report = self.submit(&orders).await?;

        info!(
            tick = timing.tick,
            snapshot_tick = state.tick,
            orders = orders.len(),
            accepted = report.accepted,
            failed = report.failed,
            score = state.score(self.engine.team()),
            next_execution = ?timing.next_execution_at(),
            "Tick handled"
        );

        Ok(TickOutcome::Acted {
            tick: timing.tick,
            orders,
            report,
        })
    }

    /// Submit orders strictly in sequence.
    async fn submit(&self, orders: &[Order]) -> Result<SubmitReport> {
        let mut report = SubmitReport::default();
        for order in orders {
            match self.server.submit_order(order).await {
                Ok(()) => report.accepted += 1,
                Err(e) => match self.policy.on_submit_error {
                    SubmitErrorPolicy::Halt => return Err(e),
                    SubmitErrorPolicy::Continue => {
                        warn!(%order, error = %format!("{:#}", e), "Order failed, continuing");
                        report.failed += 1;
                    }
                },
            }
        }
        Ok(report)
    }

    /// Run forever. Returns only with an error under [`TransportErrorPolicy::Halt`].
    pub async fn run(&mut self) -> Result<()> {
        info!(
            team = %self.engine.team(),
            chaining = ?self.engine.chaining(),
            pathing = %self.engine.pathfinder_name(),
            policy = ?self.policy,
            "Decision loop started"
        );

        loop {
            match self.step().await {
                Ok(TickOutcome::Waiting(wait)) => tokio::time::sleep(wait).await,
                Ok(TickOutcome::Acted { .. }) => {}
                Err(e) => match self.policy.on_transport_error {
                    TransportErrorPolicy::Halt => return Err(e),
                    TransportErrorPolicy::SkipTick => {
                        error!(
                            error = %format!("{:#}", e),
                            last_tick = ?self.last_tick,
                            "Tick skipped"
                        );
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                },
            }
        }
    }
}
