//! One-second cadence driver for a session's task timer.

use crate::worklog::domain::TaskTimer;
use mockable::Clock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives [`TaskTimer::tick`] on a fixed one-second period for the lifetime
/// of an active viewing session.
///
/// `start` and `stop` are idempotent so that session re-entry never
/// accumulates duplicate tickers. Dropping the ticker stops it.
pub struct SessionTicker<C>
where
    C: Clock + Send + Sync + 'static,
{
    timer: Arc<Mutex<TaskTimer>>,
    clock: Arc<C>,
    handle: Option<JoinHandle<()>>,
}

impl<C> SessionTicker<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a stopped ticker over the session's shared timer.
    #[must_use]
    pub const fn new(timer: Arc<Mutex<TaskTimer>>, clock: Arc<C>) -> Self {
        Self {
            timer,
            clock,
            handle: None,
        }
    }

    /// Returns whether the cadence task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Starts the cadence task. No-op when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let timer = Arc::clone(&self.timer);
        let clock = Arc::clone(&self.clock);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately; folding
            // elapsed time early is harmless.
            loop {
                interval.tick().await;
                if let Ok(mut guard) = timer.lock() {
                    guard.tick(&*clock);
                }
            }
        }));
    }

    /// Stops the cadence task. No-op when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl<C> Drop for SessionTicker<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}
