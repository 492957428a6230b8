/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One export cycle: dump the registry, format, deliver.
///
/// Implementations contain every failure of their own cycle; a cycle that
/// goes wrong logs and returns, it never takes the schedule down with it.
/// `report_now` stays directly callable for manual flushes, whether or not
/// a scheduler is driving the reporter.
pub trait Reporter: Send + Sync + 'static {
    fn report_now(&self, timestamp: Option<i64>) -> impl Future<Output = ()> + Send;
}

/// Drives a reporter once per interval on a background task.
///
/// Ticks run strictly one after another. A cycle that overruns the interval
/// causes the overdue ticks to be skipped rather than queued, so a slow
/// backend can never pile up concurrent cycles.
pub struct ReportScheduler<R: Reporter> {
    reporter: Arc<R>,
    interval: Duration,
    running: Option<RunningLoop>,
}

struct RunningLoop {
    stop_sender: watch::Sender<bool>,
    _handle: JoinHandle<()>,
}

impl<R: Reporter> ReportScheduler<R> {
    pub fn new(reporter: Arc<R>, interval: Duration) -> Self {
        ReportScheduler {
            reporter,
            interval,
            running: None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start the periodic loop. A no-op while already running.
    ///
    /// The first cycle runs one full interval after start, not immediately.
    pub fn start(&mut self) {
        if self.running.is_some() {
            return;
        }

        let reporter = self.reporter.clone();
        let interval = self.interval;
        let (stop_sender, mut stop_receiver) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick of a fresh interval completes at once
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;

                    _ = stop_receiver.changed() => {
                        return;
                    }
                    _ = ticker.tick() => {
                        reporter.report_now(None).await;
                    }
                }
            }
        });
        self.running = Some(RunningLoop {
            stop_sender,
            _handle: handle,
        });
    }

    /// Stop the periodic loop. A no-op while already stopped.
    ///
    /// No further cycle will start; a cycle already in flight is left to
    /// finish on its own.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.stop_sender.send(true);
        }
    }
}
