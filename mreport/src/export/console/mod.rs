/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use crate::clock::{Clock, WallClock};
use crate::config::ConsoleReporterConfig;
use crate::registry::MetricsRegistry;
use crate::runtime::Reporter;

use super::influxdb::format::format_lines;

/// Prints each cycle's records to stdout, one line protocol record per
/// line. Mostly useful while wiring up a deployment.
pub struct ConsoleReporter {
    config: ConsoleReporterConfig,
    registry: Arc<dyn MetricsRegistry>,
    clock: Arc<dyn Clock>,
}

impl ConsoleReporter {
    pub fn new(config: ConsoleReporterConfig, registry: Arc<dyn MetricsRegistry>) -> Self {
        ConsoleReporter {
            config,
            registry,
            clock: Arc::new(WallClock),
        }
    }

    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }
}

impl Reporter for ConsoleReporter {
    async fn report_now(&self, timestamp: Option<i64>) {
        let timestamp = timestamp.unwrap_or_else(|| self.clock.now_epoch());
        let snapshot = self.registry.dump_metrics();
        for line in format_lines(&snapshot, &self.config.format, timestamp) {
            println!("{line}");
        }
    }
}
