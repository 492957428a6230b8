/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod influxdb;
pub use influxdb::InfluxdbReporter;

mod cloudwatch;
pub use cloudwatch::{CloudMetricsClient, CloudwatchReporter, MAX_DATA_POINTS_PER_REQUEST};

mod console;
pub use console::ConsoleReporter;
