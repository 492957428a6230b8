/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod yaml;

mod format;
pub use format::FormatConfig;

mod influxdb;
pub use influxdb::InfluxdbReporterConfig;

mod cloudwatch;
pub use cloudwatch::CloudwatchReporterConfig;

mod console;
pub use console::ConsoleReporterConfig;
