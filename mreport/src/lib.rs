/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

//! Periodic export of an in-process metric registry to time series
//! backends.
//!
//! A [`Reporter`] turns one registry snapshot into backend records and
//! delivers them best effort; a [`ReportScheduler`] drives a reporter once
//! per interval on a background task. Shipped reporters cover an InfluxDB
//! v1 write api, a CloudWatch style monitoring api and stdout.

pub mod config;
pub mod export;
pub mod runtime;
pub mod types;

mod clock;
pub use clock::{Clock, ManualClock, WallClock};

mod error;
pub use error::{ExportError, TagDecodeError};

mod registry;
pub use registry::MetricsRegistry;

pub use runtime::{ReportScheduler, Reporter};
