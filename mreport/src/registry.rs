/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::types::MetricSnapshot;

/// The in-process metric registry a reporter drains.
///
/// The registry itself lives outside this crate. Each report cycle calls
/// `dump_metrics` exactly once and treats the returned snapshot as a
/// self-consistent point in time copy it exclusively owns.
pub trait MetricsRegistry: Send + Sync {
    fn dump_metrics(&self) -> MetricSnapshot;
}
