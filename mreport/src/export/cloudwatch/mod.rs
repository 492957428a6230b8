/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::config::CloudwatchReporterConfig;
use crate::error::ExportError;
use crate::registry::MetricsRegistry;
use crate::runtime::Reporter;

mod format;
use format::{build_data_points, build_dimensions};

/// Hard limit of the cloud api: datapoints accepted per request.
pub const MAX_DATA_POINTS_PER_REQUEST: usize = 20;

/// The concrete cloud monitoring client, e.g. an sdk wrapper.
///
/// The reporter never hands a call more than
/// [`MAX_DATA_POINTS_PER_REQUEST`] datapoints.
pub trait CloudMetricsClient: Send + Sync + 'static {
    fn put_metric_data(
        &self,
        namespace: &str,
        data: &[Value],
    ) -> impl Future<Output = Result<(), ExportError>> + Send;
}

/// Push reporter for a CloudWatch style monitoring api.
///
/// The full datapoint list of one cycle is delivered as consecutive chunks;
/// a chunk that fails is dropped and the remaining chunks are still tried.
pub struct CloudwatchReporter<C: CloudMetricsClient> {
    config: CloudwatchReporterConfig,
    registry: Arc<dyn MetricsRegistry>,
    client: C,
    dimensions: Vec<Value>,
}

impl<C: CloudMetricsClient> CloudwatchReporter<C> {
    pub fn new(
        config: CloudwatchReporterConfig,
        registry: Arc<dyn MetricsRegistry>,
        client: C,
    ) -> anyhow::Result<Self> {
        config.check()?;
        let dimensions = build_dimensions(&config.tags);
        Ok(CloudwatchReporter {
            config,
            registry,
            client,
            dimensions,
        })
    }

    /// Run one export cycle against an explicit registry.
    pub async fn report_registry(&self, registry: &dyn MetricsRegistry) {
        let snapshot = registry.dump_metrics();
        let data = build_data_points(&snapshot, &self.dimensions);
        if data.is_empty() {
            return;
        }
        let delivered = self.deliver(&data).await;
        debug!(
            "delivered {delivered}/{} data points to namespace {}",
            data.len(),
            self.config.namespace
        );
    }

    /// Deliver datapoints in bounded chunks, returning how many went out.
    async fn deliver(&self, data: &[Value]) -> usize {
        let mut delivered = 0;
        for chunk in data.chunks(MAX_DATA_POINTS_PER_REQUEST) {
            match self
                .client
                .put_metric_data(&self.config.namespace, chunk)
                .await
            {
                Ok(()) => delivered += chunk.len(),
                Err(e) => {
                    warn!(
                        "cannot write {} data points to namespace {}: {e}",
                        chunk.len(),
                        self.config.namespace
                    );
                }
            }
        }
        delivered
    }
}

impl<C: CloudMetricsClient> Reporter for CloudwatchReporter<C> {
    async fn report_now(&self, _timestamp: Option<i64>) {
        // datapoints carry no explicit timestamp, the backend assigns
        // arrival time
        self.report_registry(self.registry.as_ref()).await
    }
}
