/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use log::warn;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header;

use crate::clock::{Clock, WallClock};
use crate::config::InfluxdbReporterConfig;
use crate::error::ExportError;
use crate::registry::MetricsRegistry;
use crate::runtime::Reporter;

pub(super) mod format;
use format::format_lines;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.');

/// Push reporter for the InfluxDB v1 write api.
///
/// Each report cycle dumps the registry once, renders all records as line
/// protocol and delivers them in a single POST. Delivery is best effort:
/// a failed cycle drops that cycle's lines and the next cycle starts fresh.
pub struct InfluxdbReporter {
    config: InfluxdbReporterConfig,
    registry: Arc<dyn MetricsRegistry>,
    clock: Arc<dyn Clock>,
    client: reqwest::Client,
    write_url: String,
    did_create_database: AtomicBool,
}

impl InfluxdbReporter {
    pub fn new(
        config: InfluxdbReporterConfig,
        registry: Arc<dyn MetricsRegistry>,
    ) -> anyhow::Result<Self> {
        config.check()?;
        let write_path = config.build_write_path()?;
        let write_url = format!("{}{}", config.base_url(), write_path);
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("failed to build http client: {e}"))?;
        Ok(InfluxdbReporter {
            config,
            registry,
            clock: Arc::new(WallClock),
            client,
            write_url,
            did_create_database: AtomicBool::new(false),
        })
    }

    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    /// Run one export cycle against an explicit registry.
    pub async fn report_registry(
        &self,
        registry: &dyn MetricsRegistry,
        timestamp: Option<i64>,
    ) {
        if self.config.autocreate_database && !self.did_create_database.load(Ordering::Relaxed) {
            if let Err(e) = self.create_database().await {
                warn!(
                    "cannot create database {} on {}: {e}",
                    self.config.database, self.config.server
                );
            }
        }

        let timestamp = timestamp.unwrap_or_else(|| self.clock.now_epoch());
        let snapshot = registry.dump_metrics();
        let lines = format_lines(&snapshot, &self.config.format, timestamp);
        if lines.is_empty() {
            return;
        }

        if let Err(e) = self.write_lines(lines.join("\n")).await {
            warn!("cannot write to {}: {e}", self.config.server);
        }
    }

    async fn create_database(&self) -> Result<(), ExportError> {
        let q = format!("CREATE DATABASE {}", self.config.database);
        let url = format!(
            "{}/query?q={}",
            self.config.base_url(),
            utf8_percent_encode(&q, QUERY_ENCODE)
        );
        let mut req = self.client.get(url);
        if let Some(username) = &self.config.username {
            req = req.basic_auth(username, self.config.password.as_deref());
        }
        let rsp = req
            .send()
            .await
            .map_err(|e| ExportError::transport(&self.config.server, e))?;
        if !rsp.status().is_success() {
            return Err(ExportError::transport(
                &self.config.server,
                format!("error response: {}", rsp.status()),
            ));
        }
        // only mark created after an actual success response
        self.did_create_database.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn write_lines(&self, body: String) -> Result<(), ExportError> {
        let mut req = self
            .client
            .post(&self.write_url)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body);
        if let Some(username) = &self.config.username {
            req = req.basic_auth(username, self.config.password.as_deref());
        }
        let rsp = req
            .send()
            .await
            .map_err(|e| ExportError::transport(&self.config.server, e))?;
        if !rsp.status().is_success() {
            return Err(ExportError::transport(
                &self.config.server,
                format!("error response: {}", rsp.status()),
            ));
        }
        Ok(())
    }
}

impl Reporter for InfluxdbReporter {
    async fn report_now(&self, timestamp: Option<i64>) {
        self.report_registry(self.registry.as_ref(), timestamp).await
    }
}
