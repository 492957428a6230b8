/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

use super::yaml as yaml_value;
use crate::types::MetricTagSet;

#[derive(Debug, Clone)]
pub struct CloudwatchReporterConfig {
    pub reporting_interval: Duration,
    /// The namespace all datapoints are submitted under.
    pub namespace: String,
    /// Rendered as the static dimension set of every datapoint.
    pub tags: MetricTagSet,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl Default for CloudwatchReporterConfig {
    fn default() -> Self {
        CloudwatchReporterConfig {
            reporting_interval: Duration::from_secs(5),
            namespace: String::new(),
            tags: MetricTagSet::default(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: String::new(),
        }
    }
}

impl CloudwatchReporterConfig {
    pub fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut config = CloudwatchReporterConfig::default();
        yaml_value::foreach_kv(map, |k, v| config.set(&yaml_value::normalize_key(k), v))?;
        config.check()?;
        Ok(config)
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match k {
            "reporting_interval" => {
                self.reporting_interval = yaml_value::as_duration(v)?;
                Ok(())
            }
            "namespace" | "application_name" => {
                self.namespace = yaml_value::as_string(v)?;
                Ok(())
            }
            "tags" => {
                self.tags = yaml_value::as_tag_set(v)?;
                Ok(())
            }
            "access_key_id" => {
                self.access_key_id = yaml_value::as_string(v)?;
                Ok(())
            }
            "secret_access_key" => {
                self.secret_access_key = yaml_value::as_string(v)?;
                Ok(())
            }
            "region" => {
                self.region = yaml_value::as_string(v)?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }

    // Credentials carry no defaults. A config without real values is an
    // error, never something that silently reports against a test account.
    pub fn check(&self) -> anyhow::Result<()> {
        if self.namespace.is_empty() {
            return Err(anyhow!("namespace is not set"));
        }
        if self.access_key_id.is_empty() {
            return Err(anyhow!("access_key_id is not set"));
        }
        if self.secret_access_key.is_empty() {
            return Err(anyhow!("secret_access_key is not set"));
        }
        if self.region.is_empty() {
            return Err(anyhow!("region is not set"));
        }
        Ok(())
    }
}
