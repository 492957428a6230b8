/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use yaml_rust::{Yaml, yaml};

use super::FormatConfig;
use super::yaml as yaml_value;

#[derive(Debug, Clone)]
pub struct ConsoleReporterConfig {
    pub reporting_interval: Duration,
    pub format: FormatConfig,
}

impl Default for ConsoleReporterConfig {
    fn default() -> Self {
        ConsoleReporterConfig {
            reporting_interval: Duration::from_secs(5),
            format: FormatConfig::default(),
        }
    }
}

impl ConsoleReporterConfig {
    pub fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut config = ConsoleReporterConfig::default();
        yaml_value::foreach_kv(map, |k, v| config.set(&yaml_value::normalize_key(k), v))?;
        Ok(config)
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match k {
            "reporting_interval" => {
                self.reporting_interval = yaml_value::as_duration(v)?;
                Ok(())
            }
            _ => self.format.set_by_yaml_kv(k, v),
        }
    }
}
