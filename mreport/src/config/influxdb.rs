/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use http::uri::PathAndQuery;
use yaml_rust::{Yaml, yaml};

use super::FormatConfig;
use super::yaml as yaml_value;

const DEFAULT_SERVER: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8086;
const DEFAULT_DATABASE: &str = "metrics";
const DEFAULT_PROTOCOL: &str = "http";

#[derive(Debug, Clone)]
pub struct InfluxdbReporterConfig {
    pub reporting_interval: Duration,
    pub format: FormatConfig,
    pub database: String,
    pub server: String,
    pub port: u16,
    pub protocol: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub autocreate_database: bool,
}

impl Default for InfluxdbReporterConfig {
    fn default() -> Self {
        InfluxdbReporterConfig {
            reporting_interval: Duration::from_secs(5),
            format: FormatConfig::default(),
            database: DEFAULT_DATABASE.to_string(),
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            protocol: DEFAULT_PROTOCOL.to_string(),
            username: None,
            password: None,
            autocreate_database: false,
        }
    }
}

impl InfluxdbReporterConfig {
    pub fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut config = InfluxdbReporterConfig::default();
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
            "database" | "db" => {
                self.database = yaml_value::as_string(v)?;
                Ok(())
            }
            "server" | "host" => {
                self.server = yaml_value::as_string(v)?;
                Ok(())
            }
            "port" => {
                self.port = yaml_value::as_u16(v)?;
                Ok(())
            }
            "protocol" => {
                self.protocol = yaml_value::as_string(v)?;
                Ok(())
            }
            "username" => {
                self.username = Some(yaml_value::as_string(v)?);
                Ok(())
            }
            "password" => {
                self.password = Some(yaml_value::as_string(v)?);
                Ok(())
            }
            "autocreate_database" => {
                self.autocreate_database = yaml_value::as_bool(v)?;
                Ok(())
            }
            _ => self.format.set_by_yaml_kv(k, v),
        }
    }

    pub fn check(&self) -> anyhow::Result<()> {
        if self.database.is_empty() {
            return Err(anyhow!("database is not set"));
        }
        if self.server.is_empty() {
            return Err(anyhow!("server is not set"));
        }
        if self.protocol != "http" && self.protocol != "https" {
            return Err(anyhow!("unsupported protocol {}", self.protocol));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(anyhow!("password is set without username"));
        }
        Ok(())
    }

    pub(crate) fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.server, self.port)
    }

    pub(crate) fn build_write_path(&self) -> anyhow::Result<PathAndQuery> {
        let path = format!("/write?db={}&precision=s", self.database);
        PathAndQuery::from_str(&path).map_err(|e| anyhow!("invalid write api path {path}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn parse_str(content: &str) -> anyhow::Result<InfluxdbReporterConfig> {
        let mut docs = YamlLoader::load_from_str(content).unwrap();
        let doc = docs.pop().unwrap();
        InfluxdbReporterConfig::parse(doc.as_hash().unwrap())
    }

    #[test]
    fn defaults() {
        let config = InfluxdbReporterConfig::default();
        assert_eq!(config.reporting_interval, Duration::from_secs(5));
        assert_eq!(config.database, "metrics");
        assert_eq!(config.base_url(), "http://127.0.0.1:8086");
        assert_eq!(
            config.build_write_path().unwrap().as_str(),
            "/write?db=metrics&precision=s"
        );
        assert!(!config.autocreate_database);
    }

    #[test]
    fn full_surface() {
        let config = parse_str(
            r#"
server: influx.internal
port: 8087
protocol: https
database: app_metrics
username: writer
password: secret
autocreate_database: true
reporting_interval: 10
prefix: app
tags:
  host: localhost
metrics_tag_keys:
  httpRequest:
    - url
    - status
metrics_tag_keys_prefix: "^"
metrics_tag_split: "_"
"#,
        )
        .unwrap();
        assert_eq!(config.server, "influx.internal");
        assert_eq!(config.port, 8087);
        assert_eq!(config.base_url(), "https://influx.internal:8087");
        assert_eq!(config.reporting_interval, Duration::from_secs(10));
        assert_eq!(config.format.prefix, "app");
        assert_eq!(config.format.tags.get("host").unwrap().as_str(), "localhost");
        let (base, tags) = config
            .format
            .encoded_tags
            .decode("^_httpRequest_/login_200")
            .unwrap();
        assert_eq!(base, "httpRequest");
        assert_eq!(tags.len(), 2);
        assert!(config.autocreate_database);
    }

    #[test]
    fn invalid() {
        assert!(parse_str("unknown_key: 1").is_err());
        assert!(parse_str("database: ''").is_err());
        assert!(parse_str("protocol: udp").is_err());
        assert!(parse_str("password: secret").is_err());
    }
}
