/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use mreport::config::{CloudwatchReporterConfig, ConsoleReporterConfig, InfluxdbReporterConfig};
use mreport::export::{CloudMetricsClient, CloudwatchReporter, ConsoleReporter, InfluxdbReporter};
use mreport::types::{MetricSnapshot, MetricTagName};
use mreport::{ExportError, ManualClock, MetricsRegistry, ReportScheduler, Reporter};

struct OneCounter;

impl MetricsRegistry for OneCounter {
    fn dump_metrics(&self) -> MetricSnapshot {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("c1", "count", 1u64);
        snapshot
    }
}

#[derive(Default, Clone)]
struct CapturingClient {
    calls: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl CloudMetricsClient for CapturingClient {
    async fn put_metric_data(
        &self,
        namespace: &str,
        data: &[Value],
    ) -> Result<(), ExportError> {
        self.calls
            .lock()
            .unwrap()
            .push((namespace.to_string(), data.to_vec()));
        Ok(())
    }
}

fn cloud_config() -> CloudwatchReporterConfig {
    let mut config = CloudwatchReporterConfig::default();
    config.namespace = "app".to_string();
    config.access_key_id = "AKIDEXAMPLE".to_string();
    config.secret_access_key = "wJalrXUtnFEMI".to_string();
    config.region = "local".to_string();
    config.tags.push(
        MetricTagName::from_str("host").unwrap(),
        "localhost".parse().unwrap(),
    );
    config
}

/// Accept one connection, read one http request, reply 204 and hand the
/// request body back.
async fn capture_one_request(listener: TcpListener) -> String {
    let (mut stream, _) = listener.accept().await.unwrap();
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let body_len = head
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + body_len {
            let _ = stream
                .write_all(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n")
                .await;
            let _ = stream.shutdown().await;
            return String::from_utf8_lossy(&buf[head_end + 4..head_end + 4 + body_len])
                .to_string();
        }
    }
    String::new()
}

#[tokio::test]
async fn influxdb_line_for_one_counter() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(capture_one_request(listener));

    let mut config = InfluxdbReporterConfig::default();
    config.port = port;
    config.format.prefix = "app".to_string();
    config.format.tags.push(
        MetricTagName::from_str("host").unwrap(),
        "localhost".parse().unwrap(),
    );

    let reporter = InfluxdbReporter::new(config, Arc::new(OneCounter)).unwrap();
    reporter.report_now(Some(1234567890)).await;

    let body = server.await.unwrap();
    assert_eq!(body, "app.c1,host=localhost count=1 1234567890");
}

#[tokio::test]
async fn cloud_datapoint_for_one_counter() {
    let client = CapturingClient::default();
    let reporter =
        CloudwatchReporter::new(cloud_config(), Arc::new(OneCounter), client.clone()).unwrap();

    reporter.report_now(None).await;

    let calls = client.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (namespace, data) = &calls[0];
    assert_eq!(namespace, "app");
    assert_eq!(data.len(), 1);
    assert_eq!(
        data[0],
        json!({
            "MetricName": "c1.count",
            "Dimensions": [{"Name": "host", "Value": "localhost"}],
            "Unit": "None",
            "Value": 1
        })
    );
}

#[tokio::test]
async fn console_reporter_runs() {
    let mut config = ConsoleReporterConfig::default();
    config.format.prefix = "app".to_string();
    let mut reporter = ConsoleReporter::new(config, Arc::new(OneCounter));
    reporter.set_clock(Arc::new(ManualClock::new(1234567890)));

    // renders to stdout through the same line formatter as the influxdb
    // reporter; nothing to assert beyond a clean cycle
    reporter.report_now(None).await;
}

#[tokio::test(start_paused = true)]
async fn scheduled_cloud_export() {
    let client = CapturingClient::default();
    let reporter =
        CloudwatchReporter::new(cloud_config(), Arc::new(OneCounter), client.clone()).unwrap();

    let mut scheduler = ReportScheduler::new(Arc::new(reporter), Duration::from_secs(1));
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(3500)).await;
    scheduler.stop();
    tokio::task::yield_now().await;

    let seen = client.calls.lock().unwrap().len();
    assert!(seen >= 3, "saw {seen} report cycles");

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(client.calls.lock().unwrap().len(), seen);
}
