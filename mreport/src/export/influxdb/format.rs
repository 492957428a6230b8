/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt::Write;

use log::warn;

use crate::config::FormatConfig;
use crate::error::ExportError;
use crate::types::MetricSnapshot;

/// Render a snapshot as line protocol records, one per metric key.
///
/// Keys whose embedded tags fail to decode are skipped with a warning, so
/// one malformed key never blocks the rest of the snapshot. Snapshot
/// iteration is ordered, which keeps the output deterministic.
pub(crate) fn format_lines(
    snapshot: &MetricSnapshot,
    config: &FormatConfig,
    timestamp: i64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut ts_buffer = itoa::Buffer::new();
    let ts = ts_buffer.format(timestamp);

    for (key, fields) in snapshot.iter() {
        let (base, tags) = match config.encoded_tags.decode(key) {
            Ok(decoded) => decoded,
            Err(e) => {
                let e = ExportError::TagDecode {
                    key: key.to_string(),
                    source: e,
                };
                warn!("skip metric: {e}");
                continue;
            }
        };

        let mut line = String::with_capacity(64);
        if config.prefix.is_empty() {
            line.push_str(base);
        } else {
            let _ = write!(&mut line, "{}.{base}", config.prefix);
        }
        // decoded tags come first, static tags after, per the tag grammar
        if !tags.is_empty() {
            let _ = write!(&mut line, ",{}", tags.display_influxdb());
        }
        if !config.tags.is_empty() {
            let _ = write!(&mut line, ",{}", config.tags.display_influxdb());
        }

        line.push(' ');
        let mut fields_iter = fields.iter();
        if let Some((kind, value)) = fields_iter.next() {
            let _ = write!(&mut line, "{kind}={}", value.display_influxdb());
        }
        for (kind, value) in fields_iter {
            let _ = write!(&mut line, ",{kind}={}", value.display_influxdb());
        }

        line.push(' ');
        line.push_str(ts);
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::MetricTagName;

    fn tagged_config() -> FormatConfig {
        let mut config = FormatConfig::default();
        config.prefix = "app".to_string();
        config
            .tags
            .push(
                MetricTagName::from_str("host").unwrap(),
                "localhost".parse().unwrap(),
            );
        config.encoded_tags.add_schema(
            "httpRequest",
            vec![
                MetricTagName::from_str("url").unwrap(),
                MetricTagName::from_str("status").unwrap(),
            ],
        );
        config
    }

    #[test]
    fn counter_line() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("c1", "count", 1u64);

        let lines = format_lines(&snapshot, &tagged_config(), 1234567890);
        assert_eq!(lines, vec!["app.c1,host=localhost count=1 1234567890"]);
    }

    #[test]
    fn no_prefix_no_tags() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("c1", "count", 1u64);

        let lines = format_lines(&snapshot, &FormatConfig::default(), 60);
        assert_eq!(lines, vec!["c1 count=1 60"]);
    }

    #[test]
    fn decoded_tags_before_static_tags() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("^_httpRequest_/login_200", "count", 7u64);

        let lines = format_lines(&snapshot, &tagged_config(), 100);
        assert_eq!(
            lines,
            vec!["app.httpRequest,url=/login,status=200,host=localhost count=7 100"]
        );
    }

    #[test]
    fn field_quoting() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("m1", "state", "abc");
        snapshot.record("m1", "value", 5u64);

        let lines = format_lines(&snapshot, &FormatConfig::default(), 1);
        assert_eq!(lines, vec!["m1 state=\"abc\",value=5 1"]);
    }

    #[test]
    fn bad_keys_are_skipped() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.record("^_noSchema_x", "count", 1u64);
        snapshot.record("^_httpRequest_/login", "count", 1u64);
        snapshot.record("good", "count", 2u64);

        let lines = format_lines(&snapshot, &tagged_config(), 1);
        assert_eq!(lines, vec!["app.good,host=localhost count=2 1"]);
    }

    #[test]
    fn empty_snapshot() {
        let lines = format_lines(&MetricSnapshot::default(), &tagged_config(), 1);
        assert!(lines.is_empty());
    }
}
