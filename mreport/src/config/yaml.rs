/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, yaml};

use crate::types::{MetricTagName, MetricTagSet, MetricTagValue};

pub(crate) fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

pub(crate) fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

pub(crate) fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for 'string' should be 'string', 'integer' or 'real'"
        )),
    }
}

pub(crate) fn as_u16(v: &Yaml) -> anyhow::Result<u16> {
    match v {
        Yaml::String(s) => Ok(u16::from_str(s)?),
        Yaml::Integer(i) => Ok(u16::try_from(*i)?),
        _ => Err(anyhow!(
            "yaml value type for 'u16' should be 'string' or 'integer'"
        )),
    }
}

pub(crate) fn as_bool(v: &Yaml) -> anyhow::Result<bool> {
    match v {
        Yaml::String(s) => match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(true),
            "off" | "false" | "no" | "0" => Ok(false),
            _ => Err(anyhow!("invalid yaml string value for 'bool': {s}")),
        },
        Yaml::Boolean(value) => Ok(*value),
        Yaml::Integer(i) => Ok(*i != 0),
        _ => Err(anyhow!(
            "yaml value type for 'bool' should be 'boolean', 'string' or 'integer'"
        )),
    }
}

/// Seconds, either integral or fractional.
pub(crate) fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::Integer(i) => {
            let secs = u64::try_from(*i).map_err(|_| anyhow!("negative duration"))?;
            Ok(Duration::from_secs(secs))
        }
        Yaml::Real(s) => {
            let secs = f64::from_str(s)?;
            Duration::try_from_secs_f64(secs).map_err(|e| anyhow!("invalid duration: {e}"))
        }
        _ => Err(anyhow!(
            "yaml value type for 'duration' should be 'integer' or 'real' seconds"
        )),
    }
}

pub(crate) fn as_char(v: &Yaml) -> anyhow::Result<char> {
    let s = as_string(v)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("yaml value for 'char' should be a single char string")),
    }
}

pub(crate) fn as_tag_set(v: &Yaml) -> anyhow::Result<MetricTagSet> {
    if let Yaml::Hash(map) = v {
        let mut tags = MetricTagSet::default();
        foreach_kv(map, |k, v| {
            let name = MetricTagName::from_str(k)
                .map_err(|e| anyhow!("invalid metric tag name {k}: {e}"))?;
            let value_s = as_string(v).context("invalid metric tag yaml value")?;
            let value = MetricTagValue::from_str(&value_s)
                .map_err(|e| anyhow!("invalid metric tag value {value_s}: {e}"))?;
            tags.push(name, value);
            Ok(())
        })?;
        Ok(tags)
    } else {
        Err(anyhow!("the yaml value type for 'tags' should be 'map'"))
    }
}

pub(crate) fn as_tag_names(v: &Yaml) -> anyhow::Result<Vec<MetricTagName>> {
    if let Yaml::Array(seq) = v {
        let mut names = Vec::with_capacity(seq.len());
        for v in seq {
            let s = as_string(v).context("invalid tag key name yaml value")?;
            let name = MetricTagName::from_str(&s)
                .map_err(|e| anyhow!("invalid tag key name {s}: {e}"))?;
            names.push(name);
        }
        Ok(names)
    } else {
        Err(anyhow!(
            "the yaml value type for 'tag key names' should be 'array'"
        ))
    }
}
