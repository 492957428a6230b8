/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::warn;
use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::types::{MetricSnapshot, MetricTagSet};

pub(crate) fn build_dimensions(tags: &MetricTagSet) -> Vec<Value> {
    tags.iter()
        .map(|(name, value)| {
            let mut map = Map::with_capacity(2);
            map.insert("Name".to_string(), Value::String(name.as_str().to_string()));
            map.insert(
                "Value".to_string(),
                Value::String(value.as_str().to_string()),
            );
            Value::Object(map)
        })
        .collect()
}

/// Build one datapoint per (metric key, sub-metric kind) pair.
///
/// The cloud api only carries numeric values under static dimensions, so
/// embedded tag keys pass through verbatim and non-numeric fields are
/// skipped with a warning.
pub(crate) fn build_data_points(snapshot: &MetricSnapshot, dimensions: &[Value]) -> Vec<Value> {
    let mut data_points = Vec::with_capacity(snapshot.data_point_count());
    for (key, fields) in snapshot.iter() {
        for (kind, value) in fields {
            let Some(n) = value.as_json_number() else {
                let e = ExportError::Serialization(format!(
                    "value of {key}.{kind} is not a number: {value}"
                ));
                warn!("skip data point: {e}");
                continue;
            };
            let mut map = Map::with_capacity(4);
            map.insert(
                "MetricName".to_string(),
                Value::String(format!("{key}.{kind}")),
            );
            map.insert("Dimensions".to_string(), Value::Array(dimensions.to_vec()));
            map.insert("Unit".to_string(), Value::String("None".to_string()));
            map.insert("Value".to_string(), Value::Number(n));
            data_points.push(Value::Object(map));
        }
    }
    data_points
}
