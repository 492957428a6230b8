/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;

use super::FieldValue;

/// A point in time copy of all registered metrics.
///
/// Maps metric key to sub-metric kind ("count", "mean", ...) to value.
/// Both levels are ordered so one snapshot always formats the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSnapshot {
    inner: BTreeMap<String, BTreeMap<String, FieldValue>>,
}

impl MetricSnapshot {
    pub fn record(
        &mut self,
        key: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<FieldValue>,
    ) {
        self.inner
            .entry(key.into())
            .or_default()
            .insert(kind.into(), value.into());
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of (metric key, sub-metric kind) pairs.
    pub fn data_point_count(&self) -> usize {
        self.inner.values().map(|fields| fields.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, FieldValue>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}
