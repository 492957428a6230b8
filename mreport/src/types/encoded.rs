/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use ahash::AHashMap;

use super::{MetricTagName, MetricTagSet, MetricTagValue};
use crate::error::TagDecodeError;

const DEFAULT_PREFIX_CHAR: char = '^';
const DEFAULT_SPLIT_CHAR: char = '_';

/// The embedded tag convention for flat string metric keys.
///
/// A registry that only supports flat string keys can still attach dynamic
/// dimensions to a metric by encoding them into the key itself:
/// `^_httpRequest_/login_200` is the metric `httpRequest` with two tag
/// values. The schema table maps each base metric name to the ordered tag
/// key names the encoded segments stand for.
#[derive(Debug, Clone)]
pub struct EncodedTagConfig {
    prefix_char: char,
    split_char: char,
    schema: AHashMap<String, Vec<MetricTagName>>,
}

impl Default for EncodedTagConfig {
    fn default() -> Self {
        EncodedTagConfig {
            prefix_char: DEFAULT_PREFIX_CHAR,
            split_char: DEFAULT_SPLIT_CHAR,
            schema: AHashMap::default(),
        }
    }
}

impl EncodedTagConfig {
    pub fn set_prefix_char(&mut self, c: char) {
        self.prefix_char = c;
    }

    pub fn set_split_char(&mut self, c: char) {
        self.split_char = c;
    }

    pub fn add_schema(&mut self, base: impl Into<String>, tag_keys: Vec<MetricTagName>) {
        self.schema.insert(base.into(), tag_keys);
    }

    /// Decode a metric key into its base name and embedded tags.
    ///
    /// A key that does not start with the prefix and split chars carries no
    /// embedded tags and decodes to itself. Segment *i* of an encoded key
    /// pairs with configured tag key *i*.
    pub fn decode<'a>(&self, key: &'a str) -> Result<(&'a str, MetricTagSet), TagDecodeError> {
        let mut chars = key.chars();
        if chars.next() != Some(self.prefix_char) || chars.next() != Some(self.split_char) {
            return Ok((key, MetricTagSet::default()));
        }

        let mut segments = chars.as_str().split(self.split_char);
        let base = segments.next().unwrap_or_default();
        let Some(tag_keys) = self.schema.get(base) else {
            return Err(TagDecodeError::UnknownSchema(base.to_string()));
        };

        let values: Vec<&str> = segments.collect();
        if values.len() != tag_keys.len() {
            return Err(TagDecodeError::ArityMismatch {
                expected: tag_keys.len(),
                found: values.len(),
            });
        }

        let mut tags = MetricTagSet::default();
        for (name, value) in tag_keys.iter().zip(values) {
            let value = MetricTagValue::from_str(value)
                .map_err(|e| TagDecodeError::InvalidTagValue(value.to_string(), e))?;
            tags.push(name.clone(), value);
        }
        Ok((base, tags))
    }
}
