/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::anyhow;
use yaml_rust::Yaml;

use super::yaml as yaml_value;
use crate::types::{EncodedTagConfig, MetricTagSet};

/// How snapshot entries are turned into measurement lines: the measurement
/// prefix, the static tags applied to every record, and the embedded tag
/// schema for dynamic per-datapoint dimensions.
#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub prefix: String,
    pub tags: MetricTagSet,
    pub encoded_tags: EncodedTagConfig,
}

impl FormatConfig {
    pub(crate) fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match k {
            "prefix" => {
                self.prefix = yaml_value::as_string(v)?;
                Ok(())
            }
            "tags" => {
                self.tags = yaml_value::as_tag_set(v)?;
                Ok(())
            }
            "metrics_tag_keys" => {
                let Yaml::Hash(map) = v else {
                    return Err(anyhow!(
                        "the yaml value type for 'metrics_tag_keys' should be 'map'"
                    ));
                };
                yaml_value::foreach_kv(map, |base, v| {
                    let tag_keys = yaml_value::as_tag_names(v)?;
                    self.encoded_tags.add_schema(base, tag_keys);
                    Ok(())
                })
            }
            "metrics_tag_keys_prefix" => {
                self.encoded_tags.set_prefix_char(yaml_value::as_char(v)?);
                Ok(())
            }
            "metrics_tag_split" => {
                self.encoded_tags.set_split_char(yaml_value::as_char(v)?);
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }
}
