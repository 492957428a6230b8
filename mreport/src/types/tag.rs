/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid graphic char: {0}")]
    InvalidGraphic(char),
    #[error("not alpha numeric char")]
    NotAlphaNumeric,
}

fn chars_allowed_in_opentsdb(s: &str) -> Result<(), ParseError> {
    for c in s.chars() {
        // Same character range as OpenTSDB
        // http://opentsdb.net/docs/build/html/user_guide/writing/index.html#metrics-and-tags
        if c.is_ascii() {
            match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '/' => {}
                _ => {
                    return if c.is_ascii_graphic() {
                        Err(ParseError::InvalidGraphic(c))
                    } else {
                        Err(ParseError::NotAlphaNumeric)
                    };
                }
            }
        } else if !c.is_alphanumeric() {
            return Err(ParseError::NotAlphaNumeric);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct MetricTagName(String);

impl MetricTagName {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for MetricTagName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chars_allowed_in_opentsdb(s)?;
        Ok(MetricTagName(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTagValue(String);

impl MetricTagValue {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for MetricTagValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chars_allowed_in_opentsdb(s)?;
        Ok(MetricTagValue(s.to_string()))
    }
}

/// An ordered set of tag key value pairs.
///
/// Insertion order is preserved, so static tags render in the order they
/// were configured and decoded tags render in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricTagSet {
    inner: Vec<(MetricTagName, MetricTagValue)>,
}

impl MetricTagSet {
    pub fn push(&mut self, name: MetricTagName, value: MetricTagValue) {
        if let Some(kv) = self.inner.iter_mut().find(|(n, _)| n.eq(&name)) {
            kv.1 = value;
        } else {
            self.inner.push((name, value));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MetricTagValue> {
        self.inner
            .iter()
            .find_map(|(n, v)| if n.as_str() == name { Some(v) } else { None })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricTagName, &MetricTagValue)> {
        self.inner.iter().map(|(n, v)| (n, v))
    }

    pub(crate) fn display_influxdb(&self) -> DisplayInfluxdbTags<'_> {
        DisplayInfluxdbTags(self)
    }
}

pub(crate) struct DisplayInfluxdbTags<'a>(&'a MetricTagSet);

impl fmt::Display for DisplayInfluxdbTags<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.inner.iter();
        let Some((name, value)) = iter.next() else {
            return Ok(());
        };
        write!(f, "{}={}", name.as_str(), value.as_str())?;
        for (name, value) in iter {
            write!(f, ",{}={}", name.as_str(), value.as_str())?;
        }
        Ok(())
    }
}
