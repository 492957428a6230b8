/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};

use serde_json::Number;

/// A single sub-metric value as dumped by the registry.
///
/// Counters and derived statistics are numeric. Some registries also expose
/// string valued fields (state markers and the like), which only the line
/// protocol backend can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Double(f64),
    Text(String),
}

impl FieldValue {
    pub(crate) fn display_influxdb(&self) -> DisplayInfluxdbValue<'_> {
        DisplayInfluxdbValue(self)
    }

    /// Convert to a JSON number, which is what cloud datapoints carry.
    /// Text values and non-finite doubles have no representation there.
    pub(crate) fn as_json_number(&self) -> Option<Number> {
        match self {
            FieldValue::Unsigned(u) => Some(Number::from(*u)),
            FieldValue::Signed(i) => Some(Number::from(*i)),
            FieldValue::Double(f) => Number::from_f64(*f),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Unsigned(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Signed(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            FieldValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            FieldValue::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

pub(crate) struct DisplayInfluxdbValue<'a>(&'a FieldValue);

impl fmt::Display for DisplayInfluxdbValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FieldValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            FieldValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            FieldValue::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
            FieldValue::Text(s) => {
                // string fields are double quoted, with the quote and escape
                // chars escaped as the line protocol requires
                f.write_char('"')?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => f.write_char(c)?,
                    }
                }
                f.write_char('"')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn influxdb() {
        let v = FieldValue::Unsigned(10);
        assert_eq!(v.display_influxdb().to_string(), "10");

        let v = FieldValue::Signed(-3);
        assert_eq!(v.display_influxdb().to_string(), "-3");

        let v = FieldValue::Double(1.0);
        assert_eq!(v.display_influxdb().to_string(), "1.0");

        let v = FieldValue::from("abc");
        assert_eq!(v.display_influxdb().to_string(), "\"abc\"");

        let v = FieldValue::from("say \"hi\"");
        assert_eq!(v.display_influxdb().to_string(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn json_number() {
        assert_eq!(
            FieldValue::Unsigned(5).as_json_number(),
            Some(Number::from(5u64))
        );
        assert!(FieldValue::Double(f64::NAN).as_json_number().is_none());
        assert!(FieldValue::from("abc").as_json_number().is_none());
    }
}
