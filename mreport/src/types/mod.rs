/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod value;
pub use value::FieldValue;

mod tag;
pub use tag::{MetricTagName, MetricTagSet, MetricTagValue, ParseError};

mod encoded;
pub use encoded::EncodedTagConfig;

mod snapshot;
pub use snapshot::MetricSnapshot;
