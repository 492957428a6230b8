/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use crate::types::ParseError;

/// Why the embedded tags of a metric key failed to decode.
#[derive(Debug, Error)]
pub enum TagDecodeError {
    #[error("no tag schema configured for base metric {0}")]
    UnknownSchema(String),
    #[error("expect {expected} tag values, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("invalid tag value {0}: {1}")]
    InvalidTagValue(String, ParseError),
}

/// Classified failure of one formatting or transport step.
///
/// None of these ever escape a report cycle. They exist so the tick handler
/// can log what went wrong and so tests can assert on the failure mode.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("backend {backend} unavailable: {reason}")]
    TransportUnavailable { backend: String, reason: String },
    #[error("invalid encoded tags in metric key {key}: {source}")]
    TagDecode {
        key: String,
        #[source]
        source: TagDecodeError,
    },
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("{0}")]
    Unclassified(String),
}

impl ExportError {
    pub(crate) fn transport(backend: impl Into<String>, reason: impl ToString) -> Self {
        ExportError::TransportUnavailable {
            backend: backend.into(),
            reason: reason.to_string(),
        }
    }
}
