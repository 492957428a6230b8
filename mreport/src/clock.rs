/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of the timestamps attached to exported records.
///
/// Injectable so tests can pin time; the scheduling cadence itself runs on
/// the tokio clock and is not affected by this.
pub trait Clock: Send + Sync {
    /// Unix timestamp in whole seconds.
    fn now_epoch(&self) -> i64;
}

#[derive(Debug, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: AtomicI64,
}

impl ManualClock {
    pub fn new(epoch: i64) -> Self {
        ManualClock {
            seconds: AtomicI64::new(epoch),
        }
    }

    pub fn set(&self, epoch: i64) {
        self.seconds.store(epoch, Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: i64) {
        self.seconds.fetch_add(seconds, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_epoch(&self) -> i64 {
        self.seconds.load(Ordering::Relaxed)
    }
}
