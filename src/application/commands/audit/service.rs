// src/application/commands/audit/service.rs
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

use crate::{
    application::{ports::time::Clock, snapshot::SnapshotSerializer},
    domain::audit::AuditEventRepository,
};

pub struct AuditRecorder {
    pub(super) repo: Arc<dyn AuditEventRepository>,
    pub(super) serializer: Arc<SnapshotSerializer>,
    clock: Arc<dyn Clock>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl AuditRecorder {
    pub fn new(
        repo: Arc<dyn AuditEventRepository>,
        serializer: Arc<SnapshotSerializer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            serializer,
            clock,
            last_stamp: Mutex::new(None),
        }
    }

    /// Next event timestamp, strictly after every stamp this recorder has
    /// handed out. Truncated to microseconds to match storage precision.
    pub(super) fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now().trunc_subsecs(6);
        let mut last = self.last_stamp.lock().unwrap_or_else(PoisonError::into_inner);
        let stamp = match *last {
            Some(previous) if now <= previous => previous + TimeDelta::microseconds(1),
            _ => now,
        };
        *last = Some(stamp);
        stamp
    }
}
