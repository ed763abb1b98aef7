// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of event timestamps and snapshot capture times.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
