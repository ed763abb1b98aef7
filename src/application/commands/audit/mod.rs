// src/application/commands/audit/mod.rs
mod record;
mod service;

pub use record::RecordEventCommand;
pub use service::AuditRecorder;
