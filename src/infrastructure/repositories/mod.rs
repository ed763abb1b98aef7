// src/infrastructure/repositories/mod.rs
mod error;
mod memory_audit_event;
mod postgres_audit_event;

pub use error::map_sqlx;
pub use memory_audit_event::InMemoryAuditEventRepository;
pub use postgres_audit_event::PostgresAuditEventRepository;
