// src/application/dto/mod.rs
pub mod audit;
pub mod pagination;
pub mod stats;

pub use audit::AuditEventDto;
pub use pagination::PageDto;
pub use stats::AuditStatsDto;
