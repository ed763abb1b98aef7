// src/domain/audit/mod.rs
pub mod entity;
pub mod page;
pub mod repository;

pub use entity::{
    AuditEvent, AuditEventId, ActionType, CAPTURE_TIME_KEY, ENTITY_CLASS_KEY, ERROR_KEY,
    NewAuditEvent, Payload,
};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField, window};
pub use repository::AuditEventRepository;
