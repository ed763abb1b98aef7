// src/application/queries/audit/mod.rs
mod common;
mod list;
mod service;
mod stats;

pub use common::PageParams;
pub use list::{
    ActionTypeQuery, ActorActionsQuery, DateRangeQuery, EntityTrailQuery, RecentQuery,
};
pub use service::AuditQueryService;
pub use stats::AuditStatsQuery;
