// src/application/queries/audit/service.rs
use std::sync::Arc;

use crate::domain::audit::AuditEventRepository;

/// Read side of the audit log. Never touches the business caches.
pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditEventRepository>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditEventRepository>) -> Self {
        Self { repo }
    }
}
