// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::CacheCoordinator,
        commands::{audit::AuditRecorder, mutation::MutationHooks},
        ports::{cache::CacheStore, time::Clock},
        queries::audit::AuditQueryService,
        snapshot::SnapshotSerializer,
    },
    domain::{audit::AuditEventRepository, cache::CacheTtls},
};

pub struct ApplicationServices {
    pub audit_recorder: Arc<AuditRecorder>,
    pub audit_queries: Arc<AuditQueryService>,
    pub cache: Arc<CacheCoordinator>,
    pub mutations: Arc<MutationHooks>,
}

impl ApplicationServices {
    pub fn new(
        audit_repo: Arc<dyn AuditEventRepository>,
        cache_store: Arc<dyn CacheStore>,
        cache_ttls: CacheTtls,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let serializer = Arc::new(SnapshotSerializer::with_tracked_entities(Arc::clone(&clock)));

        let audit_recorder = Arc::new(AuditRecorder::new(
            Arc::clone(&audit_repo),
            serializer,
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_repo)));
        let cache = Arc::new(CacheCoordinator::new(cache_store, cache_ttls));
        let mutations = Arc::new(MutationHooks::new(
            Arc::clone(&audit_recorder),
            Arc::clone(&cache),
        ));

        Self {
            audit_recorder,
            audit_queries,
            cache,
            mutations,
        }
    }
}
