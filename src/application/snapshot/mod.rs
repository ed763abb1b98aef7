// src/application/snapshot/mod.rs
//! Turns business entities into audit payloads.
//!
//! Each entity type label is registered with an explicit serializer.
//! Serialization never fails from the caller's point of view: anything
//! that cannot be turned into a field map degrades to a minimal payload
//! carrying the type name, an error marker and the capture instant.
use crate::application::ports::time::Clock;
use crate::domain::audit::{CAPTURE_TIME_KEY, ENTITY_CLASS_KEY, ERROR_KEY, Payload};
use crate::domain::tracker::{DeveloperSnapshot, ProjectSnapshot, TaskSnapshot, UserSnapshot};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::Value;
use std::{any::Any, collections::HashMap, sync::Arc};
use thiserror::Error;

pub const SERIALIZATION_ERROR_MARKER: &str = "Failed to serialize entity";

/// Name recorded for ad-hoc `serde_json::Value` snapshots.
const AD_HOC_TYPE_NAME: &str = "Map";

type SerializeFn = Box<dyn Fn(&dyn Any) -> Result<Value, SnapshotError> + Send + Sync>;

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("no serializer registered for entity type '{0}'")]
    Unregistered(String),
    #[error("snapshot value is not a {0}")]
    TypeMismatch(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("snapshot did not produce a field map")]
    NotAnObject,
}

struct Registration {
    type_name: &'static str,
    serialize: SerializeFn,
}

pub struct SnapshotSerializer {
    registry: HashMap<String, Registration>,
    clock: Arc<dyn Clock>,
}

impl SnapshotSerializer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: HashMap::new(),
            clock,
        }
    }

    /// Serializer preloaded with every tracked business entity.
    pub fn with_tracked_entities(clock: Arc<dyn Clock>) -> Self {
        let mut serializer = Self::new(clock);
        serializer
            .register::<ProjectSnapshot>("Project")
            .register::<TaskSnapshot>("Task")
            .register::<DeveloperSnapshot>("Developer")
            .register::<UserSnapshot>("USER");
        serializer
    }

    pub fn register<T>(&mut self, entity_type: impl Into<String>) -> &mut Self
    where
        T: Serialize + 'static,
    {
        let type_name = short_type_name::<T>();
        let serialize: SerializeFn = Box::new(move |entity: &dyn Any| {
            let typed = entity
                .downcast_ref::<T>()
                .ok_or(SnapshotError::TypeMismatch(type_name))?;
            Ok(serde_json::to_value(typed)?)
        });
        self.registry.insert(
            entity_type.into(),
            Registration {
                type_name,
                serialize,
            },
        );
        self
    }

    pub fn serialize(&self, entity_type: &str, entity: Option<&dyn Any>) -> Payload {
        let Some(entity) = entity else {
            return Payload::new();
        };

        let (type_name, result) = self.convert(entity_type, entity);
        let capture_time = Value::String(
            self.clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        );

        match result {
            Ok(mut payload) => {
                payload.insert(ENTITY_CLASS_KEY.into(), Value::String(type_name.into()));
                payload.insert(CAPTURE_TIME_KEY.into(), capture_time);
                payload
            }
            Err(err) => {
                tracing::warn!(
                    entity_type,
                    type_name,
                    error = %err,
                    "failed to serialize entity snapshot, storing fallback payload"
                );
                let mut fallback = Payload::new();
                fallback.insert(ENTITY_CLASS_KEY.into(), Value::String(type_name.into()));
                fallback.insert(
                    ERROR_KEY.into(),
                    Value::String(SERIALIZATION_ERROR_MARKER.into()),
                );
                fallback.insert(CAPTURE_TIME_KEY.into(), capture_time);
                fallback
            }
        }
    }

    fn convert<'a>(
        &'a self,
        entity_type: &'a str,
        entity: &dyn Any,
    ) -> (&'a str, Result<Payload, SnapshotError>) {
        if let Some(value) = entity.downcast_ref::<Value>() {
            return (AD_HOC_TYPE_NAME, into_field_map(value.clone()));
        }

        match self.registry.get(entity_type) {
            Some(registration) => (
                registration.type_name,
                (registration.serialize)(entity).and_then(into_field_map),
            ),
            None => (
                entity_type,
                Err(SnapshotError::Unregistered(entity_type.to_string())),
            ),
        }
    }
}

fn into_field_map(value: Value) -> Result<Payload, SnapshotError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SnapshotError::NotAnObject),
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
