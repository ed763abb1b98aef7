// src/domain/audit/page.rs
use super::entity::AuditEvent;
use crate::domain::errors::{DomainError, DomainResult};
use std::{cmp::Ordering, str::FromStr};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Timestamp,
    ActionType,
    EntityType,
    EntityId,
    ActorName,
    Id,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::ActionType => "actionType",
            Self::EntityType => "entityType",
            Self::EntityId => "entityId",
            Self::ActorName => "actorName",
            Self::Id => "id",
        }
    }

    /// Storage column backing this field. Only these names ever reach SQL.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Timestamp => "occurred_at",
            Self::ActionType => "action_type",
            Self::EntityType => "entity_type",
            Self::EntityId => "entity_id",
            Self::ActorName => "actor_name",
            Self::Id => "id",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "timestamp" => Ok(Self::Timestamp),
            "actionType" => Ok(Self::ActionType),
            "entityType" => Ok(Self::EntityType),
            "entityId" => Ok(Self::EntityId),
            "actorName" => Ok(Self::ActorName),
            "id" => Ok(Self::Id),
            other => Err(DomainError::Validation(format!(
                "unsupported sort field '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Null placement matching `Option` ordering, where `None` is smallest.
    pub const fn nulls_sql(self) -> &'static str {
        match self {
            Self::Asc => "NULLS FIRST",
            Self::Desc => "NULLS LAST",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(DomainError::Validation(format!(
                "unsupported sort direction '{value}', expected asc or desc"
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn compare(&self, a: &AuditEvent, b: &AuditEvent) -> Ordering {
        let ordering = match self.field {
            SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortField::ActionType => a.action_type.as_str().cmp(b.action_type.as_str()),
            SortField::EntityType => a.entity_type.cmp(&b.entity_type),
            SortField::EntityId => a.entity_id.cmp(&b.entity_id),
            SortField::ActorName => a.actor_name.cmp(&b.actor_name),
            SortField::Id => a.id.cmp(&b.id),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortField::Timestamp, SortDirection::Desc)
    }
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: Sort) -> DomainResult<Self> {
        let page = u32::try_from(page)
            .map_err(|_| DomainError::Validation(format!("page must be >= 0, got {page}")))?;
        let size = u32::try_from(size)
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                ))
            })?;
        Ok(Self { page, size, sort })
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    pub const fn sort(&self) -> Sort {
        self.sort
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.size))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cuts one page out of an already filtered sequence.
///
/// Runs in O(N) over the full filtered set, so it is only suitable for
/// filter axes whose result sets stay small relative to the whole log.
/// An offset past the end yields no items but still reports the full
/// count, which keeps client-side page math consistent.
pub fn window<T>(mut items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len();
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let slice = if offset >= total {
        Vec::new()
    } else {
        let end = offset.saturating_add(request.size as usize).min(total);
        items.drain(offset..end).collect()
    };
    Page::new(slice, total as u64, request)
}
