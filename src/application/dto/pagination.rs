// src/application/dto/pagination.rs
use crate::domain::audit::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
}

impl<T> PageDto<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T, U> From<Page<U>> for PageDto<T>
where
    U: Into<T>,
{
    fn from(page: Page<U>) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total_count: page.total_count,
            page: page.page,
            size: page.size,
            total_pages,
        }
    }
}
