// src/application/queries/audit/common.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        audit::{PageRequest, Sort, SortDirection, SortField, page::DEFAULT_PAGE_SIZE},
        errors::DomainError,
    },
};

/// Raw pagination input as received from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub size: i64,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: i64::from(DEFAULT_PAGE_SIZE),
            sort_by: SortField::Timestamp.as_str().to_string(),
            sort_dir: "desc".to_string(),
        }
    }
}

impl PageParams {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, sort_by: impl Into<String>, sort_dir: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort_dir = sort_dir.into();
        self
    }
}

pub(super) fn page_request(params: &PageParams) -> ApplicationResult<PageRequest> {
    let field = params
        .sort_by
        .parse::<SortField>()
        .map_err(ApplicationError::from_input)?;
    let direction = params
        .sort_dir
        .parse::<SortDirection>()
        .map_err(ApplicationError::from_input)?;
    PageRequest::new(params.page, params.size, Sort::new(field, direction))
        .map_err(ApplicationError::from_input)
}

pub(super) fn require_non_blank(value: &str, field: &str) -> ApplicationResult<()> {
    if value.trim().is_empty() {
        Err(ApplicationError::validation(format!("{field} must not be blank")))
    } else {
        Ok(())
    }
}

pub(super) fn retrieval_failure(context: &'static str, err: DomainError) -> ApplicationError {
    tracing::error!(error = %err, "{context}");
    ApplicationError::infrastructure(format!("{context}: {err}"))
}
