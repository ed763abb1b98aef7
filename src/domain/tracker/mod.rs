// src/domain/tracker/mod.rs
//! Value shapes of the tracked business entities as they appear in audit
//! snapshots and cached views. Persistence of the entities themselves
//! lives outside this crate.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Blocked => "BLOCKED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    RoleAdmin,
    RoleManager,
    RoleDeveloper,
    RoleContractor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub project_id: Uuid,
    pub developer_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
}

/// Login and account snapshots. Credentials never enter the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Aggregate view cached in the `taskStats` region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: u64,
    pub tasks_by_status: BTreeMap<String, u64>,
    pub overdue_tasks: u64,
    pub unassigned_tasks: u64,
}

impl TaskStats {
    /// Derive statistics from the current task set as of `today`.
    pub fn compute(tasks: &[TaskSnapshot], today: NaiveDate) -> Self {
        let mut stats = Self {
            total_tasks: tasks.len() as u64,
            ..Self::default()
        };
        for task in tasks {
            *stats
                .tasks_by_status
                .entry(task.status.as_str().to_string())
                .or_default() += 1;
            if task.due_date < today && task.status != TaskStatus::Completed {
                stats.overdue_tasks += 1;
            }
            if task.developer_id.is_none() {
                stats.unassigned_tasks += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, due: NaiveDate, developer: Option<Uuid>) -> TaskSnapshot {
        TaskSnapshot {
            id: Uuid::new_v4(),
            title: "Write docs".into(),
            description: "Document the API".into(),
            status,
            due_date: due,
            project_id: Uuid::new_v4(),
            developer_id: developer,
        }
    }

    #[test]
    fn stats_count_overdue_and_unassigned() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let tasks = vec![
            task(TaskStatus::Todo, past, None),
            task(TaskStatus::Completed, past, Some(Uuid::new_v4())),
            task(TaskStatus::InProgress, future, Some(Uuid::new_v4())),
        ];

        let stats = TaskStats::compute(&tasks, today);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.unassigned_tasks, 1);
        assert_eq!(stats.tasks_by_status.get("COMPLETED"), Some(&1));
    }
}
