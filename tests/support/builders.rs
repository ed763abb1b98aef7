// tests/support/builders.rs
use chrono::NaiveDate;
use project_tracker::domain::tracker::{
    DeveloperSnapshot, ProjectSnapshot, ProjectStatus, TaskSnapshot, TaskStatus,
};
use uuid::Uuid;

pub fn project(name: &str) -> ProjectSnapshot {
    ProjectSnapshot {
        id: Uuid::new_v4(),
        name: name.into(),
        description: Some(format!("{name} project")),
        deadline: NaiveDate::from_ymd_opt(2024, 12, 31),
        status: ProjectStatus::InProgress,
        created_date: None,
        updated_date: None,
    }
}

pub fn task(status: TaskStatus, due_date: NaiveDate, developer_id: Option<Uuid>) -> TaskSnapshot {
    TaskSnapshot {
        id: Uuid::new_v4(),
        title: "Ship release".into(),
        description: "Cut and publish the release".into(),
        status,
        due_date,
        project_id: Uuid::new_v4(),
        developer_id,
    }
}

pub fn developer(name: &str) -> DeveloperSnapshot {
    DeveloperSnapshot {
        id: Uuid::new_v4(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        skills: Some("rust".into()),
    }
}
