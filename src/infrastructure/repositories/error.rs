use crate::domain::errors::DomainError;

const CNT_AUDIT_ACTION_TYPE: &str = "audit_events_action_type_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_AUDIT_ACTION_TYPE => {
                        DomainError::Validation("unsupported action type".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if db_err.code().as_deref() == Some("23514") {
                return DomainError::Validation("check constraint violated".into());
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
