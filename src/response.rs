use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<i64>,
    pub completed: Option<i64>,
}

impl Meta {
    pub fn counts(total: i64, completed: i64) -> Self {
        Self {
            total: Some(total),
            completed: Some(completed),
        }
    }

    pub fn total(total: i64) -> Self {
        Self {
            total: Some(total),
            completed: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            total: None,
            completed: None,
        }
    }
}

/// Envelope shared by every JSON response, errors included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
