//! Shared API response types
//!
//! Every endpoint answers with the same envelope:
//! `{ success, data?, error?, message?, pagination? }`.

use serde::Serialize;

use crate::models::PagedResult;

/// Pagination block of the response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: u32,
}

impl Pagination {
    pub fn from_result<T>(result: &PagedResult<T>) -> Self {
        Self {
            page: result.page,
            limit: result.limit,
            total: result.total,
            pages: result.total_pages(),
        }
    }
}

/// Success response envelope
///
/// Error responses are produced by `ApiError` and carry
/// `{ success: false, error }` instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Build a list response from a paged repository result
pub fn paged<T: Serialize>(result: PagedResult<T>) -> ApiResponse<Vec<T>> {
    let pagination = Pagination::from_result(&result);
    ApiResponse::ok(result.items).with_pagination(pagination)
}
