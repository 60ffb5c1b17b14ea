//! The `{ success, data?, error? }` wrapper every endpoint responds with.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Turn `success: false` into [`ClientError::Api`]
    pub fn check(self) -> ClientResult<Self> {
        if self.success {
            return Ok(self);
        }
        let error = self.error.unwrap_or(ApiErrorBody {
            code: "UNKNOWN".to_string(),
            message: "request failed".to_string(),
        });
        Err(ClientError::Api {
            code: error.code,
            message: error.message,
        })
    }

    /// Payload of a single-entity read
    pub fn into_data(self) -> ClientResult<T> {
        self.check()?.data.ok_or(ClientError::MissingData)
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Payload of a list read; a missing list is empty
    pub fn into_list(self) -> ClientResult<Vec<T>> {
        Ok(self.check()?.data.unwrap_or_default())
    }
}
