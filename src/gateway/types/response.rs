//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - Ledger error to HTTP mapping

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ledger::error::LedgerError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_TRANSACTION_TYPE: i32 = 1002;
    pub const INSUFFICIENT_FUNDS: i32 = 1003;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const TRANSACTION_NOT_FOUND: i32 = 4002;
    pub const ACCOUNT_NOT_EMPTY: i32 = 4091;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const STORE_UNAVAILABLE: i32 = 5001;
    pub const RECORDING_FAILED: i32 = 5002;
}

/// Map a ledger error to its HTTP rejection tuple
pub fn ledger_error_response(err: &LedgerError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let code = match err {
        LedgerError::Validation { .. } => error_codes::INVALID_PARAMETER,
        LedgerError::InvalidTransactionType(_) => error_codes::INVALID_TRANSACTION_TYPE,
        LedgerError::AccountNotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
        LedgerError::InsufficientFunds => error_codes::INSUFFICIENT_FUNDS,
        LedgerError::StoreUnavailable(_) => error_codes::STORE_UNAVAILABLE,
        LedgerError::RecordingFailed(_) => error_codes::RECORDING_FAILED,
    };

    (status, Json(ApiResponse::<()>::error(code, err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AccountId;

    #[test]
    fn test_success_response_shape() {
        let resp = ApiResponse::success(42);
        assert_eq!(resp.code, 0);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_error_response_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, "bad input");
        assert_eq!(resp.code, error_codes::INVALID_PARAMETER);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_ledger_error_mapping() {
        let (status, body) = ledger_error_response(&LedgerError::InsufficientFunds);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, error_codes::INSUFFICIENT_FUNDS);

        let (status, body) =
            ledger_error_response(&LedgerError::AccountNotFound(AccountId::new()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, error_codes::ACCOUNT_NOT_FOUND);

        let (status, _) =
            ledger_error_response(&LedgerError::StoreUnavailable("down".to_string()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
