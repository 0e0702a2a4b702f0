//! Gateway types module
//!
//! Request and response types for the HTTP boundary:
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`error_codes`]: Standard error code constants
//! - Money operation request bodies ([`MoneyRequest`], [`TransferApiRequest`])

pub mod request;
pub mod response;

// Re-export commonly used types at module root
pub use request::{MoneyRequest, TransferApiRequest};
pub use response::{ApiResponse, error_codes, ledger_error_response};
