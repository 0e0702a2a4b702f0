//! JWT-based user authentication
//!
//! Argon2 password hashing plus HS256 tokens. The middleware verifies
//! the Authorization header and injects [`Claims`] for handlers.

pub mod handlers;
pub mod middleware;
pub mod service;

// Re-exports for convenience
pub use service::{AuthResponse, Claims, LoginRequest, RegisterRequest, UserAuthService};
