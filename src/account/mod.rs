//! Account management module
//!
//! PostgreSQL-based storage for users and their bank accounts

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::{AccountApiData, UpdateUserRequest, User, UserProfile};
pub use repository::{AccountRepository, UserRepository};
