//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod gender;

// Re-export commonly used types
pub use gender::*;
