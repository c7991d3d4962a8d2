//! Application state management
//!
//! Contains shared state accessible across all handlers. The state is
//! immutable after startup; the only moving part is the pool inside the
//! repository.

use crate::db::GenderRepository;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Storage for the gender resource
    pub genders: Arc<dyn GenderRepository>,
}

impl AppState {
    pub fn new(genders: Arc<dyn GenderRepository>) -> Self {
        Self { genders }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
