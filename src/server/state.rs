//! Shared handler state

use crate::core::coordinator::ReportCoordinator;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub coordinator: Arc<ReportCoordinator>,
}

impl AppState {
    pub fn new(coordinator: ReportCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }
}
