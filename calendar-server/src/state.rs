use std::sync::Arc;

use calendar_core::Calendar;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub calendar: Arc<Calendar>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            calendar: Arc::new(Calendar::new()),
        }
    }
}
