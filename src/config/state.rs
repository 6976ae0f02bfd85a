// Application state module
// Holds the startup configuration and the method dispatch table

use super::types::Config;
use crate::handler::DispatchTable;

/// Application state, shared read-only by every connection
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub dispatch: DispatchTable,
}

impl AppState {
    /// Create `AppState` with the standard dispatch table
    pub fn new(config: Config) -> Self {
        Self::with_dispatch(config, DispatchTable::standard())
    }

    pub const fn with_dispatch(config: Config, dispatch: DispatchTable) -> Self {
        Self { config, dispatch }
    }
}
