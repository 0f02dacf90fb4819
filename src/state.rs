// src/state.rs
use std::sync::Arc;

use crate::services::cache::ReportCache;
use crate::services::screener::Screener;

pub struct AppState {
    pub screener: Arc<dyn Screener>,
    pub cache: ReportCache,
}

impl AppState {
    pub fn new(screener: Arc<dyn Screener>) -> Self {
        Self {
            screener,
            cache: ReportCache::new(),
        }
    }
}
