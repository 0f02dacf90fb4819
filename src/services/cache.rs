// src/services/cache.rs
use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::EvaluationReport;

/// Process-lifetime report cache keyed by normalized ticker. Entries never expire.
#[derive(Debug, Default)]
pub struct ReportCache {
    reports: RwLock<HashMap<String, EvaluationReport>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticker: &str) -> Option<EvaluationReport> {
        self.reports
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(ticker)
            .cloned()
    }

    /// Last write wins; concurrent misses on one ticker store identical reports.
    pub fn put(&self, ticker: String, report: EvaluationReport) {
        self.reports
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(ticker, report);
    }

    pub fn len(&self) -> usize {
        self.reports.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
