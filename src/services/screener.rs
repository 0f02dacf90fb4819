// src/services/screener.rs
use async_trait::async_trait;
use log::info;

use crate::models::EvaluationReport;
use crate::services::graham::evaluate;
use crate::services::market_data::MarketData;

/// Produces a report for an already-normalized ticker.
#[async_trait]
pub trait Screener: Send + Sync {
    async fn screen(&self, ticker: &str) -> anyhow::Result<EvaluationReport>;
}

/// Live pipeline: Yahoo snapshot + MarketWatch EPS and dividends, then the checklist.
pub struct GrahamScreener {
    data: MarketData,
}

impl GrahamScreener {
    pub fn new(data: MarketData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Screener for GrahamScreener {
    async fn screen(&self, ticker: &str) -> anyhow::Result<EvaluationReport> {
        let snapshot = self.data.snapshot(ticker).await;
        let eps_history = self.data.eps_history(ticker).await;
        let dividends_ok = self.data.dividends_stable(ticker).await;

        let report = evaluate(&snapshot, &eps_history, dividends_ok);
        info!(
            "Evaluated {}: {}/{} checks passed",
            ticker,
            report.iter().filter(|(_, r)| r.passed()).count(),
            report.len()
        );
        Ok(report)
    }
}
