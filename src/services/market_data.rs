// src/services/market_data.rs
//! Adapter boundary: every fetch degrades to a default instead of failing.

use log::warn;

use crate::models::{EpsHistory, FinancialSnapshot};
use crate::services::http::{build_client, FetchError};
use crate::services::marketwatch::MarketWatchClient;
use crate::services::yahoo::YahooClient;

pub struct MarketData {
    yahoo: YahooClient,
    marketwatch: MarketWatchClient,
}

impl MarketData {
    pub fn new() -> Result<Self, FetchError> {
        let client = build_client()?;
        Ok(Self::with_clients(
            YahooClient::new(client.clone()),
            MarketWatchClient::new(client),
        ))
    }

    pub fn with_clients(yahoo: YahooClient, marketwatch: MarketWatchClient) -> Self {
        Self { yahoo, marketwatch }
    }

    /// Balance sheet and valuation degrade independently: zeros and `None` respectively.
    pub async fn snapshot(&self, ticker: &str) -> FinancialSnapshot {
        let balance = or_default(ticker, "balance sheet", self.yahoo.fetch_balance_sheet(ticker).await);
        let valuation = or_default(ticker, "valuation", self.yahoo.fetch_valuation(ticker).await);

        FinancialSnapshot {
            current_assets: balance.current_assets,
            current_liabilities: balance.current_liabilities,
            long_term_debt: balance.long_term_debt,
            book_value_per_share: valuation.book_value_per_share,
            price: valuation.price,
            trailing_pe: valuation.trailing_pe,
            trailing_eps: valuation.trailing_eps,
        }
    }

    pub async fn eps_history(&self, ticker: &str) -> EpsHistory {
        or_default(ticker, "EPS history", self.marketwatch.fetch_eps_history(ticker).await)
    }

    pub async fn dividends_stable(&self, ticker: &str) -> bool {
        or_default(ticker, "dividend record", self.marketwatch.fetch_dividend_record(ticker).await)
    }
}

fn or_default<T: Default>(ticker: &str, what: &str, result: Result<T, FetchError>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Error fetching {} for {}: {}", what, ticker, e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_default_collapses_errors() {
        let failed: Result<EpsHistory, FetchError> = Err(FetchError::NotFound("ZZZZ".to_string()));
        assert!(or_default("ZZZZ", "EPS history", failed).is_empty());

        let failed: Result<bool, FetchError> = Err(FetchError::Auth("expired".to_string()));
        assert!(!or_default("ZZZZ", "dividend record", failed));

        assert_eq!(or_default("AAPL", "EPS history", Ok(vec![1.0])), vec![1.0]);
    }
}
