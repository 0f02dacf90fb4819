// src/handlers/analyze.rs
use std::sync::Arc;

use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::AnalyzeResponse;
use crate::state::AppState;

const MAX_TICKER_LEN: usize = 10;

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub ticker: String,
}

/// Trims and uppercases; rejects blanks, embedded whitespace and anything over 10 characters.
pub fn normalize_ticker(raw: &str) -> Result<String, ApiError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty()
        || ticker.chars().any(char::is_whitespace)
        || ticker.chars().count() > MAX_TICKER_LEN
    {
        return Err(ApiError::bad_request("Ticker seems malformed."));
    }
    Ok(ticker)
}

pub async fn get_root() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&json!({
        "message": "Welcome to the Graham Stock Screener API"
    })))
}

pub async fn analyze(query: AnalyzeQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    let ticker = normalize_ticker(&query.ticker).map_err(|e| {
        info!("Rejected ticker {:?}", query.ticker);
        warp::reject::custom(e)
    })?;

    if let Some(report) = state.cache.get(&ticker) {
        info!("Cache hit for {}", ticker);
        return Ok(warp::reply::json(&AnalyzeResponse {
            ticker: &ticker,
            graham_results: &report,
            cached: true,
        }));
    }

    info!("Cache miss for {}, evaluating", ticker);
    // Spawned so a panic in the pipeline comes back as a JoinError.
    let screener = state.screener.clone();
    let task_ticker = ticker.clone();
    let outcome = tokio::spawn(async move { screener.screen(&task_ticker).await }).await;

    let report = match outcome {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            error!("Evaluation failed for {}: {:#}", ticker, e);
            return Err(warp::reject::custom(ApiError::internal(e.to_string())));
        }
        Err(e) => {
            error!("Evaluation task for {} aborted: {}", ticker, e);
            return Err(warp::reject::custom(ApiError::internal(e.to_string())));
        }
    };

    state.cache.put(ticker.clone(), report.clone());
    Ok(warp::reply::json(&AnalyzeResponse {
        ticker: &ticker,
        graham_results: &report,
        cached: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk.b").unwrap(), "BRK.B");
        assert_eq!(normalize_ticker("ABCDEFGHIJ").unwrap(), "ABCDEFGHIJ");
    }

    #[test]
    fn test_normalize_ticker_rejects_malformed() {
        for raw in ["", "   ", "BRK B", "A\tB", "ABCDEFGHIJK"] {
            let err = normalize_ticker(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{:?}", raw);
            assert_eq!(err.message, "Ticker seems malformed.");
        }
    }
}
