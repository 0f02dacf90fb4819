// src/services/yahoo/mod.rs
//! Yahoo Finance balance sheet (fundamentals timeseries) and valuation (quoteSummary).

mod models;

use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::services::http::{fetch_text, FetchError};

use models::{raw, QuoteSummaryResponse, QuoteSummaryResult, TimeseriesResponse};

const COOKIE_URL: &str = "https://fc.yahoo.com";
const API_BASE_URL: &str = "https://query1.finance.yahoo.com";
const MODULES: &str = "financialData,defaultKeyStatistics,summaryDetail";

const CURRENT_ASSETS: &str = "annualCurrentAssets";
const CURRENT_LIABILITIES: &str = "annualCurrentLiabilities";
const LONG_TERM_DEBT: &str = "annualLongTermDebt";
/// Start of the timeseries window (Aug 1985), wide enough for every annual report.
const TIMESERIES_START: u64 = 493_590_046;

/// Newest annual balance-sheet items; a missing item is `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet {
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub long_term_debt: f64,
}

/// Price-derived fields; `None` when Yahoo has no value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    pub book_value_per_share: Option<f64>,
    pub price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
}

#[derive(Debug, Clone)]
struct Crumb {
    cookie: String,
    value: String,
}

pub struct YahooClient {
    client: Client,
    cookie_url: String,
    api_base_url: String,
    crumb: RwLock<Option<Crumb>>,
}

impl YahooClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_urls(client, COOKIE_URL, API_BASE_URL)
    }

    pub fn with_base_urls(
        client: Client,
        cookie_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cookie_url: cookie_url.into(),
            api_base_url: api_base_url.into(),
            crumb: RwLock::new(None),
        }
    }

    async fn ensure_crumb(&self) -> Result<Crumb, FetchError> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }

        // fc.yahoo.com answers 404 but still sets the session cookie.
        let response = self.client.get(&self.cookie_url).send().await?;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| FetchError::Auth("Failed to parse Yahoo cookie".to_string()))?;

        let crumb_url = format!("{}/v1/test/getcrumb", self.api_base_url);
        let value = fetch_text(self.client.get(&crumb_url).header(header::COOKIE, &cookie)).await?;
        if value.trim().is_empty() {
            return Err(FetchError::Auth("Yahoo returned an empty crumb".to_string()));
        }

        let crumb = Crumb {
            cookie,
            value: value.trim().to_string(),
        };
        *self.crumb.write().unwrap_or_else(|e| e.into_inner()) = Some(crumb.clone());
        Ok(crumb)
    }

    fn cached_crumb(&self) -> Option<Crumb> {
        self.crumb.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn clear_crumb(&self) {
        *self.crumb.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// GETs `url` (crumb appended) with the session cookie and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, ticker: &str, url: &str) -> Result<T, FetchError> {
        let crumb = self.ensure_crumb().await?;
        let url = format!("{}&crumb={}", url, urlencoding::encode(&crumb.value));

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Yahoo rejected the cached crumb, clearing it");
                self.clear_crumb();
                return Err(FetchError::Auth("Yahoo authentication expired".to_string()));
            }
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(ticker.to_string())),
            status if !status.is_success() => {
                return Err(FetchError::Status { url, status });
            }
            _ => {}
        }

        Ok(response.json().await?)
    }

    pub async fn fetch_balance_sheet(&self, ticker: &str) -> Result<BalanceSheet, FetchError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(TIMESERIES_START);
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}?symbol={symbol}&type={},{},{}&period1={}&period2={}",
            self.api_base_url,
            CURRENT_ASSETS,
            CURRENT_LIABILITIES,
            LONG_TERM_DEBT,
            TIMESERIES_START,
            now,
            symbol = urlencoding::encode(ticker),
        );
        info!("Fetching Yahoo balance sheet for {}", ticker);

        let data: TimeseriesResponse = self.get_json(ticker, &url).await?;
        Ok(balance_sheet_from_timeseries(&data))
    }

    pub async fn fetch_valuation(&self, ticker: &str) -> Result<Valuation, FetchError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.api_base_url,
            urlencoding::encode(ticker),
            MODULES
        );
        info!("Fetching Yahoo quote summary for {}", ticker);

        let data: QuoteSummaryResponse = self.get_json(ticker, &url).await?;
        let result = data
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FetchError::NotFound(ticker.to_string()))?;

        Ok(valuation_from_summary(&result))
    }
}

fn balance_sheet_from_timeseries(data: &TimeseriesResponse) -> BalanceSheet {
    BalanceSheet {
        current_assets: data.latest(CURRENT_ASSETS).unwrap_or(0.0),
        current_liabilities: data.latest(CURRENT_LIABILITIES).unwrap_or(0.0),
        long_term_debt: data.latest(LONG_TERM_DEBT).unwrap_or(0.0),
    }
}

fn valuation_from_summary(result: &QuoteSummaryResult) -> Valuation {
    Valuation {
        book_value_per_share: result
            .default_key_statistics
            .as_ref()
            .and_then(|stats| raw(&stats.book_value)),
        price: result
            .financial_data
            .as_ref()
            .and_then(|data| raw(&data.current_price)),
        trailing_pe: result
            .summary_detail
            .as_ref()
            .and_then(|detail| raw(&detail.trailing_pe)),
        trailing_eps: result
            .default_key_statistics
            .as_ref()
            .and_then(|stats| raw(&stats.trailing_eps)),
    }
}
