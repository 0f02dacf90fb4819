// src/services/marketwatch.rs
//! MarketWatch scraping for EPS history and the dividend signal.
//!
//! Page parsing lives in plain functions so the (non-`Send`) parsed document
//! never lives across an `.await`.

use log::{info, warn};
use reqwest::header;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::models::EpsHistory;
use crate::services::http::{fetch_text, FetchError};

const BASE_URL: &str = "https://www.marketwatch.com";
const REFERER: &str = "https://www.marketwatch.com/";

#[derive(Clone)]
pub struct MarketWatchClient {
    client: Client,
    base_url: String,
}

impl MarketWatchClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_page(&self, ticker: &str, page: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/investing/stock/{}/{}",
            self.base_url,
            urlencoding::encode(ticker),
            page
        );
        info!("Fetching {} for {} from {}", page, ticker, url);

        let request = self
            .client
            .get(&url)
            .header(header::REFERER, REFERER)
            .header(header::ORIGIN, BASE_URL);
        fetch_text(request).await
    }

    /// Raw EPS row from the financials page. `Ok(vec![])` when the row is missing.
    pub async fn fetch_eps_history(&self, ticker: &str) -> Result<EpsHistory, FetchError> {
        let html = self.fetch_page(ticker, "financials").await?;
        match parse_eps_history(&html) {
            Some(history) => {
                info!("Found EPS row for {}: {:?}", ticker, history);
                Ok(history)
            }
            None => {
                warn!("EPS row not found for {}", ticker);
                Ok(Vec::new())
            }
        }
    }

    pub async fn fetch_dividend_record(&self, ticker: &str) -> Result<bool, FetchError> {
        let html = self.fetch_page(ticker, "dividends").await?;
        let found = detect_dividend_record(&html);
        if found {
            info!("Dividend information found for {}", ticker);
        } else {
            info!("No dividend info found for {}", ticker);
        }
        Ok(found)
    }
}

/// Values of the first table-body row whose text mentions "EPS", label cell skipped.
pub fn parse_eps_history(html: &str) -> Option<EpsHistory> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table tbody tr").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    document
        .select(&row_selector)
        .find(|row| row.text().collect::<String>().to_lowercase().contains("eps"))
        .map(|row| {
            row.select(&cell_selector)
                .skip(1)
                .map(|cell| parse_cell(&cell.text().collect::<String>()))
                .collect()
        })
}

/// `"(1.23)"` -> `-1.23`, `"1,024.5"` -> `1024.5`; blank or garbage -> `0.0`.
pub fn parse_cell(raw: &str) -> f64 {
    let text = raw.trim().replace(',', "");
    let cleaned = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => format!("-{}", inner),
        None => text,
    };

    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Weak proxy for a long dividend record: a `table.table` mentioning
/// "dividend", or the page mentioning "dividends" anywhere.
pub fn detect_dividend_record(html: &str) -> bool {
    let document = Html::parse_document(html);
    if let Ok(table_selector) = Selector::parse("table.table") {
        if let Some(table) = document.select(&table_selector).next() {
            if table.text().collect::<String>().to_lowercase().contains("dividend") {
                return true;
            }
        }
    }

    html.to_lowercase().contains("dividends")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINANCIALS_PAGE: &str = r#"
        <html><body>
        <table class="table">
          <thead><tr><th>Item</th><th>2019</th><th>2020</th></tr></thead>
          <tbody>
            <tr><td>Sales/Revenue</td><td>1,000</td><td>1,200</td></tr>
            <tr><td>EPS (Basic)</td><td>1.10</td><td>(0.25)</td><td></td><td>n/a</td><td>2,001.5</td></tr>
            <tr><td>EPS (Diluted)</td><td>9.99</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("(2.50)"), -2.5);
        assert_eq!(parse_cell(""), 0.0);
        assert_eq!(parse_cell("   "), 0.0);
        assert_eq!(parse_cell(" 3.25 "), 3.25);
        assert_eq!(parse_cell("1,234.5"), 1234.5);
        assert_eq!(parse_cell("-"), 0.0);
        assert_eq!(parse_cell("N/A"), 0.0);
    }

    #[test]
    fn test_parse_eps_history_first_matching_row() {
        let history = parse_eps_history(FINANCIALS_PAGE).unwrap();
        assert_eq!(history, vec![1.10, -0.25, 0.0, 0.0, 2001.5]);
    }

    #[test]
    fn test_parse_eps_history_is_case_insensitive() {
        let html = "<table><tbody><tr><td>Basic eps</td><td>0.5</td></tr></tbody></table>";
        assert_eq!(parse_eps_history(html), Some(vec![0.5]));
    }

    #[test]
    fn test_parse_eps_history_missing_row() {
        let html = "<table><tbody><tr><td>Revenue</td><td>10</td></tr></tbody></table>";
        assert_eq!(parse_eps_history(html), None);
        assert_eq!(parse_eps_history(""), None);
    }

    #[test]
    fn test_detect_dividend_record() {
        let table = r#"<table class="table small"><tr><td>Dividend Ex-Date</td></tr></table>"#;
        assert!(detect_dividend_record(table));

        let text_only = "<html><body><p>Upcoming DIVIDENDS calendar</p></body></html>";
        assert!(detect_dividend_record(text_only));

        let neither = r#"<table class="table"><tr><td>Price</td></tr></table>"#;
        assert!(!detect_dividend_record(neither));
    }
}
