//! Yahoo Finance response models.
//!
//! Numeric fields arrive as `{"raw": 1.0, "fmt": "1.00"}`, or `{}` when Yahoo has no value.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    pub financial_data: Option<FinancialData>,
    pub default_key_statistics: Option<DefaultKeyStatistics>,
    pub summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub current_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultKeyStatistics {
    pub book_value: Option<RawValue>,
    pub trailing_eps: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct RawValue {
    pub raw: Option<f64>,
}

/// `raw` of an optional `{raw, fmt}` field.
pub fn raw(value: &Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

/// Fundamentals-timeseries response: one result per requested series type.
#[derive(Debug, Deserialize)]
pub struct TimeseriesResponse {
    pub timeseries: Timeseries,
}

#[derive(Debug, Deserialize)]
pub struct Timeseries {
    #[serde(default)]
    pub result: Option<Vec<TimeseriesResult>>,
}

/// The data points sit under a key named after the series type
/// (`"annualCurrentAssets": [...]`), next to `meta` and `timestamp`.
#[derive(Debug, Deserialize)]
pub struct TimeseriesResult {
    pub meta: TimeseriesMeta,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    pub series_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPoint {
    pub as_of_date: String,
    pub reported_value: Option<RawValue>,
}

impl TimeseriesResult {
    pub fn series_type(&self) -> Option<&str> {
        self.meta.series_type.first().map(String::as_str)
    }

    /// Reported value of the most recent `asOfDate`; null points are skipped.
    pub fn latest_value(&self) -> Option<f64> {
        let points: Vec<Option<TimeseriesPoint>> =
            serde_json::from_value(self.fields.get(self.series_type()?)?.clone()).ok()?;
        points
            .into_iter()
            .flatten()
            .filter_map(|point| raw(&point.reported_value).map(|value| (point.as_of_date, value)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, value)| value)
    }
}

impl TimeseriesResponse {
    /// Latest value of `series_type`, if Yahoo returned one.
    pub fn latest(&self, series_type: &str) -> Option<f64> {
        self.timeseries
            .result
            .as_ref()?
            .iter()
            .find(|result| result.series_type() == Some(series_type))
            .and_then(TimeseriesResult::latest_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_object_as_missing() {
        let detail: SummaryDetail = serde_json::from_str(r#"{"trailingPE": {}}"#).unwrap();
        assert_eq!(raw(&detail.trailing_pe), None);
    }

    #[test]
    fn test_deserialize_quote_summary() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "financialData": {"currentPrice": {"raw": 12.5, "fmt": "12.50"}},
                    "defaultKeyStatistics": {"bookValue": {"raw": 10.0}, "trailingEps": {}},
                    "summaryDetail": {"trailingPE": {"raw": 9.8, "fmt": "9.80"}}
                }],
                "error": null
            }
        }"#;
        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let result = response.quote_summary.result.unwrap().into_iter().next().unwrap();

        assert_eq!(raw(&result.financial_data.unwrap().current_price), Some(12.5));
        let stats = result.default_key_statistics.unwrap();
        assert_eq!(raw(&stats.book_value), Some(10.0));
        assert_eq!(raw(&stats.trailing_eps), None);
    }

    #[test]
    fn test_deserialize_not_found() {
        let json = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found"}}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_none());
    }

    const TIMESERIES: &str = r#"{
        "timeseries": {
            "result": [
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualCurrentAssets"]},
                    "timestamp": [1632960000, 1664496000, 1695945600],
                    "annualCurrentAssets": [
                        {"dataId": 20100, "asOfDate": "2021-09-30", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 134836000000, "fmt": "134.84B"}},
                        null,
                        {"dataId": 20100, "asOfDate": "2023-09-30", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 143566000000, "fmt": "143.57B"}},
                        {"dataId": 20100, "asOfDate": "2022-09-24", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 135405000000, "fmt": "135.41B"}}
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualCurrentLiabilities"]},
                    "timestamp": [1695945600],
                    "annualCurrentLiabilities": [
                        {"dataId": 20200, "asOfDate": "2023-09-30", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 145308000000, "fmt": "145.31B"}}
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualLongTermDebt"]}
                }
            ],
            "error": null
        }
    }"#;

    #[test]
    fn test_timeseries_latest_annual_value() {
        let response: TimeseriesResponse = serde_json::from_str(TIMESERIES).unwrap();
        assert_eq!(response.latest("annualCurrentAssets"), Some(143_566_000_000.0));
        assert_eq!(response.latest("annualCurrentLiabilities"), Some(145_308_000_000.0));
        // Series present in meta but without data points.
        assert_eq!(response.latest("annualLongTermDebt"), None);
        assert_eq!(response.latest("annualTotalAssets"), None);
    }

    #[test]
    fn test_timeseries_empty_result() {
        let response: TimeseriesResponse =
            serde_json::from_str(r#"{"timeseries": {"result": [], "error": null}}"#).unwrap();
        assert_eq!(response.latest("annualCurrentAssets"), None);
    }
}
