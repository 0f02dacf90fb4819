// src/models.rs
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Balance-sheet and valuation figures for one ticker, as fetched for a single evaluation.
///
/// Balance-sheet line items missing from the statement are stored as `0.0`.
/// Valuation fields stay `None` when the provider has no value, since a zero
/// price or book value would silently skew the ratio checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub long_term_debt: f64,
    pub book_value_per_share: Option<f64>,
    pub price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
}

/// Yearly EPS values, oldest first.
pub type EpsHistory = Vec<f64>;

/// Human-facing value shown next to a check verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckDisplay {
    Number(f64),
    Text(String),
    Flag(bool),
    Series(Vec<f64>),
}

impl From<&str> for CheckDisplay {
    fn from(text: &str) -> Self {
        CheckDisplay::Text(text.to_string())
    }
}

impl From<String> for CheckDisplay {
    fn from(text: String) -> Self {
        CheckDisplay::Text(text)
    }
}

/// `(display, passed)`, serialized as a two element array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult(pub CheckDisplay, pub bool);

impl CheckResult {
    pub fn new(display: impl Into<CheckDisplay>, passed: bool) -> Self {
        CheckResult(display.into(), passed)
    }

    pub fn display(&self) -> &CheckDisplay {
        &self.0
    }

    pub fn passed(&self) -> bool {
        self.1
    }
}

/// Named check results in evaluation order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    entries: Vec<(&'static str, CheckResult)>,
}

impl EvaluationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, result: CheckResult) {
        self.entries.push((name, result));
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, result)| result)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CheckResult)> {
        self.entries.iter().map(|(name, result)| (*name, result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|(_, result)| result.passed())
    }
}

impl Serialize for EvaluationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse<'a> {
    pub ticker: &'a str,
    pub graham_results: &'a EvaluationReport,
    pub cached: bool,
}
