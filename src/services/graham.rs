// src/services/graham.rs
//! Graham value-investing checklist.
//!
//! [`evaluate`] is total: any combination of missing, zero or non-finite
//! inputs still yields all checks, with failing verdicts where data is absent.

use log::debug;

use crate::models::{CheckDisplay, CheckResult, EpsHistory, EvaluationReport, FinancialSnapshot};
use crate::services::format::{human_readable_number, percent1, round2};

pub const CURRENT_RATIO: &str = "Current Ratio ≥ 2";
pub const DEBT_VS_NET_CURRENT_ASSETS: &str = "Long-term Debt ≤ Net Current Assets";
pub const EPS_GROWTH: &str = "EPS Growth ≥ 14.5% in 5 years";
pub const POSITIVE_EPS: &str = "Positive EPS for 5 years";
pub const DIVIDEND_RECORD: &str = "20-Year Dividend Record";
pub const PE_RATIO: &str = "P/E ≤ 15";
pub const PB_RATIO: &str = "P/B ≤ 1.5 or PE×PB ≤ 22.5";

/// Report keys, in the order they always appear.
pub const CHECK_NAMES: [&str; 7] = [
    CURRENT_RATIO,
    DEBT_VS_NET_CURRENT_ASSETS,
    EPS_GROWTH,
    POSITIVE_EPS,
    DIVIDEND_RECORD,
    PE_RATIO,
    PB_RATIO,
];

const MIN_CURRENT_RATIO: f64 = 2.0;
const EPS_YEARS: usize = 5;
const REQUIRED_EPS_GROWTH: f64 = 0.145;
const MAX_PE: f64 = 15.0;
const MAX_PB: f64 = 1.5;
const MAX_PE_TIMES_PB: f64 = 22.5;

pub fn evaluate(
    snapshot: &FinancialSnapshot,
    eps_history: &[f64],
    dividends_ok: bool,
) -> EvaluationReport {
    let current_assets = finite_or_zero(snapshot.current_assets);
    let current_liabilities = finite_or_zero(snapshot.current_liabilities);
    let pe = present(snapshot.trailing_pe);

    let mut report = EvaluationReport::new();
    report.push(CURRENT_RATIO, current_ratio(current_assets, current_liabilities));
    report.push(
        DEBT_VS_NET_CURRENT_ASSETS,
        debt_vs_net_current_assets(current_assets, current_liabilities, snapshot.long_term_debt),
    );
    report.push(EPS_GROWTH, eps_growth(eps_history));
    report.push(POSITIVE_EPS, positive_eps(eps_history));
    report.push(DIVIDEND_RECORD, CheckResult::new(CheckDisplay::Flag(dividends_ok), dividends_ok));
    report.push(PE_RATIO, pe_ratio(pe));
    report.push(
        PB_RATIO,
        pb_ratio(pe, present(snapshot.price), present(snapshot.book_value_per_share)),
    );
    report
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn current_ratio(assets: f64, liabilities: f64) -> CheckResult {
    let ratio = if liabilities != 0.0 { assets / liabilities } else { 0.0 };
    if !ratio.is_finite() {
        return CheckResult::new("N/A", false);
    }
    CheckResult::new(CheckDisplay::Number(round2(ratio)), ratio >= MIN_CURRENT_RATIO)
}

fn debt_vs_net_current_assets(assets: f64, liabilities: f64, long_term_debt: f64) -> CheckResult {
    let ltd = finite_or_zero(long_term_debt);
    let nca = assets - liabilities;
    CheckResult::new(
        format!(
            "LTD: {}, NCA: {}",
            human_readable_number(Some(ltd)),
            human_readable_number(Some(nca))
        ),
        ltd <= nca,
    )
}

fn eps_growth(eps_history: &[f64]) -> CheckResult {
    if eps_history.len() < EPS_YEARS {
        return CheckResult::new("N/A (Insufficient EPS history)", false);
    }

    // Window is the first five entries, not the tail of a longer series.
    let oldest = eps_history[0];
    let newest = eps_history[EPS_YEARS - 1];
    debug!(
        "EPS window {:?}: oldest={}, newest={}",
        &eps_history[..EPS_YEARS],
        oldest,
        newest
    );

    if oldest == 0.0 || !oldest.is_finite() || !newest.is_finite() {
        return CheckResult::new("N/A", false);
    }

    let growth = (newest - oldest) / oldest.abs();
    CheckResult::new(percent1(growth), growth >= REQUIRED_EPS_GROWTH)
}

fn positive_eps(eps_history: &[f64]) -> CheckResult {
    if eps_history.len() < EPS_YEARS {
        return CheckResult::new(CheckDisplay::Series(Vec::new()), false);
    }

    let window: EpsHistory = eps_history[..EPS_YEARS].to_vec();
    let all_positive = window.iter().all(|eps| *eps >= 0.0);
    CheckResult::new(CheckDisplay::Series(window), all_positive)
}

fn pe_ratio(pe: Option<f64>) -> CheckResult {
    match pe {
        // A zero P/E still counts as present for the verdict.
        Some(pe) if pe == 0.0 => CheckResult::new("N/A", true),
        Some(pe) => CheckResult::new(CheckDisplay::Number(round2(pe)), pe <= MAX_PE),
        None => CheckResult::new("N/A", false),
    }
}

fn pb_ratio(pe: Option<f64>, price: Option<f64>, book_value_per_share: Option<f64>) -> CheckResult {
    let pb = match (price, book_value_per_share) {
        (Some(price), Some(bvps)) if price != 0.0 && bvps != 0.0 => Some(price / bvps),
        _ => None,
    };

    match (pe.filter(|pe| *pe != 0.0), pb) {
        (Some(pe), Some(pb)) => {
            let product = pe * pb;
            CheckResult::new(
                format!("P/B: {:.2}, PE×PB: {:.2}", pb, product),
                pb <= MAX_PB || product <= MAX_PE_TIMES_PB,
            )
        }
        _ => CheckResult::new("N/A (missing PE or BVPS)", false),
    }
}
