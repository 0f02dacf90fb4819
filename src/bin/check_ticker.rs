use std::env;

use dotenv::dotenv;
use graham_screener::handlers::analyze::normalize_ticker;
use graham_screener::services::graham::evaluate;
use graham_screener::services::market_data::MarketData;
use log::info;
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: check_ticker <TICKER>"))?;
    let ticker = normalize_ticker(&raw)?;
    info!("Checking {} against live data...", ticker);

    let data = MarketData::new()?;
    let snapshot = data.snapshot(&ticker).await;
    let eps_history = data.eps_history(&ticker).await;
    let dividends_ok = data.dividends_stable(&ticker).await;
    let report = evaluate(&snapshot, &eps_history, dividends_ok);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "ticker": ticker,
            "snapshot": snapshot,
            "eps_history": eps_history,
            "dividends_ok": dividends_ok,
            "graham_results": report,
            "all_passed": report.all_passed(),
        }))?
    );
    Ok(())
}
