use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use graham_screener::config::Config;
use graham_screener::routes;
use graham_screener::services::market_data::MarketData;
use graham_screener::services::screener::GrahamScreener;
use graham_screener::state::AppState;
use log::info;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logger initialized. Starting the application...");

    let config = Config::from_env()?;
    info!("Using PORT: {}", config.port);

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let screener = GrahamScreener::new(MarketData::new()?);
    let state = Arc::new(AppState::new(Arc::new(screener)));

    let cors = warp::cors()
        .allow_origins(config.allowed_origins.iter().map(String::as_str))
        .allow_credentials(true)
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "OPTIONS"]);
    info!("CORS allowed origins: {:?}", config.allowed_origins);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
