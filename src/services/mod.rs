// src/services/mod.rs
pub mod cache;
pub mod format;
pub mod graham;
pub mod http;
pub mod market_data;
pub mod marketwatch;
pub mod screener;
pub mod yahoo;
