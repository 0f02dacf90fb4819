// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::analyze::{analyze, get_root, AnalyzeQuery};
use crate::handlers::error::ApiError;
use crate::state::AppState;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = StatusCode::BAD_REQUEST;
        message = "Missing or invalid query parameter: ticker".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let root_route = warp::path::end().and(warp::get()).and_then(get_root);

    let analyze_route = warp::path!("analyze")
        .and(warp::get())
        .and(warp::query::<AnalyzeQuery>())
        .and(state_filter)
        .and_then(analyze);

    info!("All routes configured successfully.");

    root_route.or(analyze_route).recover(handle_rejection)
}
