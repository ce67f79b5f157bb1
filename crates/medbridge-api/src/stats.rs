use axum::{Json, extract::State};

use medbridge_store::stats;
use medbridge_types::api::StatsReport;

use crate::{ApiError, AppState, run_blocking};

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsReport>, ApiError> {
    let store = state.store.clone();
    let report = run_blocking(move || stats::stats(store.as_ref())).await?;
    Ok(Json(report))
}
