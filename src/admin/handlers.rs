use axum::{extract::State, response::Html, routing::get, Router};
use tracing::instrument;

use crate::{
    auth::{extractors::AdminSession, repo::User},
    error::AppError,
    health::repo::HealthRecord,
    pages,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin", get(admin_panel))
}

#[instrument(skip(state))]
pub async fn admin_panel(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Html<String>, AppError> {
    let users = User::list_all(&state.db).await?;
    let records = HealthRecord::list_all_with_owner(&state.db).await?;
    Ok(pages::admin_page(&session.username, &users, &records))
}
