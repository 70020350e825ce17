use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use time::{macros::format_description, OffsetDateTime};
use tracing::{info, instrument};

use crate::{
    auth::extractors::{ApiSession, PageSession},
    error::AppError,
    health::{
        dto::{AnalyzeRequest, AnalyzeResponse},
        repo::HealthRecord,
        scoring::assess,
    },
    pages,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/analyze", post(analyze))
        .route("/records", get(records))
}

pub async fn home(PageSession(session): PageSession) -> Html<String> {
    pages::home_page(&session.username)
}

#[instrument(skip(state, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let vitals = payload.vitals();
    let assessment = assess(&vitals);
    let timestamp = current_timestamp();

    let record = HealthRecord::save(
        &state.db,
        session.user_id,
        &vitals,
        assessment.score,
        assessment.level,
        assessment.recommendation(),
        &timestamp,
    )
    .await?;

    info!(
        user_id = session.user_id,
        record_id = record.id,
        score = assessment.score,
        level = %assessment.level,
        "analysis recorded"
    );

    Ok(Json(AnalyzeResponse {
        risk_score: assessment.score,
        risk_level: assessment.level,
        recommendation: assessment.recommendation(),
    }))
}

#[instrument(skip(state))]
pub async fn records(
    State(state): State<AppState>,
    PageSession(session): PageSession,
) -> Result<Html<String>, AppError> {
    let records = HealthRecord::list_for_user(&state.db, session.user_id).await?;
    Ok(pages::records_page(&session.username, &records))
}

/// `YYYY-MM-DD HH:MM:SS`, local wall-clock time when the offset is known,
/// otherwise UTC (the usual case on a multi-threaded runtime).
fn current_timestamp() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&format).expect("well-formed format description")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_the_fixed_format() {
        let stamp = current_timestamp();
        // e.g. 2024-06-01 09:30:00
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[7..8], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
        assert_eq!(&stamp[16..17], ":");
        assert!(stamp
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == ' ' || c == ':'));
    }
}
