//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ClockResult, apply_clock, derive_payroll, generate_report, payroll_csv_string,
    suggest_thirty_percent,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockSlot, PayrollExtras, TimeLog, User};
use crate::store::Store;

use super::request::{ClockRequest, UserRequest};
use super::response::{ApiError, ApiErrorResponse, MessageResponse, ThirtyPercentResponse};
use super::state::AppState;

/// File name offered for the payroll CSV download.
const EXPORT_FILE_NAME: &str = "payroll_full_export.csv";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users_handler).post(save_user_handler))
        .route("/api/users/:id", delete(delete_user_handler))
        .route("/api/logs", get(list_logs_handler).post(save_log_handler))
        .route("/api/logs/today/:user_id", get(today_log_handler))
        .route("/api/clock", post(clock_handler))
        .route("/api/payroll/extras", post(save_extras_handler))
        .route("/api/payroll/extras/:user_id", get(get_extras_handler))
        .route("/api/payroll/thirty-percent", post(thirty_percent_handler))
        .route("/api/payroll/report", get(report_handler))
        .route("/api/payroll/export", get(export_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for GET /api/users.
async fn list_users_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().all_users() {
        Ok(users) => json_response(StatusCode::OK, users),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/users.
async fn save_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let keep_created_at = request.created_at.is_none();
    let mut user: User = request.into();
    if keep_created_at {
        match state.store().get_user(&user.id) {
            Ok(Some(existing)) => user.created_at = existing.created_at,
            Ok(None) => {}
            Err(err) => return error_response(correlation_id, err),
        }
    }

    match state.store().upsert_user(user) {
        Ok(saved) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %saved.id,
                role = ?saved.role,
                "User saved"
            );
            json_response(StatusCode::OK, MessageResponse::with_id("User saved", saved.id))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /api/users/:id.
async fn delete_user_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().delete_user(&id) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, user_id = %id, "User deleted");
            json_response(StatusCode::OK, MessageResponse::with_id("User deleted", id))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/logs.
async fn list_logs_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().all_logs() {
        Ok(logs) => json_response(StatusCode::OK, logs),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/logs.
///
/// Admin edit path: the log is stored as given, without clock sequencing.
async fn save_log_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeLog>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let log = match payload {
        Ok(Json(log)) => log,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let id = log.id.clone();
    let _guard = state.clock_locks().acquire(&log.user_id, log.date).await;
    match state.store().upsert_log(log) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, log_id = %id, "Log saved");
            json_response(StatusCode::OK, MessageResponse::with_id("Log saved", id))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/logs/today/:user_id.
///
/// Returns today's stored log, or an empty one that is not saved.
async fn today_log_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let today = Utc::now().date_naive();
    match state.store().get_log(&user_id, today) {
        Ok(Some(log)) => json_response(StatusCode::OK, log),
        Ok(None) => json_response(StatusCode::OK, TimeLog::open(user_id, today)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/clock.
async fn clock_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_clock(&state, &request.user_id, request.slot, Utc::now()).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %request.user_id,
                slot = %request.slot,
                date = %result.log.date,
                created = result.created,
                rule_id = %result.audit_step.rule_id,
                reasoning = %result.audit_step.reasoning,
                "Punch recorded"
            );
            json_response(StatusCode::OK, result.log)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Applies a punch for `user_id` at `now` against the stored day log.
///
/// The read, validation and write happen while holding the lock for the
/// user's day, so concurrent punches on the same day cannot both succeed
/// on the same slot.
async fn perform_clock(
    state: &AppState,
    user_id: &str,
    slot: ClockSlot,
    now: DateTime<Utc>,
) -> EngineResult<ClockResult> {
    if state.store().get_user(user_id)?.is_none() {
        return Err(EngineError::UserNotFound {
            id: user_id.to_string(),
        });
    }

    let date = now.date_naive();
    let _guard = state.clock_locks().acquire(user_id, date).await;

    let existing = state.store().get_log(user_id, date)?;
    let result = apply_clock(existing, user_id, slot, now)?;
    state.store().upsert_log(result.log.clone())?;

    Ok(result)
}

/// Handler for GET /api/payroll/extras/:user_id.
///
/// Returns the stored row, or zero defaults if none was saved.
async fn get_extras_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().get_extras(&user_id) {
        Ok(extras) => json_response(
            StatusCode::OK,
            extras.unwrap_or_else(|| PayrollExtras::empty(user_id)),
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/payroll/extras.
async fn save_extras_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollExtras>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let extras = match payload {
        Ok(Json(extras)) => extras,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let user_id = extras.user_id.clone();
    match state.store().upsert_extras(extras) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, user_id = %user_id, "Extras saved");
            json_response(StatusCode::OK, MessageResponse::with_id("Extras saved", user_id))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/payroll/thirty-percent.
async fn thirty_percent_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollExtras>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let extras = match payload {
        Ok(Json(extras)) => extras,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = extras.validate() {
        return error_response(correlation_id, err);
    }

    let user = match state.store().get_user(&extras.user_id) {
        Ok(Some(user)) => user,
        Ok(None) => {
            return error_response(
                correlation_id,
                EngineError::UserNotFound {
                    id: extras.user_id.clone(),
                },
            );
        }
        Err(err) => return error_response(correlation_id, err),
    };

    let result = suggest_thirty_percent(&user, &extras);
    info!(
        correlation_id = %correlation_id,
        user_id = %user.id,
        suggested = %result.suggested,
        "Thirty percent suggested"
    );
    json_response(
        StatusCode::OK,
        ThirtyPercentResponse {
            user_id: user.id,
            base_amount: result.base_amount,
            suggested: result.suggested,
            audit_step: result.audit_step,
        },
    )
}

type Snapshot = (Vec<User>, Vec<TimeLog>, Vec<PayrollExtras>);

fn snapshot(store: &dyn Store) -> EngineResult<Snapshot> {
    Ok((store.all_users()?, store.all_logs()?, store.all_extras()?))
}

/// Handler for GET /api/payroll/report.
async fn report_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll report request");

    let (users, logs, extras) = match snapshot(state.store()) {
        Ok(snapshot) => snapshot,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let report = generate_report(&users, &logs, &extras, Utc::now());
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        entries = report.entries.len(),
        logs_count = logs.len(),
        total_payroll = %report.summary.totals.total_payroll,
        warnings = report.audit_trace.warnings.len(),
        duration_us = duration.as_micros(),
        "Payroll report generated"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for GET /api/payroll/export.
async fn export_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    let csv = snapshot(state.store()).and_then(|(users, logs, extras)| {
        let derivation = derive_payroll(&users, &logs, &extras);
        payroll_csv_string(&derivation.entries)
    });

    match csv {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                bytes = body.len(),
                "Payroll export generated"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{PayrollReport, Role};
    use crate::store::{MemoryStore, seed_default_admin};
    use axum::{body::Body, http::Request};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::default();
        let store = Arc::new(MemoryStore::new());
        seed_default_admin(store.as_ref(), config.admin(), Utc::now()).unwrap();
        AppState::new(store)
    }

    fn add_user(state: &AppState, id: &str, pin: &str) {
        state
            .store()
            .upsert_user(User {
                id: id.to_string(),
                name: format!("User {}", id),
                email: format!("{}@example.com", id),
                password: None,
                pin: pin.to_string(),
                birthday: None,
                role: Role::User,
                hourly_rate: dec("100"),
                overtime_rate: dec("150"),
                created_at: Utc::now(),
            })
            .unwrap();
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_perform_clock_full_split_day() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");

        let first = perform_clock(&state, "u-1", ClockSlot::MorningIn, at(9, 0))
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.audit_step.rule_id, "clock_punch");

        for (slot, time) in [
            (ClockSlot::MorningOut, at(12, 0)),
            (ClockSlot::AfternoonIn, at(13, 0)),
            (ClockSlot::AfternoonOut, at(17, 0)),
        ] {
            let result = perform_clock(&state, "u-1", slot, time).await.unwrap();
            assert!(!result.created);
        }

        let stored = state
            .store()
            .get_log("u-1", at(0, 0).date_naive())
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first.log.id);
        assert_eq!(stored.afternoon.clock_out, Some(at(17, 0)));
    }

    #[tokio::test]
    async fn test_perform_clock_rejection_leaves_store_untouched() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");

        let err = perform_clock(&state, "u-1", ClockSlot::MorningOut, at(12, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SequenceViolation { .. }));
        assert!(state.store().all_logs().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_perform_clock_unknown_user() {
        let state = create_test_state();
        let err = perform_clock(&state, "ghost", ClockSlot::MorningIn, at(9, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_clock_endpoint_duplicate_returns_409() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        let router = create_router(state);
        let body = r#"{"userId": "u-1", "slot": "morningIn"}"#;

        let response = router
            .clone()
            .oneshot(post_json("/api/clock", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let log: TimeLog = body_json(response).await;
        assert!(log.morning.clock_in.is_some());
        assert_eq!(log.date, Utc::now().date_naive());

        let response = router.oneshot(post_json("/api/clock", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "DUPLICATE_PUNCH");
    }

    #[tokio::test]
    async fn test_clock_endpoint_sequence_violation_message() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        let router = create_router(state);

        let response = router
            .oneshot(post_json(
                "/api/clock",
                r#"{"userId": "u-1", "slot": "overtimeOut"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "SEQUENCE_VIOLATION");
        assert_eq!(error.message, "You must clock in (overtimeIn) first.");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/api/clock", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/api/clock", r#"{"slot": "morningIn"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("userId"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/clock")
                    .body(Body::from(r#"{"userId": "u-1", "slot": "morningIn"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_extras_default_when_missing() {
        let router = create_router(create_test_state());
        let response = router.oneshot(get("/api/payroll/extras/u-9")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let extras: PayrollExtras = body_json(response).await;
        assert_eq!(extras, PayrollExtras::empty("u-9"));
    }

    #[tokio::test]
    async fn test_thirty_percent_endpoint() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        let router = create_router(state);

        let response = router
            .oneshot(post_json(
                "/api/payroll/thirty-percent",
                r#"{"userId": "u-1", "manualRegularHours": 10, "transportFee": 5}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let suggestion: ThirtyPercentResponse = body_json(response).await;
        assert_eq!(suggestion.base_amount, dec("1005"));
        assert_eq!(suggestion.suggested, dec("301"));
        assert_eq!(suggestion.audit_step.rule_id, "thirty_percent_suggestion");
        assert_eq!(suggestion.audit_step.user_id, "u-1");
    }

    #[tokio::test]
    async fn test_thirty_percent_rejects_out_of_range_hours() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        let router = create_router(state);

        let response = router
            .oneshot(post_json(
                "/api/payroll/thirty-percent",
                r#"{"userId": "u-1", "manualRegularHours": "79228162514264337593543950335"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_EXTRAS");
    }

    #[tokio::test]
    async fn test_thirty_percent_unknown_user_returns_404() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json(
                "/api/payroll/thirty-percent",
                r#"{"userId": "ghost"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_excludes_admin() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        perform_clock(&state, "u-1", ClockSlot::MorningIn, at(9, 0))
            .await
            .unwrap();
        perform_clock(&state, "u-1", ClockSlot::AfternoonOut, at(17, 0))
            .await
            .unwrap();
        let router = create_router(state);

        let response = router.oneshot(get("/api/payroll/report")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let report: PayrollReport = body_json(response).await;
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].total_regular_hours, dec("7"));
        assert_eq!(report.summary.totals.total_payroll, dec("700"));
    }

    #[tokio::test]
    async fn test_export_returns_csv() {
        let state = create_test_state();
        add_user(&state, "u-1", "1111");
        let router = create_router(state);

        let response = router.oneshot(get("/api/payroll/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        assert!(
            response
                .headers()
                .get("content-disposition")
                .unwrap()
                .to_str()
                .unwrap()
                .contains(EXPORT_FILE_NAME)
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Name,Days,"));
        assert_eq!(
            lines.next().unwrap(),
            "User u-1,0,0.00,0.00,0.00,0.00,0.00,0.00,0.00,0.00,0.00,0.00"
        );
    }
}
