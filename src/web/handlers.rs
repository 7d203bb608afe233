//! HTTP request handlers.

use super::AppState;
use crate::lookup::LookupError;
use crate::monitor::{self, SelectionKind};
use crate::probe::{self, Sample};
use crate::store::{ApplyError, ApplyRequest, ReviewAction, ReviewError, SiteDocument};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

// ============================================================================
// API: Monitor session
// ============================================================================

pub async fn handle_monitor_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.monitor.snapshot())
}

/// Target selection body: one of the preset catalogs, or a free-form list.
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TargetsRequest {
    Domestic,
    International,
    Custom {
        #[serde(default)]
        targets: String,
    },
}

pub async fn handle_set_targets(
    State(state): State<AppState>,
    Json(req): Json<TargetsRequest>,
) -> impl IntoResponse {
    // Preset selections follow the operator-edited route catalogs.
    let (selection, targets) = match req {
        TargetsRequest::Domestic => (
            SelectionKind::Domestic,
            state.site.load().route_config.domestic,
        ),
        TargetsRequest::International => (
            SelectionKind::International,
            state.site.load().route_config.international,
        ),
        TargetsRequest::Custom { targets } => {
            (SelectionKind::Custom, monitor::parse_targets(&targets))
        }
    };

    if targets.is_empty() {
        return (StatusCode::BAD_REQUEST, "No valid targets").into_response();
    }

    state.monitor.set_targets(selection, targets);
    Json(state.monitor.snapshot()).into_response()
}

pub async fn handle_start(State(state): State<AppState>) -> impl IntoResponse {
    match state.monitor.start() {
        Ok(()) => Json(state.monitor.snapshot()).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

pub async fn handle_stop(State(state): State<AppState>) -> impl IntoResponse {
    state.monitor.stop();
    Json(state.monitor.snapshot())
}

pub async fn handle_reset(State(state): State<AppState>) -> impl IntoResponse {
    state.monitor.reset();
    Json(state.monitor.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct IntervalRequest {
    pub interval: u64,
}

pub async fn handle_set_interval(
    State(state): State<AppState>,
    Json(req): Json<IntervalRequest>,
) -> impl IntoResponse {
    match state.monitor.set_interval(req.interval) {
        Ok(()) => Json(state.monitor.snapshot()).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

pub async fn handle_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let snapshot = state.monitor.snapshot();

    match query.format.as_deref() {
        Some("csv") => {
            let rows = monitor::build_rows(&snapshot);
            match monitor::to_csv(&rows) {
                Ok(bytes) => {
                    let disposition = format!(
                        "attachment; filename=\"{}\"",
                        monitor::report_filename("csv")
                    );
                    (
                        [
                            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                            (header::CONTENT_DISPOSITION, disposition),
                        ],
                        bytes,
                    )
                        .into_response()
                }
                Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
            }
        }
        _ => {
            let report = monitor::build_report(&snapshot);
            let disposition = format!(
                "attachment; filename=\"{}\"",
                monitor::report_filename("json")
            );
            (
                [(header::CONTENT_DISPOSITION, disposition)],
                Json(report),
            )
                .into_response()
        }
    }
}

// ============================================================================
// API: One-shot check
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub domain: String,
    pub ping: Sample,
    pub status: &'static str,
}

pub async fn handle_check(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> impl IntoResponse {
    if req.domain.is_empty() {
        return (StatusCode::BAD_REQUEST, "Domain is required").into_response();
    }

    let ping = state.probe.probe(&req.domain).await;
    let status = if probe::is_success(ping) {
        "online"
    } else {
        "offline"
    };

    Json(CheckResponse {
        domain: req.domain,
        ping,
        status,
    })
    .into_response()
}

// ============================================================================
// API: Site content
// ============================================================================

pub async fn handle_get_site(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.site.load())
}

pub async fn handle_save_site(
    State(state): State<AppState>,
    Json(doc): Json<SiteDocument>,
) -> impl IntoResponse {
    match state.site.save(&doc) {
        Ok(()) => Json(doc).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// ============================================================================
// API: Link applications
// ============================================================================

pub async fn handle_get_links(State(state): State<AppState>) -> impl IntoResponse {
    match state.links.load() {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

pub async fn handle_apply_link(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> impl IntoResponse {
    match state.links.submit(req) {
        Ok(application) => Json(application).into_response(),
        Err(err) => {
            let status = match err {
                ApplyError::MissingField | ApplyError::NameTooLong => StatusCode::BAD_REQUEST,
                ApplyError::Duplicate => StatusCode::CONFLICT,
                ApplyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, err.to_string()).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub id: String,
    pub action: Option<ReviewAction>,
}

pub async fn handle_review_link(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> impl IntoResponse {
    let action = match req.action {
        Some(action) if !req.id.is_empty() => action,
        _ => return (StatusCode::BAD_REQUEST, "Missing required fields").into_response(),
    };

    match state.links.review(&req.id, action) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ReviewError::NotFound) => {
            (StatusCode::NOT_FOUND, "Application not found").into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

// ============================================================================
// API: IP lookup
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IpQuery {
    #[serde(default)]
    pub ip: Option<String>,
}

pub async fn handle_ip_lookup(
    State(state): State<AppState>,
    Query(query): Query<IpQuery>,
) -> impl IntoResponse {
    let ip = query.ip.as_deref().filter(|s| !s.is_empty());

    match state.lookup.lookup(ip).await {
        Ok(record) => Json(record).into_response(),
        Err(LookupError::UpstreamStatus(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, "Failed to fetch IP data").into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
