//! API Request Handlers

use alloy_primitives::U256;
use axum::extract::{rejection::JsonRejection, Json, State};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::middleware::{RateLimitConfig, RateLimiter};
use super::types::*;
use crate::core::assessment::{assess, Assessment, AssessmentInput};
use crate::core::legacy::categorize_record;
use crate::core::scorer::score;
use crate::models::config::ServiceConfig;
use crate::models::errors::AppError;
use crate::models::record::TransactionRecord;
use crate::models::signal::TransactionSignal;
use crate::models::types::{CategoryDescriptor, RiskVerdict};
use crate::utils::constants::APP_VERSION;
use crate::utils::telemetry::TelemetryCollector;

/// Events buffered in memory before the telemetry collector flushes
const TELEMETRY_BUFFER: usize = 1000;

/// Shared application state
pub struct AppState {
    pub telemetry: Arc<TelemetryCollector>,
    pub limiter: Arc<RateLimiter>,
    pub config: ServiceConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let telemetry = Arc::new(TelemetryCollector::with_config(
            config.telemetry_dir.clone(),
            TELEMETRY_BUFFER,
        ));
        let limiter = Arc::new(RateLimiter::new(RateLimitConfig::from(&config)));

        Self {
            telemetry,
            limiter,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Native value of the explorer record, zero for anything else
fn explorer_value(input: &AssessmentInput) -> U256 {
    match &input.transaction {
        Some(TransactionRecord::Explorer(tx)) => tx.value_wei(),
        _ => U256::ZERO,
    }
}

/// Assess and count in telemetry
fn assess_recorded(state: &AppState, input: &AssessmentInput) -> Assessment {
    let start = Instant::now();
    let assessment = assess(input);
    let latency_us = start.elapsed().as_micros() as u64;
    state
        .telemetry
        .record(&assessment, explorer_value(input), latency_us);
    assessment
}

fn body<T>(payload: Result<Json<T>, JsonRejection>, start: Instant) -> Result<T, ApiFailure> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            Err(ApiError::from(rejection).into_failure(elapsed_ms(start)))
        }
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Scoring & Categorization
// ============================================

pub async fn score_signal(
    State(_state): State<Arc<AppState>>,
    payload: Result<Json<TransactionSignal>, JsonRejection>,
) -> Result<Json<ApiResponse<RiskVerdict>>, ApiFailure> {
    let start = Instant::now();
    let signal = body(payload, start)?;

    let verdict = score(&signal);
    debug!(risk = verdict.risk, label = verdict.label.as_str(), "Scored signal");

    Ok(Json(ApiResponse::success(verdict, elapsed_ms(start))))
}

pub async fn categorize_transaction(
    State(_state): State<Arc<AppState>>,
    payload: Result<Json<TransactionRecord>, JsonRejection>,
) -> Result<Json<ApiResponse<CategoryDescriptor>>, ApiFailure> {
    let start = Instant::now();
    let record = body(payload, start)?;

    let descriptor = categorize_record(&record);
    debug!(
        category = descriptor.category.tag(),
        legacy = record.is_legacy(),
        "Categorized transaction"
    );

    Ok(Json(ApiResponse::success(descriptor, elapsed_ms(start))))
}

pub async fn assess_transaction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AssessmentInput>, JsonRejection>,
) -> Result<Json<ApiResponse<Assessment>>, ApiFailure> {
    let start = Instant::now();
    let input = body(payload, start)?;

    let assessment = assess_recorded(&state, &input);
    if assessment.should_record {
        info!(
            hash = assessment.hash.as_deref().unwrap_or("-"),
            category = assessment.descriptor.category.tag(),
            tier = assessment.persona.tier.as_str(),
            "Recordable transaction"
        );
    }

    Ok(Json(ApiResponse::success(assessment, elapsed_ms(start))))
}

// ============================================
// Batch Assessment
// ============================================

pub async fn batch_assess(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchAssessRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchAssessData>>, ApiFailure> {
    let start = Instant::now();
    let req = body(payload, start)?;

    if req.items.is_empty() {
        return Err(ApiError::bad_request("items array cannot be empty").into_failure(elapsed_ms(start)));
    }

    let max = state.config.max_batch_size;
    if req.items.len() > max {
        warn!(len = req.items.len(), max, "Batch too large");
        return Err(ApiError::from(AppError::batch_too_large(req.items.len(), max))
            .into_failure(elapsed_ms(start)));
    }

    let results: Vec<Assessment> = req
        .items
        .iter()
        .map(|input| assess_recorded(&state, input))
        .collect();

    let total_bad = results
        .iter()
        .filter(|a| a.verdict.as_ref().is_some_and(|v| v.is_bad()))
        .count();
    let total_recorded = results.iter().filter(|a| a.should_record).count();

    info!(
        total = results.len(),
        bad = total_bad,
        recorded = total_recorded,
        "Batch assessed"
    );

    let data = BatchAssessData {
        total_requested: req.items.len(),
        total_bad,
        total_recorded,
        results,
        processing_time_ms: elapsed_ms(start),
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();

    let data = StatsData {
        bad_rate_pct: stats.bad_rate_pct(),
        telemetry: stats,
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
