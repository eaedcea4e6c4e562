use crate::error::AllocationError;
use crate::models::{
    parse_amount, Allocation, BillCount, BillCounts, RecipientBreakdown, RecipientRequest,
};
use crate::report;
use crate::service::{breakdown, validate_manual_entry, Allocator};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state: the allocator and the accepted request sizes
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<Allocator>,
    pub max_amount: u32,
    pub max_body_bytes: usize,
}

/// Request body: a single amount
#[derive(Debug, Deserialize)]
pub struct BreakdownRequest {
    pub amount: BigDecimal,
}

#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub amount: u32,
    pub bills: Vec<BillCount>,
}

/// Request body: hand-entered bills for one amount
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub amount: BigDecimal,
    pub bills: BillCounts,
}

#[derive(Debug, Deserialize)]
pub struct RecipientInput {
    pub id: String,
    pub amount: BigDecimal,
}

/// Request body: recipients and the counted inventory
#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub recipients: Vec<RecipientInput>,
    pub inventory: BillCounts,
}

#[derive(Debug, Serialize)]
pub struct AllocateResponse {
    pub success: bool,
    pub message: String,
    /// Machine-readable failure kind, absent on success.
    pub outcome: Option<&'static str>,
    pub breakdowns: Option<Vec<RecipientBreakdown>>,
    pub remaining: Option<BillCounts>,
    pub computed_at: DateTime<Utc>,
}

impl AllocateResponse {
    fn failed(err: &AllocationError) -> Self {
        Self {
            success: false,
            message: format!("Error: {}", err),
            outcome: Some(err.code()),
            breakdowns: None,
            remaining: None,
            computed_at: Utc::now(),
        }
    }
}

fn error_response(err: &AllocationError) -> Response {
    let status = if err.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else if err.is_infeasible() {
        StatusCode::OK
    } else {
        tracing::error!("Allocation invariant violated: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(AllocateResponse::failed(err))).into_response()
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Greedy suggestion for one amount, no inventory limits
pub async fn suggest_breakdown(
    State(state): State<AppState>,
    Json(req): Json<BreakdownRequest>,
) -> Response {
    match parse_amount("amount", &req.amount, state.max_amount) {
        Ok(amount) => {
            let response = BreakdownResponse {
                amount,
                bills: breakdown(amount),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected breakdown request: {}", e);
            error_response(&e)
        }
    }
}

/// Checks manually edited bill counts against the expected amount
pub async fn validate_breakdown(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Response {
    match parse_amount("amount", &req.amount, state.max_amount) {
        Ok(amount) => (StatusCode::OK, Json(validate_manual_entry(&req.bills, amount))).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn run_allocation(state: &AppState, req: AllocateRequest) -> Result<Allocation, Response> {
    let requests = req
        .recipients
        .iter()
        .map(|r| RecipientRequest::from_raw(r.id.clone(), &r.amount, state.max_amount))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::warn!("Rejected allocation request: {}", e);
            error_response(&e)
        })?;

    let allocator = Arc::clone(&state.allocator);
    let inventory = req.inventory;
    let outcome = tokio::task::spawn_blocking(move || allocator.allocate(&requests, &inventory))
        .await
        .map_err(|e| {
            tracing::error!("Allocation task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })?;

    outcome.map_err(|e| error_response(&e))
}

/// Allocates bills from the shared inventory to every recipient
pub async fn allocate(State(state): State<AppState>, Json(req): Json<AllocateRequest>) -> Response {
    let recipient_count = req.recipients.len();
    match run_allocation(&state, req).await {
        Ok(allocation) => {
            let response = AllocateResponse {
                success: true,
                message: format!(
                    "Allocated bills to {} recipients in {} steps",
                    recipient_count, allocation.steps
                ),
                outcome: None,
                breakdowns: Some(allocation.breakdowns),
                remaining: Some(allocation.remaining),
                computed_at: Utc::now(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Same as `allocate`, rendered as a CSV payout sheet
pub async fn allocate_csv(State(state): State<AppState>, Json(req): Json<AllocateRequest>) -> Response {
    let allocation = match run_allocation(&state, req).await {
        Ok(allocation) => allocation,
        Err(response) => return response,
    };
    match report::payout_sheet(&allocation) {
        Ok(sheet) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], sheet).into_response(),
        Err(e) => {
            tracing::error!("Payout sheet export failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
