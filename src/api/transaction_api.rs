//! 交易提交与查询 API

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{Transaction, TransferRequest},
    error::AppError,
};

pub const COMMIT_SUCCESS_MESSAGE: &str = "transaction committed successfully";

/// POST / - 提交一笔转账
///
/// 请求体无法解析或校验失败返回 400，其余失败返回 500
pub async fn commit_transaction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<&'static str>), AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected undecodable transfer request");
        AppError::bad_request(e.body_text())
    })?;

    tracing::info!(
        currency = %request.currency,
        amount = request.amount,
        to = %request.to,
        "Committing transaction"
    );

    let ctx = state.request_context();
    state.service.commit_transaction(&ctx, request).await?;

    Ok((StatusCode::CREATED, Json(COMMIT_SUCCESS_MESSAGE)))
}

/// GET /transactions - 全部已提交交易
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let ctx = state.request_context();
    let transactions = state.service.list_transactions(&ctx).await?;
    Ok(Json(transactions))
}

/// GET /healthz
pub async fn healthz() -> Json<&'static str> {
    Json("ok")
}
