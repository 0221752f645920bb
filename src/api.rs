//! REST API router.
//!
//! Routes: health, submit limit order, order book view, trade history, trade
//! lookup, snapshot re-initialization (admin). Request validation lives here:
//! only positive prices and quantities ever reach the engine. Uses Extension
//! for state so the router is `Router<()>` and works with `into_make_service()`.
//!
//! The engine sits behind one `RwLock`: submit and init take the write guard
//! for the whole call (single writer), queries share the read guard.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use crate::auth::{self, AuthConfig, AuthUser};
use crate::engine::Engine;
use crate::ledger::DEFAULT_TRADE_LIMIT;
use crate::snapshot::Snapshot;
use crate::types::{Order, Side, TradeId};

/// Shared app state: one engine per process.
#[derive(Clone, Default)]
pub struct AppState {
    pub engine: Arc<RwLock<Engine>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the router. Everything except `/health` sits behind the key check.
pub fn create_router(state: AppState, auth_config: AuthConfig) -> Router<()> {
    let protected = Router::new()
        .route("/orderbook", get(get_order_book))
        .route("/orderbook/init", post(init_order_book))
        .route("/orders/limit", post(submit_limit_order))
        .route("/tradehistory", get(get_trade_history))
        .route("/trades/:id", get(get_trade))
        .layer(axum::middleware::from_fn_with_state(
            auth_config,
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(Extension(state))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Order intent as submitted by clients. Prices and quantities are decimal
/// strings on the wire.
#[derive(serde::Deserialize)]
struct LimitOrderRequest {
    side: Side,
    price: Decimal,
    quantity: Decimal,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

async fn submit_limit_order(
    Extension(state): Extension<AppState>,
    Json(request): Json<LimitOrderRequest>,
) -> Response {
    if request.price <= Decimal::ZERO {
        return bad_request("'price' must be greater than 0");
    }
    if request.quantity <= Decimal::ZERO {
        return bad_request("'quantity' must be greater than 0");
    }
    let order = Order::new(request.side, request.price, request.quantity);
    let id = state.engine.write().expect("lock").submit_order(order);
    (StatusCode::OK, Json(serde_json::json!({ "id": id }))).into_response()
}

async fn get_order_book(Extension(state): Extension<AppState>) -> Response {
    let depth = state.engine.read().expect("lock").depth();
    (StatusCode::OK, Json(depth)).into_response()
}

#[derive(serde::Deserialize)]
struct TradeHistoryParams {
    limit: Option<usize>,
}

async fn get_trade_history(
    Extension(state): Extension<AppState>,
    Query(params): Query<TradeHistoryParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_TRADE_LIMIT);
    let trades = state.engine.read().expect("lock").recent_trades(limit);
    (StatusCode::OK, Json(trades)).into_response()
}

async fn get_trade(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> Response {
    match state.engine.read().expect("lock").trade(TradeId(id)) {
        Some(trade) => (StatusCode::OK, Json(trade)).into_response(),
        None => (StatusCode::NOT_FOUND, "Trade not found").into_response(),
    }
}

async fn init_order_book(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(snapshot): Json<Snapshot>,
) -> Response {
    if let Err(forbidden) = auth::require_admin(&user) {
        return forbidden;
    }
    match state.engine.write().expect("lock").load_snapshot(&snapshot) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Order book replaced from snapshot" })),
        )
            .into_response(),
        Err(e) => bad_request(&e),
    }
}
