//! Simple REST API server example for the settlement engine.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `POST /settlements` - Calculate a settlement from a list of payments
//! - `GET /transfers` - List all transfers of the current settlement
//! - `GET /transfers/:debtor/:creditor` - Directed amount between two people
//!
//! ## Example Usage
//!
//! ```bash
//! # Calculate
//! curl -X POST http://localhost:3000/settlements \
//!   -H "Content-Type: application/json" \
//!   -d '[{"name": "Anna", "paid": "55.00"}, {"name": "Bob", "paid": "36.00"}, {"name": "Carol", "paid": "0"}, {"name": "Dave", "paid": "25.00"}]'
//!
//! # All transfers
//! curl http://localhost:3000/transfers
//!
//! # Directed pair
//! curl http://localhost:3000/transfers/Carol/Anna
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use costsplit_rs::{Engine, Payment, PersonName, SettlementError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

// === Request/Response DTOs ===

/// One payment in the settlement request body:
/// ```json
/// {"name": "Anna", "paid": "55.00"}
/// ```
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub name: String,
    pub paid: Decimal,
}

impl PaymentRequest {
    /// Converts the request DTO into the internal payment type.
    fn into_payment(self) -> Payment {
        Payment::new(self.name, self.paid)
    }
}

/// Response body for one directed transfer.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub debtor: String,
    pub creditor: String,
    pub amount: Decimal,
}

/// Response body for the full settlement.
#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub equal_share: Decimal,
    pub transfers: Vec<TransferResponse>,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the settlement engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

// === Error Handling ===

/// Wrapper for converting `SettlementError` into HTTP responses.
pub struct AppError(SettlementError);

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            SettlementError::BadPayment { .. } => (StatusCode::BAD_REQUEST, "BAD_PAYMENT"),
            SettlementError::DuplicatePerson { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_PERSON")
            }
            SettlementError::NotCalculated => (StatusCode::CONFLICT, "NOT_CALCULATED"),
            SettlementError::UnknownPerson { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_PERSON"),
            SettlementError::NoParticipants => (StatusCode::BAD_REQUEST, "NO_PARTICIPANTS"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /settlements - Calculate a new settlement.
async fn create_settlement(
    State(state): State<AppState>,
    Json(request): Json<Vec<PaymentRequest>>,
) -> Result<StatusCode, AppError> {
    let payments: Vec<Payment> = request.into_iter().map(PaymentRequest::into_payment).collect();
    state.engine.calculate(&payments)?;
    Ok(StatusCode::CREATED)
}

/// GET /transfers - List all transfers of the current settlement.
async fn list_transfers(
    State(state): State<AppState>,
) -> Result<Json<SettlementResponse>, AppError> {
    let equal_share = state.engine.equal_share()?;
    let transfers = state
        .engine
        .transfers()?
        .into_iter()
        .map(|t| TransferResponse {
            debtor: t.debtor.to_string(),
            creditor: t.creditor.to_string(),
            amount: t.amount,
        })
        .collect();

    Ok(Json(SettlementResponse {
        equal_share,
        transfers,
    }))
}

/// GET /transfers/:debtor/:creditor - Directed amount between two people.
async fn get_transfer(
    State(state): State<AppState>,
    Path((debtor, creditor)): Path<(String, String)>,
) -> Result<Json<TransferResponse>, AppError> {
    let debtor = PersonName::from(debtor);
    let creditor = PersonName::from(creditor);
    let amount = state.engine.amount_owed_between(&debtor, &creditor)?;

    Ok(Json(TransferResponse {
        debtor: debtor.to_string(),
        creditor: creditor.to_string(),
        amount,
    }))
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settlements", post(create_settlement))
        .route("/transfers", get(list_transfers))
        .route("/transfers/{debtor}/{creditor}", get(get_transfer))
        .with_state(state)
}

// === Main ===

#[tokio::main]
async fn main() {
    let state = AppState {
        engine: Arc::new(Engine::new()),
    };

    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Settlement API server running on http://127.0.0.1:3000");
    println!();
    println!("Endpoints:");
    println!("  POST /settlements                  - Calculate a settlement");
    println!("  GET  /transfers                    - List all transfers");
    println!("  GET  /transfers/:debtor/:creditor  - Directed pair amount");

    axum::serve(listener, app).await.unwrap();
}
