//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, LedgerError};
use crate::error::AppError;
use crate::handlers::{TransactionCommand, TransactionHandler};
use crate::ledger::Ledger;

/// Shared state handed to every route
#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: Ledger,
    pub initial_balance: Decimal,
}

impl AppState {
    pub fn new(ledger: Ledger, initial_balance: Decimal) -> Self {
        Self {
            ledger,
            initial_balance,
        }
    }

    fn transaction_handler(&self) -> TransactionHandler {
        TransactionHandler::new(self.ledger.clone(), self.initial_balance)
    }
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub amount: Option<String>,
}

impl TransactionQuery {
    fn amount(&self) -> Result<Amount, AppError> {
        let raw = self
            .amount
            .as_deref()
            .ok_or_else(|| AppError::InvalidRequest("amount is required".to_string()))?;
        Ok(raw.parse()?)
    }
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub username: String,
    pub balance: Decimal,
    pub provisioned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub username: String,
    pub balance: Decimal,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/deposit", get(deposit).post(deposit))
        .route("/withdraw", get(withdraw).post(withdraw))
        .route("/balance", get(balance))
}

// =========================================================================
// /deposit
// =========================================================================

/// Deposit into an account, provisioning it on first use
async fn deposit(
    State(state): State<AppState>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Query(query) = query?;
    let command = TransactionCommand::deposit(query.username.clone(), query.amount()?);
    execute(&state, command).await
}

// =========================================================================
// /withdraw
// =========================================================================

/// Withdraw from an account, provisioning it on first use
async fn withdraw(
    State(state): State<AppState>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Query(query) = query?;
    let command = TransactionCommand::withdraw(query.username.clone(), query.amount()?);
    execute(&state, command).await
}

async fn execute(
    state: &AppState,
    command: TransactionCommand,
) -> Result<Json<TransactionResponse>, AppError> {
    let result = state.transaction_handler().execute(command).await?;

    Ok(Json(TransactionResponse {
        username: result.username,
        balance: result.balance,
        provisioned: result.provisioned,
    }))
}

// =========================================================================
// /balance
// =========================================================================

/// Current balance; unknown users are not provisioned here
async fn balance(
    State(state): State<AppState>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Result<Json<BalanceResponse>, AppError> {
    let Query(query) = query?;
    if query.username.trim().is_empty() {
        return Err(AppError::InvalidRequest("username must not be empty".to_string()));
    }

    let account = state
        .ledger
        .find(&query.username)
        .await?
        .ok_or(LedgerError::UserNotFound(query.username))?;

    Ok(Json(BalanceResponse {
        username: account.qualified_username,
        balance: account.balance,
    }))
}
