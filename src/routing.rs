//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    AppState,
    contribution::{
        contributions_by_friend_endpoint, create_contribution_endpoint,
        delete_contribution_endpoint, list_contributions_endpoint, update_contribution_endpoint,
    },
    dashboard::dashboard_endpoint,
    endpoints,
    friend::{
        create_friend_endpoint, delete_friend_endpoint, list_friends_endpoint,
        update_friend_endpoint,
    },
    fund::{create_fund_endpoint, delete_fund_endpoint, list_funds_endpoint, update_fund_endpoint},
    fund_contribution::{
        create_fund_contribution_endpoint, delete_fund_contribution_endpoint,
        list_fund_contributions_endpoint, update_fund_contribution_endpoint,
    },
    logging::logging_middleware,
    transaction::{
        bank_groups_endpoint, create_transaction_endpoint, delete_transaction_endpoint,
        list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::DASHBOARD, get(dashboard_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTIONS_BY_BANK, get(bank_groups_endpoint))
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::FUND_CONTRIBUTIONS,
            get(list_fund_contributions_endpoint).post(create_fund_contribution_endpoint),
        )
        .route(
            endpoints::FUND_CONTRIBUTION,
            put(update_fund_contribution_endpoint).delete(delete_fund_contribution_endpoint),
        )
        .route(
            endpoints::FRIENDS,
            get(list_friends_endpoint).post(create_friend_endpoint),
        )
        .route(
            endpoints::FRIEND,
            put(update_friend_endpoint).delete(delete_friend_endpoint),
        )
        .route(
            endpoints::FUNDS,
            get(list_funds_endpoint).post(create_fund_endpoint),
        )
        .route(
            endpoints::FUND,
            put(update_fund_endpoint).delete(delete_fund_endpoint),
        )
        .route(
            endpoints::CONTRIBUTIONS,
            get(list_contributions_endpoint).post(create_contribution_endpoint),
        )
        .route(
            endpoints::CONTRIBUTION,
            put(update_contribution_endpoint).delete(delete_contribution_endpoint),
        )
        .route(
            endpoints::CONTRIBUTIONS_BY_FRIEND,
            get(contributions_by_friend_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// The JSON body returned for routes that do not exist.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
