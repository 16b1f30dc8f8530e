//! Fundbook is a JSON API for keeping personal-finance records: friends,
//! funds, contributions, and bank transactions.
//!
//! All balance and filtering logic lives in the [ledger] module so that every
//! endpoint agrees on which transaction kinds count as money in, which count
//! as money out, and which records a set of filter criteria selects.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use serde_json::json;
use tokio::signal;

mod app_state;
mod contribution;
mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod friend;
mod fund;
mod fund_contribution;
pub mod ledger;
mod logging;
mod money;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::database_id::FriendId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A filter criterion had a value outside its valid range.
    ///
    /// Invalid criteria are rejected up front, never silently clamped.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidCriteria(u8),

    /// A negative amount was used to create or update a record.
    ///
    /// Amounts are stored as non-negative magnitudes; direction comes from
    /// the transaction kind, never from the sign of the amount.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    /// Per-bank balances did not sum to the balance of the whole set.
    ///
    /// This indicates a programming defect in the aggregation code, not a
    /// recoverable runtime condition.
    #[error("bank balances sum to {got} but the set balance is {want}")]
    AggregationInvariantViolated {
        /// The balance of the full transaction set.
        want: Decimal,
        /// The sum of the per-bank balances.
        got: Decimal,
    },

    /// The friend ID used to create a contribution did not match a valid friend.
    #[error("the friend ID {0} does not refer to a valid friend")]
    InvalidFriend(FriendId),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a fund contribution that does not exist
    #[error("tried to delete a fund contribution that is not in the database")]
    DeleteMissingFundContribution,

    /// Tried to update a fund contribution that does not exist
    #[error("tried to update a fund contribution that is not in the database")]
    UpdateMissingFundContribution,

    /// Tried to delete a friend that does not exist
    #[error("tried to delete a friend that is not in the database")]
    DeleteMissingFriend,

    /// Tried to update a friend that does not exist
    #[error("tried to update a friend that is not in the database")]
    UpdateMissingFriend,

    /// Tried to delete a fund that does not exist
    #[error("tried to delete a fund that is not in the database")]
    DeleteMissingFund,

    /// Tried to update a fund that does not exist
    #[error("tried to update a fund that is not in the database")]
    UpdateMissingFund,

    /// Tried to delete a contribution that does not exist
    #[error("tried to delete a contribution that is not in the database")]
    DeleteMissingContribution,

    /// Tried to update a contribution that does not exist
    #[error("tried to update a contribution that is not in the database")]
    UpdateMissingContribution,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidCriteria(_) | Error::NegativeAmount(_) | Error::InvalidFriend(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound
            | Error::DeleteMissingTransaction
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingFundContribution
            | Error::UpdateMissingFundContribution
            | Error::DeleteMissingFriend
            | Error::UpdateMissingFriend
            | Error::DeleteMissingFund
            | Error::UpdateMissingFund
            | Error::DeleteMissingContribution
            | Error::UpdateMissingContribution => StatusCode::NOT_FOUND,
            // Any errors that are not handled above are not intended to be
            // shown to the client in detail.
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an internal error occurred" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
