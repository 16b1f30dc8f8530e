//! JSON endpoints for fund CRUD.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::FundId,
    fund::core::{Fund, NewFund, create_fund, delete_fund, get_all_funds, update_fund},
};

/// The state needed to manage funds.
#[derive(Debug, Clone)]
pub struct FundState {
    /// The database connection for managing funds.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for FundState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FundState {
    fn lock_connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// A route handler for listing all funds.
pub async fn list_funds_endpoint(
    State(state): State<FundState>,
) -> Result<Json<Vec<Fund>>, Error> {
    let connection = state.lock_connection()?;

    Ok(Json(get_all_funds(&connection)?))
}

/// A route handler for creating a new fund.
pub async fn create_fund_endpoint(
    State(state): State<FundState>,
    Json(new_fund): Json<NewFund>,
) -> Result<(StatusCode, Json<Fund>), Error> {
    let connection = state.lock_connection()?;

    let fund = create_fund(new_fund, &connection)?;

    Ok((StatusCode::CREATED, Json(fund)))
}

/// A route handler for replacing the fields of a fund.
pub async fn update_fund_endpoint(
    State(state): State<FundState>,
    Path(fund_id): Path<FundId>,
    Json(new_fund): Json<NewFund>,
) -> Result<Json<Fund>, Error> {
    let connection = state.lock_connection()?;

    let fund = update_fund(fund_id, new_fund, &connection)?;

    Ok(Json(fund))
}

/// A route handler for deleting a fund by its ID.
pub async fn delete_fund_endpoint(
    State(state): State<FundState>,
    Path(fund_id): Path<FundId>,
) -> Result<StatusCode, Error> {
    let connection = state.lock_connection()?;

    delete_fund(fund_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{db::initialize, fund::NewFund};

    use super::{FundState, create_fund_endpoint, list_funds_endpoint};

    #[tokio::test]
    async fn created_fund_appears_in_listing() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = FundState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        create_fund_endpoint(
            State(state.clone()),
            Json(NewFund {
                name: "Index 50".to_owned(),
                price: None,
                fund_type: Some("equity".to_owned()),
                description: None,
                purchase_date: None,
            }),
        )
        .await
        .expect("Could not create fund");

        let Json(funds) = list_funds_endpoint(State(state))
            .await
            .expect("Could not list funds");
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].name, "Index 50");
    }
}
