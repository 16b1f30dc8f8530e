//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/friends/{friend_id}',
//! use [format_endpoint].

/// The route reporting whether the server is up.
pub const HEALTH: &str = "/api/health";
/// The route for the dashboard summary.
pub const DASHBOARD: &str = "/api/dashboard";
/// The route to access transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for transactions grouped by bank.
pub const TRANSACTIONS_BY_BANK: &str = "/api/transactions/by-bank";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to access fund contributions.
pub const FUND_CONTRIBUTIONS: &str = "/api/fund-contributions";
/// The route to access a single fund contribution.
pub const FUND_CONTRIBUTION: &str = "/api/fund-contributions/{fund_contribution_id}";
/// The route to access friends.
pub const FRIENDS: &str = "/api/friends";
/// The route to access a single friend.
pub const FRIEND: &str = "/api/friends/{friend_id}";
/// The route to access funds.
pub const FUNDS: &str = "/api/funds";
/// The route to access a single fund.
pub const FUND: &str = "/api/funds/{fund_id}";
/// The route to access contributions.
pub const CONTRIBUTIONS: &str = "/api/contributions";
/// The route to access a single contribution.
pub const CONTRIBUTION: &str = "/api/contributions/{contribution_id}";
/// The route for a single friend's contributions.
pub const CONTRIBUTIONS_BY_FRIEND: &str = "/api/contributions/by-friend/{friend_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/api/friends/{friend_id}', '{friend_id}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
