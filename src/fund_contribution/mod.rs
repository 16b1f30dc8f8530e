//! Fund contribution management.
//!
//! Fund contributions are payments into the shared mutual fund pot. They are
//! listed in ascending date order with a running total per row.

mod core;
mod create_fund_contribution_endpoint;
mod delete_fund_contribution_endpoint;
mod list_fund_contributions_endpoint;
mod update_fund_contribution_endpoint;

pub use core::{
    FundContribution, NewFundContribution, create_fund_contribution,
    create_fund_contribution_table, get_fund_contributions,
};
pub use create_fund_contribution_endpoint::create_fund_contribution_endpoint;
pub use delete_fund_contribution_endpoint::delete_fund_contribution_endpoint;
pub use list_fund_contributions_endpoint::list_fund_contributions_endpoint;
pub use update_fund_contribution_endpoint::update_fund_contribution_endpoint;
