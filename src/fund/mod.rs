//! Mutual fund management.

mod core;
mod endpoints;

pub use core::{Fund, NewFund, create_fund, create_fund_table};
pub use endpoints::{
    create_fund_endpoint, delete_fund_endpoint, list_funds_endpoint, update_fund_endpoint,
};
