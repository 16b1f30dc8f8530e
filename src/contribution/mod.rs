//! Contributions are money friends put into the shared pot. This module
//! defines the contribution data model, its database queries (including
//! per-friend totals for the dashboard), and the JSON endpoints for managing
//! contributions.

mod core;
mod create_contribution_endpoint;
mod delete_contribution_endpoint;
mod list_contributions_endpoint;
mod update_contribution_endpoint;

pub use core::{
    Contribution, ContributionWithFriend, FriendTotal, NewContribution, create_contribution,
    create_contribution_table, get_contributions_by_friend, get_contributions_with_friends,
    get_friend_totals, get_total_contributions,
};
pub use create_contribution_endpoint::create_contribution_endpoint;
pub use delete_contribution_endpoint::delete_contribution_endpoint;
pub use list_contributions_endpoint::{
    contributions_by_friend_endpoint, list_contributions_endpoint,
};
pub use update_contribution_endpoint::update_contribution_endpoint;
