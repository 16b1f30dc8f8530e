//! Type aliases for database row IDs.

/// The integer ID of a database row.
pub type DatabaseId = i64;
/// The ID of a transaction in the database.
pub type TransactionId = DatabaseId;
/// The ID of a fund contribution in the database.
pub type FundContributionId = DatabaseId;
/// The ID of a friend in the database.
pub type FriendId = DatabaseId;
/// The ID of a fund in the database.
pub type FundId = DatabaseId;
/// The ID of a contribution in the database.
pub type ContributionId = DatabaseId;
