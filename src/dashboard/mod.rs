//! The dashboard aggregates the rest of the application into a single
//! summary: per-friend contribution totals, the overall pot, the current
//! transaction balance, and the most recent activity.

mod summary_endpoint;

pub use summary_endpoint::{DashboardState, DashboardSummary, dashboard_endpoint};
