mod progress;
mod summary;
pub mod views;

pub use progress::{completion_ratio, days_left, is_after, DashboardLimits};
pub use summary::DashboardSummary;
