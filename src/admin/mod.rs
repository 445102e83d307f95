// src/admin/mod.rs
// Admin dashboard: account management and registration statistics

pub mod handlers;
pub mod stats;

pub use handlers::admin_router;
pub use stats::{dashboard_stats, registration_series, ChartData, DashboardStats, RegistrationSeries};
