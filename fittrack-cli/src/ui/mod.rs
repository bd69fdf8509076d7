// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, DashboardData, Tab};
pub use dashboard::Dashboard;
