mod report;
mod state;

pub use report::{build_report, build_report_async, DashboardReport};
pub use state::DashboardState;
