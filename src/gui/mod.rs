//! GUI module - dashboard window components

mod app;
mod report_view;
mod sidebar;

pub use app::DashboardApp;
pub use report_view::ReportView;
pub use sidebar::{Sidebar, SidebarAction};
