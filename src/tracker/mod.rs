//! Page lifecycle and the dashboard orchestrator

pub mod dashboard;
pub mod page;

pub use dashboard::{Dashboard, PageKey, FIRST_PAGE};
pub use page::{FetchTrigger, PageState, PageView};
