//! Text surfaces of the ticker.
//!
//! - `dashboard` - the main view: income, progress, rates, countdown
//! - `widget` - compact always-on line fed by the relay
//! - `status_bar` - command hints and help text

mod dashboard;
mod status_bar;
mod widget;

pub use dashboard::{progress_bar, render_dashboard};
pub use status_bar::{CommandHint, build_help, build_status_bar, hints};
pub use widget::{WidgetView, run_widget};
