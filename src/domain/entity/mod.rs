pub mod break_entry;
pub mod plan;
pub mod settings;
pub mod status;
pub mod time_of_day;
pub mod warning;

pub use break_entry::{Break, BreakSpan};
pub use plan::{Plan, PlanKey};
pub use settings::{BreakTemplate, DisplayFormat, Settings};
pub use status::Status;
pub use time_of_day::TimeOfDay;
pub use warning::Warning;
